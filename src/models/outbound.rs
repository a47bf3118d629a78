use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::AuditStatus;

/// One line of an outbound document. Outbound lines carry no price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundLine {
    pub material_id: i64,
    pub quantity: i32,
}

/// An outbound stock document, issued to a department rather than sourced
/// from a supplier. List responses may omit `lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundDocument {
    #[serde(rename = "outbound_id")]
    pub id: String,
    pub dept_name: String,
    pub warehouse_id: i64,
    pub date: NaiveDate,
    pub audit_status: AuditStatus,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub lines: Vec<OutboundLine>,
}

/// Create/update body for an outbound document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundPayload {
    pub dept_name: String,
    pub warehouse_id: Option<i64>,
    pub date: NaiveDate,
    pub audit_status: AuditStatus,
    pub remark: Option<String>,
    pub lines: Vec<OutboundLine>,
}

/// Query parameters for the outbound list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutboundFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_status: Option<AuditStatus>,
}
