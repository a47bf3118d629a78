use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStatus;

/// One line of an inbound document: a material received in some quantity at
/// a unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundLine {
    pub material_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// An inbound stock document. List responses may omit `lines`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundDocument {
    #[serde(rename = "inbound_id")]
    pub id: String,
    pub supplier_id: i64,
    pub warehouse_id: i64,
    pub date: NaiveDate,
    pub audit_status: AuditStatus,
    #[serde(default)]
    pub remark: Option<String>,
    #[serde(default)]
    pub lines: Vec<InboundLine>,
}

/// Create/update body for an inbound document. The remote system adjusts
/// material stock as a side effect of accepting this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboundPayload {
    pub supplier_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub date: NaiveDate,
    pub audit_status: AuditStatus,
    pub remark: Option<String>,
    pub lines: Vec<InboundLine>,
}

/// Query parameters for the inbound list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InboundFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_status: Option<AuditStatus>,
}
