use serde::{Deserialize, Serialize};

/// A supplier as returned by `GET /api/suppliers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "supplier_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub is_valid: bool,
}

/// Create/update body for a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierPayload {
    pub name: String,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub is_valid: bool,
}

/// Query parameters for the supplier list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SupplierFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SupplierFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
