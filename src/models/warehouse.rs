use serde::{Deserialize, Serialize};

/// A warehouse as returned by `GET /api/warehouses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(rename = "warehouse_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Create/update body for a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehousePayload {
    pub name: String,
    pub location: Option<String>,
}
