use serde::{Deserialize, Serialize};

/// A material as returned by `GET /api/materials`.
///
/// `stock` is server-authoritative: the console reads it, displays it, and
/// re-fetches it after document postings, but never computes it locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    #[serde(rename = "material_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    pub unit: String,
    pub stock: i64,
}

/// Create/update body for a material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialPayload {
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub stock: i64,
}

/// Query parameters for the material list. Empty fields are omitted from the
/// query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterialFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl MaterialFilter {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
