//! Wire-shape models for the Stockroom remote API.
//!
//! All identifiers are opaque stable keys assigned by the remote system;
//! this crate never generates them. Reference entities use integer ids,
//! documents use server-assigned string ids (`IN20251114001` style).

use serde::{Deserialize, Serialize};

pub mod inbound;
pub mod material;
pub mod outbound;
pub mod supplier;
pub mod warehouse;

pub use inbound::{InboundDocument, InboundFilter, InboundLine, InboundPayload};
pub use material::{Material, MaterialFilter, MaterialPayload};
pub use outbound::{OutboundDocument, OutboundFilter, OutboundLine, OutboundPayload};
pub use supplier::{Supplier, SupplierFilter, SupplierPayload};
pub use warehouse::{Warehouse, WarehousePayload};

/// Audit state of a stock document. Advisory display state only: transitions
/// happen on the remote system and reach us through re-fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Which kind of stock document a form or projection is working with.
/// Outbound documents carry no unit price and show stock in option labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Inbound,
    Outbound,
}
