//! Fan-out loading of the five remote lists.
//!
//! `load_all` fires every list request concurrently and joins on an
//! all-complete barrier. Each sub-loader always settles: a transport failure
//! is reported through the notifier and leaves that slice of the cache at
//! its prior value (empty on first run), so one failed list never stalls the
//! rest of the interface.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::cache::ReferenceCache;
use crate::client::ApiClient;
use crate::models::{
    InboundDocument, InboundFilter, Material, MaterialFilter, OutboundDocument, OutboundFilter,
    Supplier, SupplierFilter, Warehouse,
};
use crate::notifications::{Notifier, Severity};

/// Everything the initial fan-out produced. Reference collections are the
/// post-load cache snapshots; document lists are pass-through (they are not
/// cached).
#[derive(Debug)]
pub struct InitialLoad {
    pub materials: Arc<Vec<Material>>,
    pub suppliers: Arc<Vec<Supplier>>,
    pub warehouses: Arc<Vec<Warehouse>>,
    pub inbounds: Vec<InboundDocument>,
    pub outbounds: Vec<OutboundDocument>,
}

#[derive(Clone)]
pub struct Loader {
    api: ApiClient,
    cache: ReferenceCache,
    notifier: Notifier,
}

impl Loader {
    pub fn new(api: ApiClient, cache: ReferenceCache, notifier: Notifier) -> Self {
        Self {
            api,
            cache,
            notifier,
        }
    }

    /// Fetches materials and replaces the cache slice on success. Always
    /// settles; the returned snapshot is the prior one if the fetch failed.
    #[instrument(skip(self, filter))]
    pub async fn load_materials(&self, filter: &MaterialFilter) -> Arc<Vec<Material>> {
        match self.api.list_materials(filter).await {
            Ok(items) => {
                info!(count = items.len(), "materials loaded");
                self.cache.replace_materials(items);
            }
            Err(err) => {
                warn!(error = %err, "failed to load materials");
                self.notifier
                    .notify("Failed to load materials", Severity::Danger);
            }
        }
        self.cache.materials()
    }

    #[instrument(skip(self, filter))]
    pub async fn load_suppliers(&self, filter: &SupplierFilter) -> Arc<Vec<Supplier>> {
        match self.api.list_suppliers(filter).await {
            Ok(items) => {
                info!(count = items.len(), "suppliers loaded");
                self.cache.replace_suppliers(items);
            }
            Err(err) => {
                warn!(error = %err, "failed to load suppliers");
                self.notifier
                    .notify("Failed to load suppliers", Severity::Danger);
            }
        }
        self.cache.suppliers()
    }

    #[instrument(skip(self))]
    pub async fn load_warehouses(&self) -> Arc<Vec<Warehouse>> {
        match self.api.list_warehouses().await {
            Ok(items) => {
                info!(count = items.len(), "warehouses loaded");
                self.cache.replace_warehouses(items);
            }
            Err(err) => {
                warn!(error = %err, "failed to load warehouses");
                self.notifier
                    .notify("Failed to load warehouses", Severity::Danger);
            }
        }
        self.cache.warehouses()
    }

    /// Document lists are not cached; a failed fetch settles with an empty
    /// list after notifying.
    #[instrument(skip(self, filter))]
    pub async fn load_inbounds(&self, filter: &InboundFilter) -> Vec<InboundDocument> {
        match self.api.list_inbounds(filter).await {
            Ok(documents) => {
                info!(count = documents.len(), "inbound documents loaded");
                documents
            }
            Err(err) => {
                warn!(error = %err, "failed to load inbound documents");
                self.notifier
                    .notify("Failed to load inbound documents", Severity::Danger);
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, filter))]
    pub async fn load_outbounds(&self, filter: &OutboundFilter) -> Vec<OutboundDocument> {
        match self.api.list_outbounds(filter).await {
            Ok(documents) => {
                info!(count = documents.len(), "outbound documents loaded");
                documents
            }
            Err(err) => {
                warn!(error = %err, "failed to load outbound documents");
                self.notifier
                    .notify("Failed to load outbound documents", Severity::Danger);
                Vec::new()
            }
        }
    }

    /// Fires all five list requests concurrently and resolves only once every
    /// one of them has settled, regardless of completion order.
    #[instrument(skip(self))]
    pub async fn load_all(&self) -> InitialLoad {
        let material_filter = MaterialFilter::default();
        let supplier_filter = SupplierFilter::default();
        let inbound_filter = InboundFilter::default();
        let outbound_filter = OutboundFilter::default();
        let (materials, suppliers, warehouses, inbounds, outbounds) = tokio::join!(
            self.load_materials(&material_filter),
            self.load_suppliers(&supplier_filter),
            self.load_warehouses(),
            self.load_inbounds(&inbound_filter),
            self.load_outbounds(&outbound_filter),
        );
        InitialLoad {
            materials,
            suppliers,
            warehouses,
            inbounds,
            outbounds,
        }
    }
}
