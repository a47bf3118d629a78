//! Stockroom Console core
//!
//! Client-side state and transaction layer for an inventory management
//! console: a replace-only cache of reference data kept in sync with a
//! remote API, concurrent initial loading with an all-complete barrier,
//! dropdown option projection, multi-line document validation, and
//! single-flight form submission. Rendering is someone else's job: every
//! component here returns plain data for a view layer to project.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod forms;
pub mod loader;
pub mod models;
pub mod notifications;
pub mod options;
pub mod submission;
pub mod validation;

use std::time::Duration;

use crate::cache::ReferenceCache;
use crate::client::ApiClient;
use crate::config::ConsoleConfig;
use crate::errors::ApiError;
use crate::forms::{
    FormHandle, InboundForm, MaterialForm, OutboundForm, SupplierForm, WarehouseForm,
};
use crate::loader::{InitialLoad, Loader};
use crate::models::{
    DocumentKind, InboundDocument, InboundFilter, Material, MaterialFilter, OutboundDocument,
    OutboundFilter, Supplier, SupplierFilter,
};
use crate::notifications::{Notifier, Severity};
use crate::options::{DropdownSet, SelectOption};
use crate::submission::SubmissionController;

use std::sync::Arc;

/// Everything `initialize` produced: the five loaded lists plus the dropdown
/// options projected once the fan-out barrier completed.
#[derive(Debug)]
pub struct Bootstrap {
    pub lists: InitialLoad,
    pub options: DropdownSet,
}

/// Wires the components together around one shared cache and notifier.
#[derive(Clone)]
pub struct Console {
    pub config: ConsoleConfig,
    pub cache: ReferenceCache,
    pub notifier: Notifier,
    pub loader: Loader,
    pub submissions: SubmissionController,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config)?;
        let cache = ReferenceCache::new();
        let notifier = Notifier::new(Duration::from_secs(config.toast_ttl_secs));
        let loader = Loader::new(api.clone(), cache.clone(), notifier.clone());
        let submissions =
            SubmissionController::new(api, loader.clone(), cache.clone(), notifier.clone());
        Ok(Self {
            config,
            cache,
            notifier,
            loader,
            submissions,
        })
    }

    /// Loads all five lists concurrently and projects the dropdown options
    /// exactly once, after the barrier completes.
    pub async fn initialize(&self) -> Bootstrap {
        let lists = self.loader.load_all().await;
        let options = options::project_all(&self.cache);
        Bootstrap { lists, options }
    }

    // -- search commands ---------------------------------------------------

    pub async fn search_materials(&self, filter: &MaterialFilter) -> Arc<Vec<Material>> {
        self.loader.load_materials(filter).await
    }

    pub async fn search_suppliers(&self, filter: &SupplierFilter) -> Arc<Vec<Supplier>> {
        self.loader.load_suppliers(filter).await
    }

    pub async fn search_inbounds(&self, filter: &InboundFilter) -> Vec<InboundDocument> {
        self.loader.load_inbounds(filter).await
    }

    pub async fn search_outbounds(&self, filter: &OutboundFilter) -> Vec<OutboundDocument> {
        self.loader.load_outbounds(filter).await
    }

    // -- editor commands ---------------------------------------------------

    /// Opens a pre-populated editor for a cached material, or `None` if the
    /// id is not in the current snapshot.
    pub fn edit_material(&self, id: i64) -> Option<FormHandle<MaterialForm>> {
        self.cache
            .material_by_id(id)
            .map(|m| FormHandle::new(MaterialForm::prefill(&m)))
    }

    pub fn edit_supplier(&self, id: i64) -> Option<FormHandle<SupplierForm>> {
        self.cache
            .supplier_by_id(id)
            .map(|s| FormHandle::new(SupplierForm::prefill(&s)))
    }

    pub fn edit_warehouse(&self, id: i64) -> Option<FormHandle<WarehouseForm>> {
        self.cache
            .warehouse_by_id(id)
            .map(|w| FormHandle::new(WarehouseForm::prefill(&w)))
    }

    /// Documents are not cached; editing starts from a reset form carrying
    /// the id.
    pub fn edit_inbound(&self, id: &str) -> FormHandle<InboundForm> {
        FormHandle::new(InboundForm::edit(id))
    }

    pub fn edit_outbound(&self, id: &str) -> FormHandle<OutboundForm> {
        FormHandle::new(OutboundForm::edit(id))
    }

    // -- line-row commands -------------------------------------------------

    /// Appends a line row and returns fresh material options for it, so the
    /// new row is populated from the current cache rather than stale options.
    pub fn add_inbound_line(&self, form: &FormHandle<InboundForm>) -> Vec<SelectOption> {
        form.with(|f| {
            f.add_line();
        });
        options::material_options(&self.cache.materials(), DocumentKind::Inbound)
    }

    pub fn add_outbound_line(&self, form: &FormHandle<OutboundForm>) -> Vec<SelectOption> {
        form.with(|f| {
            f.add_line();
        });
        options::material_options(&self.cache.materials(), DocumentKind::Outbound)
    }

    /// Removes a line row; rejecting the removal of the last remaining row
    /// raises a warning notification and returns false.
    pub fn remove_inbound_line(&self, form: &FormHandle<InboundForm>, index: usize) -> bool {
        match form.with(|f| f.remove_line(index)) {
            Ok(()) => true,
            Err(err) => {
                self.notifier.notify(err.to_string(), Severity::Warning);
                false
            }
        }
    }

    pub fn remove_outbound_line(&self, form: &FormHandle<OutboundForm>, index: usize) -> bool {
        match form.with(|f| f.remove_line(index)) {
            Ok(()) => true,
            Err(err) => {
                self.notifier.notify(err.to_string(), Severity::Warning);
                false
            }
        }
    }
}
