//! Single-flight submission and deletion of forms.
//!
//! One in-flight submission per form: the gate flips to `submitting`
//! synchronously with the triggering control being disabled, duplicate
//! triggers are dropped, and every exit path returns the form to `idle`.
//! Successful document postings refresh the affected list and the material
//! collection, because the remote system mutates stock as a side effect.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, instrument, warn};

use crate::cache::ReferenceCache;
use crate::client::ApiClient;
use crate::forms::{
    FormHandle, InboundForm, MaterialForm, OutboundForm, SupplierForm, WarehouseForm,
};
use crate::loader::Loader;
use crate::models::{
    InboundFilter, InboundPayload, MaterialFilter, MaterialPayload, OutboundFilter,
    OutboundPayload, SupplierFilter, SupplierPayload, WarehousePayload,
};
use crate::notifications::{Notifier, Severity};
use crate::validation::{validate_inbound_lines, validate_outbound_lines, InvalidDocument};

const MSG_SAVED: &str = "Saved";
const MSG_SAVE_FAILED: &str = "Save failed, please retry";
const MSG_DELETED: &str = "Deleted";
const MSG_DELETE_FAILED: &str = "Delete failed, please retry";

const CONFIRM_DELETE_MATERIAL: &str = "Delete this material?";
const CONFIRM_DELETE_SUPPLIER: &str = "Delete this supplier?";
const CONFIRM_DELETE_WAREHOUSE: &str = "Delete this warehouse?";
const CONFIRM_DELETE_INBOUND: &str =
    "Delete this inbound document? Stock will be reduced accordingly.";
const CONFIRM_DELETE_OUTBOUND: &str =
    "Delete this outbound document? Stock will be restored accordingly.";

/// User-gated confirmation for destructive actions. Synchronous: the
/// question blocks the command, not the runtime.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved remotely; the editor was closed and the affected lists reloaded.
    Saved,
    /// Validation failed; nothing was sent.
    Invalid,
    /// The remote call failed; the form stays open with its data intact.
    Failed,
    /// A submission was already in flight; this trigger was dropped.
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; no request, no notification.
    Cancelled,
    Failed,
    /// A delete for the same id was already in flight.
    Dropped,
}

#[derive(Clone)]
pub struct SubmissionController {
    api: ApiClient,
    loader: Loader,
    cache: ReferenceCache,
    notifier: Notifier,
    pending_deletes: Arc<DashMap<String, ()>>,
}

impl SubmissionController {
    pub fn new(
        api: ApiClient,
        loader: Loader,
        cache: ReferenceCache,
        notifier: Notifier,
    ) -> Self {
        Self {
            api,
            loader,
            cache,
            notifier,
            pending_deletes: Arc::new(DashMap::new()),
        }
    }

    // -- reference entities ------------------------------------------------

    #[instrument(skip(self, form))]
    pub async fn submit_material(&self, form: &FormHandle<MaterialForm>) -> SubmitOutcome {
        let Some(_permit) = form.gate().try_begin() else {
            debug!("duplicate material submit dropped");
            return SubmitOutcome::Dropped;
        };
        let (id, payload) = form.with(|f| {
            (
                f.id,
                MaterialPayload {
                    name: f.name.clone(),
                    category: none_if_empty(&f.category),
                    unit: f.unit.clone(),
                    stock: f.stock,
                },
            )
        });
        match self.api.save_material(id, &payload).await {
            Ok(()) => {
                form.with(|f| f.open = false);
                self.notifier.notify(MSG_SAVED, Severity::Success);
                self.loader.load_materials(&MaterialFilter::default()).await;
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "material submission failed");
                self.notifier.notify(MSG_SAVE_FAILED, Severity::Danger);
                SubmitOutcome::Failed
            }
        }
    }

    #[instrument(skip(self, form))]
    pub async fn submit_supplier(&self, form: &FormHandle<SupplierForm>) -> SubmitOutcome {
        let Some(_permit) = form.gate().try_begin() else {
            debug!("duplicate supplier submit dropped");
            return SubmitOutcome::Dropped;
        };
        let (id, payload) = form.with(|f| {
            (
                f.id,
                SupplierPayload {
                    name: f.name.clone(),
                    contact: none_if_empty(&f.contact),
                    phone: none_if_empty(&f.phone),
                    is_valid: f.is_valid,
                },
            )
        });
        match self.api.save_supplier(id, &payload).await {
            Ok(()) => {
                form.with(|f| f.open = false);
                self.notifier.notify(MSG_SAVED, Severity::Success);
                self.loader.load_suppliers(&SupplierFilter::default()).await;
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "supplier submission failed");
                self.notifier.notify(MSG_SAVE_FAILED, Severity::Danger);
                SubmitOutcome::Failed
            }
        }
    }

    #[instrument(skip(self, form))]
    pub async fn submit_warehouse(&self, form: &FormHandle<WarehouseForm>) -> SubmitOutcome {
        let Some(_permit) = form.gate().try_begin() else {
            debug!("duplicate warehouse submit dropped");
            return SubmitOutcome::Dropped;
        };
        let (id, payload) = form.with(|f| {
            (
                f.id,
                WarehousePayload {
                    name: f.name.clone(),
                    location: none_if_empty(&f.location),
                },
            )
        });
        match self.api.save_warehouse(id, &payload).await {
            Ok(()) => {
                form.with(|f| f.open = false);
                self.notifier.notify(MSG_SAVED, Severity::Success);
                self.loader.load_warehouses().await;
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "warehouse submission failed");
                self.notifier.notify(MSG_SAVE_FAILED, Severity::Danger);
                SubmitOutcome::Failed
            }
        }
    }

    // -- documents ---------------------------------------------------------

    #[instrument(skip(self, form))]
    pub async fn submit_inbound(&self, form: &FormHandle<InboundForm>) -> SubmitOutcome {
        let Some(_permit) = form.gate().try_begin() else {
            debug!("duplicate inbound submit dropped");
            return SubmitOutcome::Dropped;
        };
        let draft = form.snapshot();
        let lines = match validate_inbound_lines(&draft.lines, &self.cache) {
            Ok(lines) => lines,
            Err(invalid) => {
                self.report_invalid(&invalid);
                return SubmitOutcome::Invalid;
            }
        };
        let payload = InboundPayload {
            supplier_id: draft.supplier_id,
            warehouse_id: draft.warehouse_id,
            date: draft.date,
            audit_status: draft.audit_status,
            remark: none_if_empty(&draft.remark),
            lines,
        };
        match self.api.save_inbound(draft.id.as_deref(), &payload).await {
            Ok(()) => {
                form.with(|f| f.open = false);
                self.notifier.notify(MSG_SAVED, Severity::Success);
                // Posting changed stock on the server; refresh both lists.
                let inbound_filter = InboundFilter::default();
                let material_filter = MaterialFilter::default();
                tokio::join!(
                    self.loader.load_inbounds(&inbound_filter),
                    self.loader.load_materials(&material_filter),
                );
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "inbound submission failed");
                self.notifier.notify(MSG_SAVE_FAILED, Severity::Danger);
                SubmitOutcome::Failed
            }
        }
    }

    #[instrument(skip(self, form))]
    pub async fn submit_outbound(&self, form: &FormHandle<OutboundForm>) -> SubmitOutcome {
        let Some(_permit) = form.gate().try_begin() else {
            debug!("duplicate outbound submit dropped");
            return SubmitOutcome::Dropped;
        };
        let draft = form.snapshot();
        let lines = match validate_outbound_lines(&draft.lines, &self.cache) {
            Ok(lines) => lines,
            Err(invalid) => {
                self.report_invalid(&invalid);
                return SubmitOutcome::Invalid;
            }
        };
        let payload = OutboundPayload {
            dept_name: draft.dept_name.clone(),
            warehouse_id: draft.warehouse_id,
            date: draft.date,
            audit_status: draft.audit_status,
            remark: none_if_empty(&draft.remark),
            lines,
        };
        match self.api.save_outbound(draft.id.as_deref(), &payload).await {
            Ok(()) => {
                form.with(|f| f.open = false);
                self.notifier.notify(MSG_SAVED, Severity::Success);
                let outbound_filter = OutboundFilter::default();
                let material_filter = MaterialFilter::default();
                tokio::join!(
                    self.loader.load_outbounds(&outbound_filter),
                    self.loader.load_materials(&material_filter),
                );
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!(error = %err, "outbound submission failed");
                self.notifier.notify(MSG_SAVE_FAILED, Severity::Danger);
                SubmitOutcome::Failed
            }
        }
    }

    // -- deletion ----------------------------------------------------------

    #[instrument(skip(self, confirm))]
    pub async fn delete_material(&self, id: i64, confirm: &dyn ConfirmPrompt) -> DeleteOutcome {
        if !confirm.confirm(CONFIRM_DELETE_MATERIAL) {
            return DeleteOutcome::Cancelled;
        }
        let Some(_guard) = self.begin_delete(format!("materials/{id}")) else {
            return DeleteOutcome::Dropped;
        };
        match self.api.delete_material(id).await {
            Ok(()) => {
                self.notifier.notify(MSG_DELETED, Severity::Success);
                self.loader.load_materials(&MaterialFilter::default()).await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(error = %err, "material delete failed");
                self.notifier.notify(MSG_DELETE_FAILED, Severity::Danger);
                DeleteOutcome::Failed
            }
        }
    }

    #[instrument(skip(self, confirm))]
    pub async fn delete_supplier(&self, id: i64, confirm: &dyn ConfirmPrompt) -> DeleteOutcome {
        if !confirm.confirm(CONFIRM_DELETE_SUPPLIER) {
            return DeleteOutcome::Cancelled;
        }
        let Some(_guard) = self.begin_delete(format!("suppliers/{id}")) else {
            return DeleteOutcome::Dropped;
        };
        match self.api.delete_supplier(id).await {
            Ok(()) => {
                self.notifier.notify(MSG_DELETED, Severity::Success);
                self.loader.load_suppliers(&SupplierFilter::default()).await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(error = %err, "supplier delete failed");
                self.notifier.notify(MSG_DELETE_FAILED, Severity::Danger);
                DeleteOutcome::Failed
            }
        }
    }

    #[instrument(skip(self, confirm))]
    pub async fn delete_warehouse(&self, id: i64, confirm: &dyn ConfirmPrompt) -> DeleteOutcome {
        if !confirm.confirm(CONFIRM_DELETE_WAREHOUSE) {
            return DeleteOutcome::Cancelled;
        }
        let Some(_guard) = self.begin_delete(format!("warehouses/{id}")) else {
            return DeleteOutcome::Dropped;
        };
        match self.api.delete_warehouse(id).await {
            Ok(()) => {
                self.notifier.notify(MSG_DELETED, Severity::Success);
                self.loader.load_warehouses().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(error = %err, "warehouse delete failed");
                self.notifier.notify(MSG_DELETE_FAILED, Severity::Danger);
                DeleteOutcome::Failed
            }
        }
    }

    /// Deleting a document reverses a prior stock change on the server, so
    /// materials are reloaded alongside the document list.
    #[instrument(skip(self, confirm))]
    pub async fn delete_inbound(&self, id: &str, confirm: &dyn ConfirmPrompt) -> DeleteOutcome {
        if !confirm.confirm(CONFIRM_DELETE_INBOUND) {
            return DeleteOutcome::Cancelled;
        }
        let Some(_guard) = self.begin_delete(format!("inbounds/{id}")) else {
            return DeleteOutcome::Dropped;
        };
        match self.api.delete_inbound(id).await {
            Ok(()) => {
                self.notifier.notify(MSG_DELETED, Severity::Success);
                let inbound_filter = InboundFilter::default();
                let material_filter = MaterialFilter::default();
                tokio::join!(
                    self.loader.load_inbounds(&inbound_filter),
                    self.loader.load_materials(&material_filter),
                );
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(error = %err, "inbound delete failed");
                self.notifier.notify(MSG_DELETE_FAILED, Severity::Danger);
                DeleteOutcome::Failed
            }
        }
    }

    #[instrument(skip(self, confirm))]
    pub async fn delete_outbound(&self, id: &str, confirm: &dyn ConfirmPrompt) -> DeleteOutcome {
        if !confirm.confirm(CONFIRM_DELETE_OUTBOUND) {
            return DeleteOutcome::Cancelled;
        }
        let Some(_guard) = self.begin_delete(format!("outbounds/{id}")) else {
            return DeleteOutcome::Dropped;
        };
        match self.api.delete_outbound(id).await {
            Ok(()) => {
                self.notifier.notify(MSG_DELETED, Severity::Success);
                let outbound_filter = OutboundFilter::default();
                let material_filter = MaterialFilter::default();
                tokio::join!(
                    self.loader.load_outbounds(&outbound_filter),
                    self.loader.load_materials(&material_filter),
                );
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(error = %err, "outbound delete failed");
                self.notifier.notify(MSG_DELETE_FAILED, Severity::Danger);
                DeleteOutcome::Failed
            }
        }
    }

    // -- helpers -----------------------------------------------------------

    fn report_invalid(&self, invalid: &InvalidDocument) {
        match invalid {
            InvalidDocument::Empty => {
                self.notifier
                    .notify(invalid.to_string(), Severity::Danger);
            }
            InvalidDocument::Fields(errors) => {
                // One notification per invalid field.
                for error in errors {
                    self.notifier.notify(
                        format!("Line {}: {}", error.row + 1, error.message),
                        Severity::Danger,
                    );
                }
            }
        }
    }

    fn begin_delete(&self, key: String) -> Option<DeleteGuard> {
        use dashmap::mapref::entry::Entry;
        match self.pending_deletes.entry(key.clone()) {
            Entry::Occupied(_) => {
                debug!(key = %key, "duplicate delete dropped");
                None
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                Some(DeleteGuard {
                    map: self.pending_deletes.clone(),
                    key,
                })
            }
        }
    }
}

struct DeleteGuard {
    map: Arc<DashMap<String, ()>>,
    key: String,
}

impl Drop for DeleteGuard {
    fn drop(&mut self) {
        self.map.remove(&self.key);
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
