//! Editor form drafts and the per-form submission gate.
//!
//! Drafts live only inside an open editor: they have no identity until
//! submission and are discarded on cancel. `FormHandle` is the shared handle
//! the rendering layer and the submission controller both hold; its gate is
//! the `idle`/`submitting` state machine that drops duplicate submits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::models::{AuditStatus, Material, Supplier, Warehouse};
use crate::validation::LineDraft;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("at least one line must remain")]
    LastLine,
    #[error("no line at index {0}")]
    NoSuchLine(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// One-slot gate guarding a form's network round trip. `try_begin` flips
/// idle -> submitting synchronously; dropping the permit flips it back.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    busy: Arc<AtomicBool>,
}

impl SubmitGate {
    pub fn state(&self) -> SubmitState {
        if self.busy.load(Ordering::SeqCst) {
            SubmitState::Submitting
        } else {
            SubmitState::Idle
        }
    }

    pub(crate) fn try_begin(&self) -> Option<SubmitPermit> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Some(SubmitPermit { gate: self.clone() })
        } else {
            None
        }
    }
}

/// Held for the duration of one submission; releasing it re-enables the
/// trigger on every exit path.
#[derive(Debug)]
pub(crate) struct SubmitPermit {
    gate: SubmitGate,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::SeqCst);
    }
}

/// Shared handle to an open editor form and its submission gate.
#[derive(Debug, Clone, Default)]
pub struct FormHandle<T> {
    form: Arc<Mutex<T>>,
    gate: SubmitGate,
}

impl<T> FormHandle<T> {
    pub fn new(form: T) -> Self {
        Self {
            form: Arc::new(Mutex::new(form)),
            gate: SubmitGate::default(),
        }
    }

    /// Runs a closure against the draft. Never held across an await.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.form.lock().unwrap())
    }

    pub fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.form.lock().unwrap().clone()
    }

    pub fn state(&self) -> SubmitState {
        self.gate.state()
    }

    pub(crate) fn gate(&self) -> &SubmitGate {
        &self.gate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialForm {
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub stock: i64,
    pub open: bool,
}

impl MaterialForm {
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            category: String::new(),
            unit: String::new(),
            stock: 0,
            open: true,
        }
    }

    /// Pre-populates the editor from a cached material.
    pub fn prefill(material: &Material) -> Self {
        Self {
            id: Some(material.id),
            name: material.name.clone(),
            category: material.category.clone().unwrap_or_default(),
            unit: material.unit.clone(),
            stock: material.stock,
            open: true,
        }
    }
}

impl Default for MaterialForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierForm {
    pub id: Option<i64>,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub is_valid: bool,
    pub open: bool,
}

impl SupplierForm {
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            contact: String::new(),
            phone: String::new(),
            is_valid: true,
            open: true,
        }
    }

    pub fn prefill(supplier: &Supplier) -> Self {
        Self {
            id: Some(supplier.id),
            name: supplier.name.clone(),
            contact: supplier.contact.clone().unwrap_or_default(),
            phone: supplier.phone.clone().unwrap_or_default(),
            is_valid: supplier.is_valid,
            open: true,
        }
    }
}

impl Default for SupplierForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseForm {
    pub id: Option<i64>,
    pub name: String,
    pub location: String,
    pub open: bool,
}

impl WarehouseForm {
    pub fn new() -> Self {
        Self {
            id: None,
            name: String::new(),
            location: String::new(),
            open: true,
        }
    }

    pub fn prefill(warehouse: &Warehouse) -> Self {
        Self {
            id: Some(warehouse.id),
            name: warehouse.name.clone(),
            location: warehouse.location.clone().unwrap_or_default(),
            open: true,
        }
    }
}

impl Default for WarehouseForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundForm {
    pub id: Option<String>,
    pub supplier_id: Option<i64>,
    pub warehouse_id: Option<i64>,
    pub date: NaiveDate,
    pub audit_status: AuditStatus,
    pub remark: String,
    pub lines: Vec<LineDraft>,
    pub open: bool,
}

impl InboundForm {
    /// A fresh document: today's date, pending status, one default line row.
    pub fn new() -> Self {
        Self {
            id: None,
            supplier_id: None,
            warehouse_id: None,
            date: Local::now().date_naive(),
            audit_status: AuditStatus::Pending,
            remark: String::new(),
            lines: vec![LineDraft::new()],
            open: true,
        }
    }

    /// Editing an existing document starts from a reset form carrying the
    /// id; documents are not cached, so there is nothing to prefill from.
    pub fn edit(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new()
        }
    }

    /// Appends a default row and returns its index so the caller can project
    /// fresh material options for it.
    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineDraft::new());
        self.lines.len() - 1
    }

    /// Removing the last remaining row is rejected.
    pub fn remove_line(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.lines.len() {
            return Err(FormError::NoSuchLine(index));
        }
        if self.lines.len() == 1 {
            return Err(FormError::LastLine);
        }
        self.lines.remove(index);
        Ok(())
    }
}

impl Default for InboundForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundForm {
    pub id: Option<String>,
    pub dept_name: String,
    pub warehouse_id: Option<i64>,
    pub date: NaiveDate,
    pub audit_status: AuditStatus,
    pub remark: String,
    pub lines: Vec<LineDraft>,
    pub open: bool,
}

impl OutboundForm {
    pub fn new() -> Self {
        Self {
            id: None,
            dept_name: String::new(),
            warehouse_id: None,
            date: Local::now().date_naive(),
            audit_status: AuditStatus::Pending,
            remark: String::new(),
            lines: vec![LineDraft::new()],
            open: true,
        }
    }

    pub fn edit(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::new()
        }
    }

    pub fn add_line(&mut self) -> usize {
        self.lines.push(LineDraft::new());
        self.lines.len() - 1
    }

    pub fn remove_line(&mut self, index: usize) -> Result<(), FormError> {
        if index >= self.lines.len() {
            return Err(FormError::NoSuchLine(index));
        }
        if self.lines.len() == 1 {
            return Err(FormError::LastLine);
        }
        self.lines.remove(index);
        Ok(())
    }
}

impl Default for OutboundForm {
    fn default() -> Self {
        Self::new()
    }
}
