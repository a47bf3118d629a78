//! Pure projection of cache snapshots into dropdown option lists.
//!
//! Re-run after every cache refresh and after every dynamic line-row
//! insertion, so a new row never sees stale options. The placeholder option
//! is always first; the rest preserve server-returned order.

use crate::cache::ReferenceCache;
use crate::models::{DocumentKind, Material, Supplier, Warehouse};

pub const SELECT_SUPPLIER: &str = "Select a supplier";
pub const ALL_SUPPLIERS: &str = "All suppliers";
pub const SELECT_WAREHOUSE: &str = "Select a warehouse";
pub const SELECT_MATERIAL: &str = "Select a material";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
        }
    }
}

/// Supplier options for a document form.
pub fn supplier_options(suppliers: &[Supplier]) -> Vec<SelectOption> {
    project(SELECT_SUPPLIER, suppliers.iter(), |s| {
        (s.id.to_string(), s.name.clone())
    })
}

/// Supplier options for a search form; same list, "all" placeholder.
pub fn supplier_filter_options(suppliers: &[Supplier]) -> Vec<SelectOption> {
    project(ALL_SUPPLIERS, suppliers.iter(), |s| {
        (s.id.to_string(), s.name.clone())
    })
}

pub fn warehouse_options(warehouses: &[Warehouse]) -> Vec<SelectOption> {
    project(SELECT_WAREHOUSE, warehouses.iter(), |w| {
        (w.id.to_string(), w.name.clone())
    })
}

/// Material options for a document line row. Outbound labels embed the
/// current stock so the operator can gauge availability; inbound labels
/// show only the unit.
pub fn material_options(materials: &[Material], kind: DocumentKind) -> Vec<SelectOption> {
    project(SELECT_MATERIAL, materials.iter(), |m| {
        let label = match kind {
            DocumentKind::Inbound => format!("{} ({})", m.name, m.unit),
            DocumentKind::Outbound => format!("{} (stock: {} {})", m.name, m.stock, m.unit),
        };
        (m.id.to_string(), label)
    })
}

fn project<'a, T: 'a>(
    placeholder: &str,
    items: impl Iterator<Item = &'a T>,
    option: impl Fn(&T) -> (String, String),
) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(placeholder))
        .chain(items.map(|item| {
            let (value, label) = option(item);
            SelectOption { value, label }
        }))
        .collect()
}

/// Every dropdown the console renders, derived in one pass. Produced once
/// when the initial fan-out completes.
#[derive(Debug, Clone)]
pub struct DropdownSet {
    pub suppliers: Vec<SelectOption>,
    pub supplier_filter: Vec<SelectOption>,
    pub warehouses: Vec<SelectOption>,
    pub inbound_materials: Vec<SelectOption>,
    pub outbound_materials: Vec<SelectOption>,
}

pub fn project_all(cache: &ReferenceCache) -> DropdownSet {
    let suppliers = cache.suppliers();
    let warehouses = cache.warehouses();
    let materials = cache.materials();
    DropdownSet {
        suppliers: supplier_options(&suppliers),
        supplier_filter: supplier_filter_options(&suppliers),
        warehouses: warehouse_options(&warehouses),
        inbound_materials: material_options(&materials, DocumentKind::Inbound),
        outbound_materials: material_options(&materials, DocumentKind::Outbound),
    }
}
