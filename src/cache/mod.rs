//! Replace-only reference data cache.
//!
//! Holds the last-fetched snapshot of the three reference collections
//! (materials, suppliers, warehouses). Each refresh replaces a collection
//! wholesale; there is no TTL, no partial invalidation, no merging. Readers
//! get an `Arc` snapshot and never observe a partially-replaced collection.
//! The cache is correct only as of its last successful refresh.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::models::{Material, Supplier, Warehouse};

#[derive(Debug, Default)]
struct Snapshot {
    materials: Arc<Vec<Material>>,
    suppliers: Arc<Vec<Supplier>>,
    warehouses: Arc<Vec<Warehouse>>,
}

/// Cloneable handle to the shared reference snapshot. Mutated only by the
/// loader's completion paths; read by option projection and edit prefill.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCache {
    inner: Arc<RwLock<Snapshot>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_materials(&self, items: Vec<Material>) {
        let items = dedup_by_id(items, |m| m.id, "materials");
        self.inner.write().unwrap().materials = Arc::new(items);
    }

    pub fn replace_suppliers(&self, items: Vec<Supplier>) {
        let items = dedup_by_id(items, |s| s.id, "suppliers");
        self.inner.write().unwrap().suppliers = Arc::new(items);
    }

    pub fn replace_warehouses(&self, items: Vec<Warehouse>) {
        let items = dedup_by_id(items, |w| w.id, "warehouses");
        self.inner.write().unwrap().warehouses = Arc::new(items);
    }

    /// Current material snapshot, in server-returned order.
    pub fn materials(&self) -> Arc<Vec<Material>> {
        self.inner.read().unwrap().materials.clone()
    }

    pub fn suppliers(&self) -> Arc<Vec<Supplier>> {
        self.inner.read().unwrap().suppliers.clone()
    }

    pub fn warehouses(&self) -> Arc<Vec<Warehouse>> {
        self.inner.read().unwrap().warehouses.clone()
    }

    pub fn material_by_id(&self, id: i64) -> Option<Material> {
        self.materials().iter().find(|m| m.id == id).cloned()
    }

    pub fn supplier_by_id(&self, id: i64) -> Option<Supplier> {
        self.suppliers().iter().find(|s| s.id == id).cloned()
    }

    pub fn warehouse_by_id(&self, id: i64) -> Option<Warehouse> {
        self.warehouses().iter().find(|w| w.id == id).cloned()
    }

    pub fn has_material(&self, id: i64) -> bool {
        self.materials().iter().any(|m| m.id == id)
    }
}

/// Drops duplicate ids within one snapshot, keeping the first occurrence.
/// Snapshots are keyed by id; a duplicate means the server sent bad data.
fn dedup_by_id<T>(items: Vec<T>, id: impl Fn(&T) -> i64, kind: &str) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let key = id(&item);
        if seen.insert(key) {
            out.push(item);
        } else {
            warn!(kind, id = key, "duplicate id in reference snapshot, keeping first");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(id: i64, name: &str, stock: i64) -> Material {
        Material {
            id,
            name: name.to_string(),
            category: None,
            unit: "pcs".to_string(),
            stock,
        }
    }

    #[test]
    fn replace_is_wholesale() {
        let cache = ReferenceCache::new();
        cache.replace_materials(vec![material(1, "bolts", 10), material(2, "nuts", 5)]);
        assert_eq!(cache.materials().len(), 2);

        cache.replace_materials(vec![material(3, "washers", 7)]);
        let snapshot = cache.materials();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, 3);
        assert!(cache.material_by_id(1).is_none());
    }

    #[test]
    fn snapshot_survives_replacement() {
        let cache = ReferenceCache::new();
        cache.replace_materials(vec![material(1, "bolts", 10)]);
        let before = cache.materials();
        cache.replace_materials(vec![material(2, "nuts", 5)]);
        // The old snapshot is still intact for whoever holds it.
        assert_eq!(before[0].id, 1);
        assert_eq!(cache.materials()[0].id, 2);
    }

    #[test]
    fn find_by_id() {
        let cache = ReferenceCache::new();
        cache.replace_materials(vec![material(1, "bolts", 10), material(2, "nuts", 5)]);
        assert_eq!(cache.material_by_id(2).unwrap().name, "nuts");
        assert!(cache.material_by_id(99).is_none());
        assert!(cache.has_material(1));
        assert!(!cache.has_material(99));
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let cache = ReferenceCache::new();
        cache.replace_materials(vec![material(1, "first", 10), material(1, "second", 5)]);
        let snapshot = cache.materials();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "first");
    }

    #[test]
    fn starts_empty() {
        let cache = ReferenceCache::new();
        assert!(cache.materials().is_empty());
        assert!(cache.suppliers().is_empty());
        assert!(cache.warehouses().is_empty());
    }
}
