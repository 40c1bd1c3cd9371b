use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{DataUnavailable, RegionCatalog};

/// Session cache for loaded catalogs, keyed by source identity.
///
/// A catalog is immutable once cached and shared read-only across any number
/// of pipeline runs. Invalidation happens only on explicit source change;
/// there is no expiry.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entries: HashMap<String, Arc<RegionCatalog>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<RegionCatalog>> {
        self.entries.get(key).cloned()
    }

    /// Return the cached catalog for `key`, or build one with `load` and
    /// cache it. `load` runs only on a miss.
    pub fn get_or_load_with(
        &mut self,
        key: &str,
        load: impl FnOnce() -> Result<RegionCatalog, DataUnavailable>,
    ) -> Result<Arc<RegionCatalog>, DataUnavailable> {
        if let Some(catalog) = self.entries.get(key) {
            log::debug!("catalog cache hit for {key}");
            return Ok(Arc::clone(catalog));
        }
        log::debug!("catalog cache miss for {key}");
        let catalog = Arc::new(load()?);
        self.entries.insert(key.to_string(), Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Insert a pre-built catalog (e.g. one relocated after load).
    pub fn insert(&mut self, key: impl Into<String>, catalog: RegionCatalog) -> Arc<RegionCatalog> {
        let catalog = Arc::new(catalog);
        self.entries.insert(key.into(), Arc::clone(&catalog));
        catalog
    }

    /// Drop the entry for `key`, forcing the next access to reload.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
