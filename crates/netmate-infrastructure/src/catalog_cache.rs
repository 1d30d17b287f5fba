//! Load-once catalog cache.

use netmate_core::catalog::{Catalog, CatalogSource};
use netmate_core::error::Result;
use once_cell::sync::OnceCell;

/// Wraps a [`CatalogSource`] so it is read at most once successfully.
///
/// A failed load is not cached; the next call tries the source again.
pub struct CatalogCache<S> {
    source: S,
    catalog: OnceCell<Catalog>,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            catalog: OnceCell::new(),
        }
    }

    /// Returns the cached catalog, loading it on first use.
    pub fn get(&self) -> Result<Catalog> {
        self.catalog
            .get_or_try_init(|| self.source.load())
            .cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }
}
