pub mod catalog_cache;
pub mod csv_catalog_source;
pub mod paths;
pub mod storage;

pub use crate::catalog_cache::CatalogCache;
pub use crate::csv_catalog_source::CsvCatalogSource;
pub use crate::paths::NetmatePaths;
pub use crate::storage::{ConfigStorage, SecretStorage};
