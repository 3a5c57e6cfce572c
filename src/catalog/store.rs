//! JSON-backed catalog loading
//!
//! Catalogs are plain JSON files in the camelCase shape of [`Catalog`].
//! Loading validates the catalog invariants before handing it out; the
//! player only ever sees a catalog with at least one track per episode.

use crate::catalog::Catalog;
use crate::utils::error::{IntoPlayerError, Result};
use log::info;
use std::path::Path;

/// Loader for file-backed catalogs
pub struct CatalogStore;

impl CatalogStore {
    /// Load and validate a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Catalog> {
        let data = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&data).catalog_err("Parsing catalog")?;
        catalog.validate()?;

        info!(
            "Loaded catalog from {:?}: {} series",
            path,
            catalog.series.len()
        );
        Ok(catalog)
    }
}
