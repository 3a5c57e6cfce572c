//! Integration test utilities for aniplay
//!
//! Provides a fixture that writes a catalog JSON file to a temporary
//! directory, so tests exercise the full load-validate-open path the demo
//! binary uses.

use anyhow::Result;
use aniplay::Catalog;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture holding a file-backed catalog
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub catalog_path: PathBuf,
}

impl TestFixture {
    /// Write the built-in sample catalog to a temporary JSON file
    pub fn new() -> Result<Self> {
        Self::with_catalog(&Catalog::sample())
    }

    /// Write a specific catalog to a temporary JSON file
    pub fn with_catalog(catalog: &Catalog) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let catalog_path = temp_dir.path().join("catalog.json");
        std::fs::write(&catalog_path, serde_json::to_string_pretty(catalog)?)?;
        Ok(Self {
            temp_dir,
            catalog_path,
        })
    }
}
