//! Catalog loading from TOML files.
//!
//! This module handles loading domain definitions from the `permission-catalog/` directory.

use crate::{
    definition::CatalogDomain,
    error::{CatalogError, Result},
};
use permset_core::AppConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the bundled catalog directory at the workspace root.
pub const DEFAULT_CATALOG_DIR: &str = "permission-catalog";

/// Loader for catalog domain definitions from TOML files.
pub struct CatalogLoader {
    /// Base directory containing catalog files
    catalog_dir: PathBuf,
}

impl CatalogLoader {
    /// Create a new loader with the given catalog directory.
    ///
    /// # Errors
    /// Returns error if the directory doesn't exist.
    pub fn new(catalog_dir: impl Into<PathBuf>) -> Result<Self> {
        let catalog_dir = catalog_dir.into();

        if !catalog_dir.is_dir() {
            return Err(CatalogError::DirectoryNotFound {
                path: catalog_dir.display().to_string(),
            });
        }

        Ok(Self { catalog_dir })
    }

    /// Create a loader using the default catalog directory.
    ///
    /// Looks for `permission-catalog/` relative to the workspace root.
    ///
    /// # Errors
    /// Returns error if the default directory doesn't exist.
    pub fn with_default_dir() -> Result<Self> {
        // Find workspace root by looking for Cargo.toml with [workspace]
        let mut current_dir = std::env::current_dir()?;

        loop {
            let cargo_toml = current_dir.join("Cargo.toml");
            if cargo_toml.exists() {
                if let Ok(contents) = std::fs::read_to_string(&cargo_toml) {
                    if contents.contains("[workspace]") {
                        return Self::new(current_dir.join(DEFAULT_CATALOG_DIR));
                    }
                }
            }

            if let Some(parent) = current_dir.parent() {
                current_dir = parent.to_path_buf();
            } else {
                break;
            }
        }

        Self::new(PathBuf::from(DEFAULT_CATALOG_DIR))
    }

    /// Create a loader from configuration, honouring `catalog.dir` when set.
    ///
    /// # Errors
    /// Returns error if the configured (or default) directory doesn't exist.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.catalog.dir {
            Some(dir) => Self::new(dir.clone()),
            None => Self::with_default_dir(),
        }
    }

    /// The directory this loader reads from.
    #[must_use]
    pub fn catalog_dir(&self) -> &Path {
        &self.catalog_dir
    }

    /// Load all domain definitions from the catalog directory.
    ///
    /// Files are visited in path order so the result is deterministic.
    /// Invalid definitions are logged as warnings and skipped, as are
    /// files repeating a domain name already loaded from an earlier path.
    ///
    /// # Errors
    /// Returns error if the directory can't be read.
    pub fn load_all(&self) -> Result<Vec<CatalogDomain>> {
        let mut paths = Vec::new();
        Self::collect_toml_files(&self.catalog_dir, &mut paths)?;
        paths.sort();

        let mut domains: Vec<CatalogDomain> = Vec::new();
        for path in paths {
            match Self::load_file(&path) {
                Ok(domain) if domains.iter().any(|d| d.name() == domain.name()) => {
                    warn!(
                        path = %path.display(),
                        domain = %domain.name(),
                        "skipping duplicate catalog domain"
                    );
                }
                Ok(domain) => domains.push(domain),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping invalid catalog definition"
                    );
                }
            }
        }

        info!(
            count = domains.len(),
            dir = %self.catalog_dir.display(),
            "loaded permission catalog"
        );

        Ok(domains)
    }

    /// Load and validate a single domain definition file.
    ///
    /// # Errors
    /// Returns error if the file can't be read, parsed or validated.
    pub fn load_file(path: &Path) -> Result<CatalogDomain> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::LoadError {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        let domain: CatalogDomain =
            toml::from_str(&contents).map_err(|e| CatalogError::ParseError {
                path: path.display().to_string(),
                source: e,
            })?;

        domain.validate()?;

        debug!(
            domain = %domain.name(),
            permissions = domain.permissions.len(),
            "loaded catalog domain"
        );

        Ok(domain)
    }

    fn collect_toml_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                Self::collect_toml_files(&path, paths)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }

        Ok(())
    }
}
