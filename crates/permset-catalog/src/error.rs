//! Error types for the catalog subsystem.

use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Domain not present in the catalog
    #[error("catalog domain not found: {domain}")]
    NotFound {
        /// The domain name that was not found
        domain: String,
    },

    /// Failed to read a catalog file
    #[error("failed to load catalog definition from {path}: {source}")]
    LoadError {
        /// Path to the definition file
        path: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse catalog TOML
    #[error("failed to parse catalog TOML in {path}: {source}")]
    ParseError {
        /// Path to the definition file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Catalog definition failed validation
    #[error("invalid catalog definition for {domain}: {reason}")]
    ValidationError {
        /// Domain being validated
        domain: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Catalog directory not found
    #[error("permission catalog directory not found at {path}")]
    DirectoryNotFound {
        /// Expected directory path
        path: String,
    },

    /// I/O error while accessing catalog files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CatalogError> for permset_core::PermsetError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err.to_string())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
