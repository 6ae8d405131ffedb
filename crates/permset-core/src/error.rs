//! Core error types for the permission set builder.
//!
//! This module defines the central error type shared by the catalog, dialog
//! and wizard crates. Each subsystem error is represented as a variant so
//! errors propagate cleanly across crate boundaries.

use thiserror::Error;

/// Central error type for all permission set operations.
#[derive(Error, Debug)]
pub enum PermsetError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog errors (definition loading, unknown domains)
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Dialog session errors (no open session, rejected save)
    #[error("dialog error: {0}")]
    Dialog(String),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `PermsetError`.
pub type Result<T> = std::result::Result<T, PermsetError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
