//! Permset Core - Foundation crate for the permission set builder.
//!
//! This crate provides shared types, error handling and configuration
//! management that the catalog, dialog and wizard crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`PermissionSetId`, `AccessLevel`, `SupportedActions`, `SearchQuery`)
//!
//! # Example
//!
//! ```rust
//! use permset_core::{AccessLevel, AppConfig, SupportedActions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.dialog.ungrouped_label, "Other");
//!
//! let actions: SupportedActions = "View - Propose - Edit".parse()?;
//! assert!(actions.supports(AccessLevel::Propose));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, CatalogConfig, DialogConfig, WizardConfig};
pub use error::{ConfigError, ConfigResult, PermsetError, Result};
pub use types::{AccessLevel, PermissionSetId, SearchQuery, SupportedActions};
