//! Permset Catalog - read-only permission catalog for the permission set wizard.
//!
//! The catalog lists every grantable permission, grouped by domain and
//! optionally by subdomain. Each domain lives in its own TOML file under
//! `permission-catalog/`.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): domain and permission records
//! - **Loader** ([`loader`]): TOML file loading from the catalog directory
//! - **Registry** ([`registry`]): ordered in-memory cache with picker search
//! - **Errors** ([`error`]): catalog error types
//!
//! # Example
//!
//! ```rust
//! use permset_catalog::{CatalogDomain, CatalogRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payroll: CatalogDomain = toml::from_str(
//!     r#"
//!     [domain]
//!     name = "Payroll"
//!
//!     [[permissions]]
//!     name = "View Payslips"
//!     subdomain = "Payslips"
//!     supported_actions = "View only"
//!     "#,
//! )?;
//!
//! let registry = CatalogRegistry::from_domains(vec![payroll])?;
//! let hits = registry.search("payslip");
//! assert_eq!(hits[0].name(), "Payroll");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod definition;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use definition::{CatalogDomain, CatalogPermission, DomainMetadata, SUBDOMAIN_SENTINEL};
pub use error::{CatalogError, Result};
pub use loader::{CatalogLoader, DEFAULT_CATALOG_DIR};
pub use registry::CatalogRegistry;
