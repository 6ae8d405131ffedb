//! Permset Wizard - the permission set draft and the steps that fill it.
//!
//! The wizard collects a name, scope, description and effective date on
//! "Get started", per-domain permissions through the permission dialog,
//! assignees, and finally hands the finished draft to the caller.
//!
//! # Example
//!
//! ```rust
//! use permset_catalog::{CatalogDomain, CatalogRegistry};
//! use permset_dialog::DialogAction;
//! use permset_wizard::{PermissionSetWizard, Scope, WizardStep};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let payroll: CatalogDomain = toml::from_str(
//!     r#"
//!     [domain]
//!     name = "Payroll"
//!
//!     [[permissions]]
//!     name = "Run Payroll"
//!     subdomain = "-"
//!     supported_actions = "Yes - No"
//!     "#,
//! )?;
//!
//! let mut wizard = PermissionSetWizard::new(CatalogRegistry::from_domains(vec![payroll])?);
//! wizard.draft_mut().set_name("Payroll admins");
//! assert_eq!(wizard.draft_mut().set_scope("legal-entity")?, Scope::LegalEntity);
//! assert_eq!(wizard.next(), WizardStep::Permissions);
//!
//! wizard.open_domain("Payroll")?;
//! wizard.dispatch(DialogAction::toggle(None, "Run Payroll"))?;
//! wizard.save_dialog()?;
//!
//! let summary = wizard.draft().permission_summary();
//! assert_eq!(summary[0].permission_count, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod draft;
pub mod error;
pub mod scope;
pub mod steps;
pub mod wizard;

pub use draft::{EmployeeId, PermissionSetDraft, MAX_DESCRIPTION_LEN};
pub use error::{Result, WizardError};
pub use scope::Scope;
pub use steps::{StepTracker, WizardStep};
pub use wizard::PermissionSetWizard;
