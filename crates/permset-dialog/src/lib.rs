//! Permset Dialog - the permission-selection state machine behind the
//! "Add/Edit Permission" dialog.
//!
//! A dialog session covers one domain of the permission catalog. It seeds a
//! selection from the catalog (merging previously committed entries when
//! editing), lets the user toggle permissions, pick access levels and search,
//! and finally commits the enabled entries back to the wizard.
//!
//! # Example
//!
//! ```rust
//! use permset_catalog::{CatalogDomain, CatalogRegistry};
//! use permset_dialog::{CommittedStore, DialogAction, DialogController, SessionMode};
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
//! let mut committed = CommittedStore::new();
//! let mut dialog = DialogController::new(CatalogRegistry::from_domains(vec![payroll])?);
//!
//! assert_eq!(dialog.open("Payroll", &committed)?, SessionMode::Add);
//! dialog.dispatch(DialogAction::toggle(Some("Payslips"), "View Payslips"))?;
//! assert_eq!(dialog.action_label().as_deref(), Some("Add 1 Permission"));
//!
//! dialog.save(&mut committed)?;
//! assert_eq!(committed.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod committed;
mod controller;
mod expansion;
mod grouping;
mod selection;
mod session;

pub use committed::{CommittedPermissions, CommittedStore, DomainSummary};
pub use controller::{DialogAction, DialogController};
pub use expansion::ExpansionState;
pub use grouping::{
    group_by_subdomain, EntryView, GroupView, GroupedView, Highlighted, PermissionGroup,
};
pub use selection::{Selection, ToggleAllLabel};
pub use session::{changed, DialogSession, SessionMode};

use permset_catalog::{CatalogPermission, SUBDOMAIN_SENTINEL};
use permset_core::{AccessLevel, PermsetError, SupportedActions};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during dialog operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    /// The requested domain is not in the catalog
    #[error("unknown domain: {0}")]
    UnknownDomain(String),

    /// An operation needed an open dialog session
    #[error("no permission dialog is open")]
    NotOpen,

    /// The access level is not one the permission supports
    #[error("access level {level} is not supported by '{permission}' ({supported})")]
    UnsupportedAccessLevel {
        /// Permission name
        permission: String,
        /// Rejected level
        level: AccessLevel,
        /// What the permission does support
        supported: SupportedActions,
    },

    /// Save was requested while the save action is disabled
    #[error("nothing to save for domain {domain}")]
    NothingToSave {
        /// Domain of the open session
        domain: String,
    },
}

impl From<DialogError> for PermsetError {
    fn from(err: DialogError) -> Self {
        Self::Dialog(err.to_string())
    }
}

/// Result type for dialog operations.
pub type Result<T> = std::result::Result<T, DialogError>;

/// One permission's selection state within a domain session.
///
/// Catalog-derived fields (`is_sensitive`, `no_scope_limit`, `is_scopable`,
/// `supported_actions`) are copied at seed time and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPermission {
    /// Domain the permission belongs to
    pub domain: String,

    /// Subdomain, `None` for ungrouped permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdomain: Option<String>,

    /// Permission name, unique within `(domain, subdomain)`
    pub permission: String,

    /// Whether the permission is granted
    pub is_enabled: bool,

    /// Chosen access level; kept while disabled so re-enabling restores it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<AccessLevel>,

    /// Whether the permission exposes sensitive data
    #[serde(default)]
    pub is_sensitive: bool,

    /// Whether the permission ignores the permission set's scope
    #[serde(default)]
    pub no_scope_limit: bool,

    /// Whether the permission can be limited to a scope
    #[serde(default)]
    pub is_scopable: bool,

    /// Access levels the permission can be granted at
    pub supported_actions: SupportedActions,
}

impl SelectedPermission {
    /// A disabled entry for a catalog permission, at its default level.
    #[must_use]
    pub fn from_catalog(domain: &str, permission: &CatalogPermission) -> Self {
        Self {
            domain: domain.to_string(),
            subdomain: permission.subdomain.clone(),
            permission: permission.name.clone(),
            is_enabled: false,
            access_level: permission.supported_actions.default_level(),
            is_sensitive: permission.sensitive,
            no_scope_limit: permission.no_scope_limit,
            is_scopable: permission.scopable,
            supported_actions: permission.supported_actions,
        }
    }

    /// Whether this entry is addressed by `(subdomain, permission)`.
    #[must_use]
    pub fn is_key(&self, subdomain: Option<&str>, permission: &str) -> bool {
        self.subdomain.as_deref() == subdomain && self.permission == permission
    }

    /// The group this entry renders under.
    #[must_use]
    pub fn group_key(&self) -> GroupKey {
        GroupKey::for_subdomain(self.subdomain.as_deref())
    }

    /// The access level that counts: only while enabled.
    #[must_use]
    pub fn effective_access_level(&self) -> Option<AccessLevel> {
        if self.is_enabled {
            self.access_level
        } else {
            None
        }
    }

    /// Subdomain as shown at the presentation boundary.
    #[must_use]
    pub fn subdomain_label(&self) -> &str {
        self.subdomain.as_deref().unwrap_or(SUBDOMAIN_SENTINEL)
    }
}

/// Identifies a group of permissions in the dialog.
///
/// All permissions without a subdomain share the single `Ungrouped` group,
/// which renders after the named groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    /// A subdomain group
    Named(String),
    /// The synthetic group of ungrouped permissions
    Ungrouped,
}

impl GroupKey {
    /// Group key for an optional subdomain.
    #[must_use]
    pub fn for_subdomain(subdomain: Option<&str>) -> Self {
        match subdomain {
            Some(name) => Self::Named(name.to_string()),
            None => Self::Ungrouped,
        }
    }

    /// Whether an entry belongs to this group.
    #[must_use]
    pub fn contains(&self, entry: &SelectedPermission) -> bool {
        match self {
            Self::Named(name) => entry.subdomain.as_deref() == Some(name.as_str()),
            Self::Ungrouped => entry.subdomain.is_none(),
        }
    }

    /// The subdomain name, `None` for the ungrouped group.
    #[must_use]
    pub fn subdomain(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Ungrouped => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Ungrouped => f.write_str(SUBDOMAIN_SENTINEL),
        }
    }
}
