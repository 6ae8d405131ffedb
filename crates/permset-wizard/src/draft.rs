//! The permission set being built.
//!
//! Holds everything the wizard steps collect: the "Get started" form, the
//! committed permissions of every domain and the chosen assignees.

use crate::error::{Result, WizardError};
use crate::scope::Scope;
use chrono::{Local, NaiveDate};
use permset_core::{PermissionSetId, WizardConfig};
use permset_dialog::{CommittedStore, DomainSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Longest description the form accepts, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Employee identifier as used by the assignee step.
pub type EmployeeId = u64;

/// Draft of a permission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSetDraft {
    /// Unique identifier
    pub id: PermissionSetId,
    /// Display name
    pub name: String,
    /// Whose data the set applies to
    pub scope: Option<Scope>,
    /// Free-text description
    description: String,
    /// Date the set takes effect
    pub effective_date: NaiveDate,
    assignees: BTreeSet<EmployeeId>,
    permissions: CommittedStore,
}

impl PermissionSetDraft {
    /// Create an empty draft effective today.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: PermissionSetId::generate(),
            name: String::new(),
            scope: None,
            description: String::new(),
            effective_date: Local::now().date_naive(),
            assignees: BTreeSet::new(),
            permissions: CommittedStore::new(),
        }
    }

    /// Create a draft with the configured default scope.
    pub fn from_config(config: &WizardConfig) -> Result<Self> {
        let mut draft = Self::new();
        if let Some(scope) = &config.default_scope {
            draft.scope = Some(scope.parse()?);
        }
        Ok(draft)
    }

    /// Set the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the scope from its option value.
    pub fn set_scope(&mut self, value: &str) -> Result<Scope> {
        let scope: Scope = value.parse()?;
        self.scope = Some(scope);
        Ok(scope)
    }

    /// Description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Set the description; rejected when longer than [`MAX_DESCRIPTION_LEN`].
    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(WizardError::DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LEN,
            });
        }
        self.description = description;
        Ok(())
    }

    /// Set the effective date.
    pub fn set_effective_date(&mut self, date: NaiveDate) {
        self.effective_date = date;
    }

    /// Chosen assignees, ascending.
    #[must_use]
    pub fn assignees(&self) -> &BTreeSet<EmployeeId> {
        &self.assignees
    }

    /// Flip an employee in or out. Returns whether they are now assigned.
    pub fn toggle_assignee(&mut self, employee: EmployeeId) -> bool {
        let assigned = if self.assignees.remove(&employee) {
            false
        } else {
            self.assignees.insert(employee)
        };
        debug!(employee, assigned, "assignee toggled");
        assigned
    }

    /// Committed permissions across all domains.
    #[must_use]
    pub fn permissions(&self) -> &CommittedStore {
        &self.permissions
    }

    /// Mutable access for the dialog commit.
    pub fn permissions_mut(&mut self) -> &mut CommittedStore {
        &mut self.permissions
    }

    /// One line per domain with committed permissions.
    #[must_use]
    pub fn permission_summary(&self) -> Vec<DomainSummary> {
        self.permissions.summary()
    }
}

impl Default for PermissionSetDraft {
    fn default() -> Self {
        Self::new()
    }
}
