//! Wizard step progression.

use crate::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A step of the permission set wizard, in order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Name, scope and description
    #[default]
    GetStarted,
    /// Permission selection per domain
    Permissions,
    /// Employee selection
    Assignees,
    /// Review before creating
    Confirm,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [WizardStep; 4] = [
        Self::GetStarted,
        Self::Permissions,
        Self::Assignees,
        Self::Confirm,
    ];

    /// Breadcrumb label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::GetStarted => "Get started",
            Self::Permissions => "Permissions",
            Self::Assignees => "Assignees",
            Self::Confirm => "Confirm",
        }
    }

    /// Zero-based position.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The following step; `Confirm` stays put.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL
            .get(self.index() + 1)
            .copied()
            .unwrap_or(self)
    }

    /// The preceding step; `GetStarted` stays put.
    #[must_use]
    pub fn back(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(self)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the user is in the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTracker {
    current: WizardStep,
}

impl StepTracker {
    /// Start at the first step.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub fn current(&self) -> WizardStep {
        self.current
    }

    /// Advance one step. Returns the new step.
    pub fn next(&mut self) -> WizardStep {
        self.current = self.current.next();
        debug!(step = %self.current, "wizard advanced");
        self.current
    }

    /// Go back one step. Returns the new step.
    pub fn back(&mut self) -> WizardStep {
        self.current = self.current.back();
        debug!(step = %self.current, "wizard went back");
        self.current
    }

    /// Breadcrumb click: only the current or an earlier step is reachable.
    pub fn jump_to(&mut self, step: WizardStep) -> Result<()> {
        if step > self.current {
            return Err(WizardError::StepLocked {
                requested: step,
                current: self.current,
            });
        }
        self.current = step;
        Ok(())
    }

    /// Steps with whether each breadcrumb is clickable.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<(WizardStep, bool)> {
        WizardStep::ALL
            .into_iter()
            .map(|step| (step, step <= self.current))
            .collect()
    }
}
