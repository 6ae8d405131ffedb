//! Error types for the permission set wizard.

use crate::steps::WizardStep;
use permset_dialog::DialogError;
use thiserror::Error;

/// Errors that can occur while building a permission set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// Breadcrumb jump to a step after the current one
    #[error("cannot jump ahead to {requested} from {current}")]
    StepLocked {
        /// Step that was requested
        requested: WizardStep,
        /// Step the wizard is on
        current: WizardStep,
    },

    /// Scope option value not in the list
    #[error("unknown scope: {0}")]
    UnknownScope(String),

    /// Description longer than the form allows
    #[error("description is {len} characters, at most {max} allowed")]
    DescriptionTooLong {
        /// Length of the rejected description
        len: usize,
        /// Allowed maximum
        max: usize,
    },

    /// Error from the permission dialog
    #[error(transparent)]
    Dialog(#[from] DialogError),
}

impl From<WizardError> for permset_core::PermsetError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Dialog(inner) => inner.into(),
            other => Self::Validation(other.to_string()),
        }
    }
}

/// Result type for wizard operations.
pub type Result<T> = std::result::Result<T, WizardError>;
