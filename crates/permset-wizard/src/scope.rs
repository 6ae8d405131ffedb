//! Default data scope of a permission set.

use crate::error::WizardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whose data the permission set's holders can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Everyone except the holder
    EveryoneButSelf,
    /// Only the holder
    #[serde(rename = "self")]
    OnlySelf,
    /// The holder's direct reports
    DirectReports,
    /// Reports of the holder's reports
    IndirectReports,
    /// The holder's full reporting line
    ReportingLine,
    /// Everyone in the holder's legal entity
    LegalEntity,
    /// Everyone in the holder's department
    Department,
    /// Everyone in the holder's team
    Team,
    /// Everyone at the holder's workplace
    Workplace,
    /// Everyone in the holder's country
    Country,
    /// Conditions configured elsewhere
    Custom,
}

impl Scope {
    /// All scopes in the order the picker lists them.
    pub const ALL: [Scope; 11] = [
        Self::EveryoneButSelf,
        Self::OnlySelf,
        Self::DirectReports,
        Self::IndirectReports,
        Self::ReportingLine,
        Self::LegalEntity,
        Self::Department,
        Self::Team,
        Self::Workplace,
        Self::Country,
        Self::Custom,
    ];

    /// The option value, as stored in configuration.
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::EveryoneButSelf => "everyone-but-self",
            Self::OnlySelf => "self",
            Self::DirectReports => "direct-reports",
            Self::IndirectReports => "indirect-reports",
            Self::ReportingLine => "reporting-line",
            Self::LegalEntity => "legal-entity",
            Self::Department => "department",
            Self::Team => "team",
            Self::Workplace => "workplace",
            Self::Country => "country",
            Self::Custom => "custom",
        }
    }

    /// The picker label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EveryoneButSelf => "Everyone but self",
            Self::OnlySelf => "Self",
            Self::DirectReports => "Direct reports",
            Self::IndirectReports => "Indirect reports",
            Self::ReportingLine => "Reporting line",
            Self::LegalEntity => "Legal entity",
            Self::Department => "Department",
            Self::Team => "Team",
            Self::Workplace => "Workplace",
            Self::Country => "Country",
            Self::Custom => "Custom conditions...",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scope {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|scope| scope.value().eq_ignore_ascii_case(value))
            .ok_or_else(|| WizardError::UnknownScope(value.to_string()))
    }
}
