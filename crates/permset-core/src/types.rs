//! Shared types used across the permission set builder.
//!
//! This module defines the newtypes and enums that every other crate
//! speaks: permission set identifiers, access levels, the closed set of
//! supported actions, and normalized search queries.

use crate::error::PermsetError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Newtype for permission set identifiers with validation.
///
/// Permission set IDs must be valid UUIDs (v4 format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct PermissionSetId(String);

impl PermissionSetId {
    /// Create a new `PermissionSetId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID is not a valid UUID v4.
    pub fn new(id: impl Into<String>) -> Result<Self, PermsetError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a new random `PermissionSetId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), PermsetError> {
        static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = UUID_REGEX.get_or_init(|| {
            Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
                .expect("valid regex")
        });

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(PermsetError::Validation(format!(
                "invalid permission set ID: must be a valid UUID v4, got '{id}'"
            )))
        }
    }
}

impl TryFrom<String> for PermissionSetId {
    type Error = PermsetError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl fmt::Display for PermissionSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Access level granted for an enabled permission.
///
/// Levels are ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AccessLevel {
    /// Read-only access
    View,
    /// May propose changes that someone else approves
    Propose,
    /// Full edit access
    Edit,
}

impl AccessLevel {
    /// All access levels in display order.
    pub const ALL: [AccessLevel; 3] = [Self::View, Self::Propose, Self::Edit];

    /// Get the display label for this level.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Propose => "Propose",
            Self::Edit => "Edit",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccessLevel {
    type Err = PermsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "propose" => Ok(Self::Propose),
            "edit" => Ok(Self::Edit),
            other => Err(PermsetError::Validation(format!(
                "unknown access level '{other}'"
            ))),
        }
    }
}

/// The access controls a catalog permission supports.
///
/// The catalog spells these as descriptor strings (`"View - Propose - Edit"`,
/// `"View-Edit"`, `"View only"`, `"Yes - No"`). They are parsed once when the
/// catalog is loaded and never re-parsed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SupportedActions {
    /// A plain on/off switch with no access level control
    YesNo,
    /// View only
    ViewOnly,
    /// Edit only
    EditOnly,
    /// View or edit
    ViewEdit,
    /// View, propose or edit
    ViewProposeEdit,
}

impl SupportedActions {
    /// The access levels this permission can be granted at, in order.
    ///
    /// `YesNo` yields an empty slice: no access level control is shown.
    #[must_use]
    pub fn levels(self) -> &'static [AccessLevel] {
        match self {
            Self::YesNo => &[],
            Self::ViewOnly => &[AccessLevel::View],
            Self::EditOnly => &[AccessLevel::Edit],
            Self::ViewEdit => &[AccessLevel::View, AccessLevel::Edit],
            Self::ViewProposeEdit => &[AccessLevel::View, AccessLevel::Propose, AccessLevel::Edit],
        }
    }

    /// Whether `level` is one of the supported levels.
    #[must_use]
    pub fn supports(self, level: AccessLevel) -> bool {
        self.levels().contains(&level)
    }

    /// Level a freshly seeded permission starts at: `View` when supported.
    #[must_use]
    pub fn default_level(self) -> Option<AccessLevel> {
        self.supports(AccessLevel::View).then_some(AccessLevel::View)
    }

    /// Whether the level selector should be offered at all.
    ///
    /// A selector with a single option is not worth showing.
    #[must_use]
    pub fn has_level_choice(self) -> bool {
        self.levels().len() > 1
    }

    /// Canonical descriptor string.
    #[must_use]
    pub fn descriptor(self) -> &'static str {
        match self {
            Self::YesNo => "Yes - No",
            Self::ViewOnly => "View only",
            Self::EditOnly => "Edit only",
            Self::ViewEdit => "View - Edit",
            Self::ViewProposeEdit => "View - Propose - Edit",
        }
    }
}

impl fmt::Display for SupportedActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor())
    }
}

impl FromStr for SupportedActions {
    type Err = PermsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| c == '-' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .collect();

        match tokens.as_slice() {
            ["yes", "no"] => Ok(Self::YesNo),
            ["view", "only"] | ["view"] => Ok(Self::ViewOnly),
            ["edit", "only"] | ["edit"] => Ok(Self::EditOnly),
            ["view", "edit"] => Ok(Self::ViewEdit),
            ["view", "propose", "edit"] => Ok(Self::ViewProposeEdit),
            _ => Err(PermsetError::Validation(format!(
                "unknown supported actions descriptor '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for SupportedActions {
    type Error = PermsetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SupportedActions> for String {
    fn from(actions: SupportedActions) -> Self {
        actions.descriptor().to_string()
    }
}

/// A search string normalized for case-insensitive substring matching.
///
/// Normalization trims surrounding whitespace and lower-cases the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalize raw user input into a query.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// Whether the query matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The normalized text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive substring test. An empty query matches anything.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.is_empty() || text.to_lowercase().contains(&self.0)
    }

    /// Whether this query refines or relaxes `previous` (one is a prefix of
    /// the other), as happens while typing into or deleting from one search.
    #[must_use]
    pub fn is_continuation_of(&self, previous: &SearchQuery) -> bool {
        self.0.starts_with(&previous.0) || previous.0.starts_with(&self.0)
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
