//! Catalog definition types.
//!
//! One TOML file describes one domain and its ordered list of permissions.

use crate::error::{CatalogError, Result};
use permset_core::{SearchQuery, SupportedActions};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Subdomain value catalog files use for "no subdomain".
pub const SUBDOMAIN_SENTINEL: &str = "-";

/// A domain of the permission catalog, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDomain {
    /// Domain metadata
    pub domain: DomainMetadata,

    /// Permissions in catalog order
    #[serde(default)]
    pub permissions: Vec<CatalogPermission>,
}

impl CatalogDomain {
    /// Get the domain name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.domain.name
    }

    /// Get the permissions in catalog order.
    #[must_use]
    pub fn permissions(&self) -> &[CatalogPermission] {
        &self.permissions
    }

    /// Subdomains in order of first appearance. Ungrouped permissions are
    /// not represented.
    #[must_use]
    pub fn subdomains(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.permissions
            .iter()
            .filter_map(|p| p.subdomain.as_deref())
            .filter(|sub| seen.insert(*sub))
            .collect()
    }

    /// Domain picker match: the domain name, or any permission or subdomain
    /// name contains the query. An empty query matches every domain.
    #[must_use]
    pub fn matches(&self, query: &SearchQuery) -> bool {
        query.is_empty()
            || query.matches(&self.domain.name)
            || self.permissions.iter().any(|p| p.matches(query))
    }

    /// Validate the domain definition for completeness and correctness.
    ///
    /// Permission names must be unique within their subdomain; this is the
    /// key a dialog session addresses entries by.
    pub fn validate(&self) -> Result<()> {
        if self.domain.name.trim().is_empty() {
            return Err(CatalogError::ValidationError {
                domain: self.domain.name.clone(),
                reason: "domain name cannot be empty".to_string(),
            });
        }

        let mut keys = HashSet::new();
        for permission in &self.permissions {
            if permission.name.trim().is_empty() {
                return Err(CatalogError::ValidationError {
                    domain: self.domain.name.clone(),
                    reason: "permission name cannot be empty".to_string(),
                });
            }

            if !keys.insert((permission.subdomain.as_deref(), permission.name.as_str())) {
                return Err(CatalogError::ValidationError {
                    domain: self.domain.name.clone(),
                    reason: format!(
                        "duplicate permission '{}' in subdomain '{}'",
                        permission.name,
                        permission.subdomain.as_deref().unwrap_or(SUBDOMAIN_SENTINEL)
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Domain metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainMetadata {
    /// Human-readable domain name (e.g., "Payroll")
    pub name: String,

    /// Position in the domain picker; unordered domains come last
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// A single permission in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPermission {
    /// Permission name, unique within its subdomain
    pub name: String,

    /// Subdomain the permission is grouped under, if any
    #[serde(
        default,
        deserialize_with = "deserialize_subdomain",
        skip_serializing_if = "Option::is_none"
    )]
    pub subdomain: Option<String>,

    /// Access controls the permission supports
    pub supported_actions: SupportedActions,

    /// Whether the permission exposes sensitive data
    #[serde(default)]
    pub sensitive: bool,

    /// Whether the permission ignores the permission set's scope
    #[serde(default)]
    pub no_scope_limit: bool,

    /// Whether the permission can be limited to a scope today
    #[serde(default)]
    pub scopable: bool,
}

impl CatalogPermission {
    /// Permission or subdomain name contains the query.
    #[must_use]
    pub fn matches(&self, query: &SearchQuery) -> bool {
        query.matches(&self.name)
            || self
                .subdomain
                .as_deref()
                .is_some_and(|sub| query.matches(sub))
    }
}

fn deserialize_subdomain<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && s != SUBDOMAIN_SENTINEL))
}
