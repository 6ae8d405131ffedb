//! The committed permission list the dialog reads from and writes to.

use crate::SelectedPermission;
use serde::{Deserialize, Serialize};

/// Owner of the confirmed permissions across all domains.
///
/// The dialog reads a domain's entries when a session opens and replaces
/// them when it commits; nothing else.
pub trait CommittedPermissions {
    /// Committed entries for one domain, in commit order.
    fn get(&self, domain: &str) -> Vec<SelectedPermission>;

    /// Replace every entry of `domain` with `entries`.
    fn replace(&mut self, domain: &str, entries: Vec<SelectedPermission>);
}

/// Per-domain line of the permission summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSummary {
    /// Domain name
    pub domain: String,
    /// Enabled permissions committed for the domain
    pub permission_count: usize,
    /// How many of them are flagged sensitive
    pub sensitive_count: usize,
}

/// In-memory committed permission list.
///
/// Domains keep the position of their first commit when they are edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedStore {
    entries: Vec<SelectedPermission>,
}

impl CommittedStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries across domains.
    #[must_use]
    pub fn entries(&self) -> &[SelectedPermission] {
        &self.entries
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the domain has any committed entry.
    #[must_use]
    pub fn contains_domain(&self, domain: &str) -> bool {
        self.entries.iter().any(|e| e.domain == domain)
    }

    /// Domains with entries, in first-commit order.
    #[must_use]
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !domains.contains(&entry.domain.as_str()) {
                domains.push(&entry.domain);
            }
        }
        domains
    }

    /// The domain cards of the permissions step.
    #[must_use]
    pub fn summary(&self) -> Vec<DomainSummary> {
        self.domains()
            .into_iter()
            .map(|domain| {
                let entries = self.entries.iter().filter(|e| e.domain == domain);
                DomainSummary {
                    domain: domain.to_string(),
                    permission_count: entries.clone().count(),
                    sensitive_count: entries.filter(|e| e.is_sensitive).count(),
                }
            })
            .collect()
    }

    /// Remove a domain. Returns how many entries were dropped.
    pub fn remove_domain(&mut self, domain: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.domain != domain);
        before - self.entries.len()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl CommittedPermissions for CommittedStore {
    fn get(&self, domain: &str) -> Vec<SelectedPermission> {
        self.entries
            .iter()
            .filter(|e| e.domain == domain)
            .cloned()
            .collect()
    }

    fn replace(&mut self, domain: &str, entries: Vec<SelectedPermission>) {
        let position = self
            .entries
            .iter()
            .position(|e| e.domain == domain)
            .unwrap_or(self.entries.len());

        self.entries.retain(|e| e.domain != domain);
        self.entries.splice(position..position, entries);
    }
}
