//! Selection model: enabled state and access levels for one domain.

use crate::{DialogError, GroupKey, Result, SelectedPermission};
use permset_catalog::CatalogDomain;
use permset_core::AccessLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Label of a group's enable-all/disable-all action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAllLabel {
    /// Not every entry is enabled
    EnableAll,
    /// Every entry is enabled
    DisableAll,
}

impl ToggleAllLabel {
    /// Display text.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EnableAll => "Enable all",
            Self::DisableAll => "Disable all",
        }
    }
}

impl fmt::Display for ToggleAllLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The working set of a dialog session, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectedPermission>,
}

impl Selection {
    /// Build one entry per catalog permission.
    ///
    /// State comes from `existing` when it holds the same
    /// `(subdomain, permission)`; otherwise the entry starts disabled at the
    /// permission's default level. A carried-over level the catalog no
    /// longer supports falls back to the default.
    #[must_use]
    pub fn seed(domain: &CatalogDomain, existing: &[SelectedPermission]) -> Self {
        let entries = domain
            .permissions()
            .iter()
            .map(|permission| {
                let mut entry = SelectedPermission::from_catalog(domain.name(), permission);

                if let Some(prior) = existing
                    .iter()
                    .find(|e| e.is_key(entry.subdomain.as_deref(), &entry.permission))
                {
                    entry.is_enabled = prior.is_enabled;
                    if let Some(level) = prior.access_level {
                        if entry.supported_actions.supports(level) {
                            entry.access_level = Some(level);
                        }
                    }
                }

                entry
            })
            .collect();

        Self { entries }
    }

    /// Wrap entries that are already seeded.
    #[must_use]
    pub fn from_entries(entries: Vec<SelectedPermission>) -> Self {
        Self { entries }
    }

    /// All entries in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[SelectedPermission] {
        &self.entries
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, permission: &str, subdomain: Option<&str>) -> Option<&SelectedPermission> {
        self.entries.iter().find(|e| e.is_key(subdomain, permission))
    }

    fn get_mut(&mut self, permission: &str, subdomain: Option<&str>) -> Option<&mut SelectedPermission> {
        self.entries
            .iter_mut()
            .find(|e| e.is_key(subdomain, permission))
    }

    /// Flip `is_enabled` for one entry. Returns false when no entry has the
    /// key.
    pub fn toggle(&mut self, permission: &str, subdomain: Option<&str>) -> bool {
        if let Some(entry) = self.get_mut(permission, subdomain) {
            entry.is_enabled = !entry.is_enabled;
            true
        } else {
            debug!(permission, ?subdomain, "ignoring toggle for unknown permission");
            false
        }
    }

    /// Set the access level of one entry.
    ///
    /// Returns `Ok(false)` when no entry has the key. A level the entry
    /// does not support is rejected and the entry is left unchanged.
    pub fn set_access_level(
        &mut self,
        permission: &str,
        subdomain: Option<&str>,
        level: AccessLevel,
    ) -> Result<bool> {
        let Some(entry) = self.get_mut(permission, subdomain) else {
            debug!(permission, ?subdomain, "ignoring access level for unknown permission");
            return Ok(false);
        };

        if !entry.supported_actions.supports(level) {
            warn!(
                permission,
                %level,
                supported = %entry.supported_actions,
                "rejected unsupported access level"
            );
            return Err(DialogError::UnsupportedAccessLevel {
                permission: entry.permission.clone(),
                level,
                supported: entry.supported_actions,
            });
        }

        entry.access_level = Some(level);
        Ok(true)
    }

    /// Enable every entry in the group. Returns how many entries changed.
    pub fn enable_all(&mut self, group: &GroupKey) -> usize {
        self.set_group(group, true)
    }

    /// Disable every entry in the group. Returns how many entries changed.
    pub fn disable_all(&mut self, group: &GroupKey) -> usize {
        self.set_group(group, false)
    }

    /// Perform the group's current toggle-all action.
    ///
    /// Returns the enabled state the group was set to.
    pub fn toggle_all(&mut self, group: &GroupKey) -> bool {
        let enable = self.toggle_all_label(group) == ToggleAllLabel::EnableAll;
        self.set_group(group, enable);
        enable
    }

    /// "Disable all" when every entry of the group is enabled, else
    /// "Enable all". Partially enabled groups count as not enabled.
    #[must_use]
    pub fn toggle_all_label(&self, group: &GroupKey) -> ToggleAllLabel {
        if self.group_entries(group).all(|e| e.is_enabled) {
            ToggleAllLabel::DisableAll
        } else {
            ToggleAllLabel::EnableAll
        }
    }

    /// Entries of one group in catalog order.
    pub fn group_entries<'a>(
        &'a self,
        group: &'a GroupKey,
    ) -> impl Iterator<Item = &'a SelectedPermission> + 'a {
        self.entries.iter().filter(move |e| group.contains(e))
    }

    /// Enabled entries in catalog order.
    pub fn enabled(&self) -> impl Iterator<Item = &SelectedPermission> {
        self.entries.iter().filter(|e| e.is_enabled)
    }

    /// Number of enabled entries.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    /// Consume the selection, keeping only enabled entries.
    #[must_use]
    pub fn into_enabled(self) -> Vec<SelectedPermission> {
        self.entries.into_iter().filter(|e| e.is_enabled).collect()
    }

    fn set_group(&mut self, group: &GroupKey, enabled: bool) -> usize {
        let mut changed = 0;
        for entry in self.entries.iter_mut().filter(|e| group.contains(e)) {
            if entry.is_enabled != enabled {
                entry.is_enabled = enabled;
                changed += 1;
            }
        }
        changed
    }
}
