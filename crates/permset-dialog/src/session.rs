//! One open-edit-close cycle of the dialog for a single domain.

use crate::{
    expansion::ExpansionState,
    grouping::GroupedView,
    selection::Selection,
    GroupKey, Result, SelectedPermission,
};
use permset_catalog::CatalogDomain;
use permset_core::{AccessLevel, SearchQuery};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// How a session was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// The domain had no committed entries
    Add,
    /// The domain already had committed entries
    Edit,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Edit => f.write_str("edit"),
        }
    }
}

/// Whether two entry lists differ in anything that is persisted.
///
/// Order-independent: both sides are sorted by `(permission, subdomain)`
/// and compared on permission, subdomain, enabled state and access level.
#[must_use]
pub fn changed(current: &[SelectedPermission], initial: &[SelectedPermission]) -> bool {
    if current.len() != initial.len() {
        return true;
    }

    let mut current: Vec<&SelectedPermission> = current.iter().collect();
    let mut initial: Vec<&SelectedPermission> = initial.iter().collect();
    current.sort_by(|a, b| compare_keys(a, b));
    initial.sort_by(|a, b| compare_keys(a, b));

    current.iter().zip(&initial).any(|(a, b)| {
        a.permission != b.permission
            || a.subdomain != b.subdomain
            || a.is_enabled != b.is_enabled
            || a.access_level != b.access_level
    })
}

fn compare_keys(a: &SelectedPermission, b: &SelectedPermission) -> Ordering {
    a.permission
        .cmp(&b.permission)
        .then_with(|| a.subdomain.cmp(&b.subdomain))
        .then_with(|| a.is_enabled.cmp(&b.is_enabled))
        .then_with(|| a.access_level.cmp(&b.access_level))
}

/// The explicit state of one open dialog: selection, expansion, search
/// text and the snapshot taken at open time.
#[derive(Debug, Clone)]
pub struct DialogSession {
    domain: String,
    mode: SessionMode,
    selection: Selection,
    initial: Vec<SelectedPermission>,
    expansion: ExpansionState,
    search: String,
}

impl DialogSession {
    /// Open a session for `domain`.
    ///
    /// `existing` holds the domain's committed entries; the session is in
    /// edit mode iff there are any.
    #[must_use]
    pub fn open(domain: &CatalogDomain, existing: &[SelectedPermission]) -> Self {
        let mode = if existing.is_empty() {
            SessionMode::Add
        } else {
            SessionMode::Edit
        };

        let selection = Selection::seed(domain, existing);
        let expansion = match mode {
            SessionMode::Add => ExpansionState::collapsed(),
            SessionMode::Edit => ExpansionState::for_edit(selection.entries()),
        };

        Self {
            domain: domain.name().to_string(),
            mode,
            initial: selection.entries().to_vec(),
            selection,
            expansion,
            search: String::new(),
        }
    }

    /// Domain name.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Add or edit.
    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Entries as seeded when the session opened.
    #[must_use]
    pub fn initial(&self) -> &[SelectedPermission] {
        &self.initial
    }

    /// Expansion state.
    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Raw search text as typed.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether the selection differs from the snapshot.
    #[must_use]
    pub fn changed(&self) -> bool {
        changed(self.selection.entries(), &self.initial)
    }

    /// Add mode needs one enabled entry; edit mode needs a change.
    #[must_use]
    pub fn is_save_enabled(&self) -> bool {
        match self.mode {
            SessionMode::Add => self.selection.enabled_count() > 0,
            SessionMode::Edit => self.changed(),
        }
    }

    /// Dialog title.
    #[must_use]
    pub fn title(&self) -> String {
        match self.mode {
            SessionMode::Add => format!("Add Permission · {}", self.domain),
            SessionMode::Edit => format!("Edit Permission · {}", self.domain),
        }
    }

    /// Label of the primary action button.
    #[must_use]
    pub fn action_label(&self) -> String {
        match self.mode {
            SessionMode::Edit => "Save".to_string(),
            SessionMode::Add => match self.selection.enabled_count() {
                1 => "Add 1 Permission".to_string(),
                count => format!("Add {count} Permissions"),
            },
        }
    }

    /// Flip one permission.
    pub fn toggle(&mut self, permission: &str, subdomain: Option<&str>) -> bool {
        self.selection.toggle(permission, subdomain)
    }

    /// Pick an access level for one permission.
    pub fn set_access_level(
        &mut self,
        permission: &str,
        subdomain: Option<&str>,
        level: AccessLevel,
    ) -> Result<bool> {
        self.selection.set_access_level(permission, subdomain, level)
    }

    /// Enable a whole group.
    pub fn enable_all(&mut self, group: &GroupKey) -> usize {
        self.selection.enable_all(group)
    }

    /// Disable a whole group.
    pub fn disable_all(&mut self, group: &GroupKey) -> usize {
        self.selection.disable_all(group)
    }

    /// Run a group's enable-all/disable-all button.
    pub fn toggle_all(&mut self, group: &GroupKey) -> bool {
        self.selection.toggle_all(group)
    }

    /// Chevron click on a group header.
    pub fn toggle_group(&mut self, group: &GroupKey) -> bool {
        self.expansion.toggle_group(group)
    }

    /// Replace the search text and let it drive expansion.
    pub fn set_search(&mut self, raw: impl Into<String>) {
        self.search = raw.into();
        let query = SearchQuery::new(&self.search);
        self.expansion
            .observe_search(&query, self.selection.entries());
    }

    /// Grouped, filtered view for rendering.
    #[must_use]
    pub fn view(&self, ungrouped_label: &str) -> GroupedView {
        GroupedView::build(
            &self.selection,
            &SearchQuery::new(&self.search),
            &self.expansion,
            ungrouped_label,
        )
    }

    /// End the session, yielding the enabled entries in catalog order.
    #[must_use]
    pub fn into_enabled(self) -> Vec<SelectedPermission> {
        self.selection.into_enabled()
    }
}
