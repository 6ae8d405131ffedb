//! Expansion state of the dialog's groups.

use crate::{grouping::group_by_subdomain, GroupKey, SelectedPermission};
use permset_core::SearchQuery;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Which groups are expanded, which the user collapsed by hand, and the
/// last search that drove expansion.
///
/// Groups never touched are collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashMap<GroupKey, bool>,
    manually_collapsed: HashSet<GroupKey>,
    last_search: Option<SearchQuery>,
}

impl ExpansionState {
    /// Every group collapsed, as when adding a domain.
    #[must_use]
    pub fn collapsed() -> Self {
        Self::default()
    }

    /// A group starts expanded iff at least one of its entries is enabled,
    /// as when editing a domain.
    #[must_use]
    pub fn for_edit(entries: &[SelectedPermission]) -> Self {
        let expanded = group_by_subdomain(entries)
            .into_iter()
            .map(|group| {
                let any_enabled = group.entries.iter().any(|e| e.is_enabled);
                (group.key, any_enabled)
            })
            .collect();

        Self {
            expanded,
            ..Self::default()
        }
    }

    /// Whether the group is expanded.
    #[must_use]
    pub fn is_expanded(&self, key: &GroupKey) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }

    /// Whether the user collapsed the group by hand.
    #[must_use]
    pub fn is_manually_collapsed(&self, key: &GroupKey) -> bool {
        self.manually_collapsed.contains(key)
    }

    /// The last search that drove expansion, if one is active.
    #[must_use]
    pub fn last_search(&self) -> Option<&SearchQuery> {
        self.last_search.as_ref()
    }

    /// Chevron click: flip the group. Collapsing an expanded group marks
    /// it manually collapsed; expanding clears the mark.
    ///
    /// Returns the new expanded state.
    pub fn toggle_group(&mut self, key: &GroupKey) -> bool {
        let was_expanded = self.is_expanded(key);
        self.expanded.insert(key.clone(), !was_expanded);

        if was_expanded {
            self.manually_collapsed.insert(key.clone());
        } else {
            self.manually_collapsed.remove(key);
        }

        !was_expanded
    }

    /// React to the current search text.
    ///
    /// Nothing happens unless the normalized query differs from the last
    /// one observed. A query that does not continue the last one (neither
    /// is a prefix of the other) clears the manual marks first. Then every
    /// group with a match expands unless marked, and every group without
    /// one collapses. An empty query only forgets the last search.
    pub fn observe_search(&mut self, query: &SearchQuery, entries: &[SelectedPermission]) {
        if query.is_empty() {
            self.last_search = None;
            return;
        }

        if self.last_search.as_ref() == Some(query) {
            return;
        }

        let continues = self
            .last_search
            .as_ref()
            .is_some_and(|last| query.is_continuation_of(last));
        if !continues {
            self.manually_collapsed.clear();
        }

        for group in group_by_subdomain(entries) {
            let has_match = !group.filtered(query).entries.is_empty();
            if !has_match {
                self.expanded.insert(group.key, false);
            } else if !self.manually_collapsed.contains(&group.key) {
                self.expanded.insert(group.key, true);
            }
        }

        debug!(query = %query, continues, "applied search expansion");
        self.last_search = Some(query.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Selection;
    use permset_catalog::{CatalogDomain, CatalogPermission, DomainMetadata};
    use permset_core::SupportedActions;

    fn entries() -> Vec<SelectedPermission> {
        let permission = |name: &str, subdomain: Option<&str>| CatalogPermission {
            name: name.to_string(),
            subdomain: subdomain.map(str::to_string),
            supported_actions: SupportedActions::YesNo,
            sensitive: false,
            no_scope_limit: false,
            scopable: false,
        };

        let domain = CatalogDomain {
            domain: DomainMetadata {
                name: "Payroll".to_string(),
                order: None,
            },
            permissions: vec![
                permission("Payroll Reports", Some("Reports")),
                permission("Audit Trail", Some("Reports")),
                permission("Payroll Calendar", Some("Settings")),
                permission("Run Payroll", None),
                permission("Bank Details", None),
            ],
        };

        Selection::seed(&domain, &[]).entries().to_vec()
    }

    fn reports() -> GroupKey {
        GroupKey::Named("Reports".to_string())
    }

    fn settings() -> GroupKey {
        GroupKey::Named("Settings".to_string())
    }

    #[test]
    fn test_collapsed_initial() {
        let state = ExpansionState::collapsed();
        assert!(!state.is_expanded(&reports()));
        assert!(!state.is_expanded(&GroupKey::Ungrouped));
        assert!(state.last_search().is_none());
    }

    #[test]
    fn test_for_edit_expands_groups_with_enabled_entries() {
        let mut entries = entries();
        entries[1].is_enabled = true;
        entries[4].is_enabled = true;

        let state = ExpansionState::for_edit(&entries);
        assert!(state.is_expanded(&reports()));
        assert!(!state.is_expanded(&settings()));
        assert!(state.is_expanded(&GroupKey::Ungrouped));
    }

    #[test]
    fn test_toggle_group_marks() {
        let mut state = ExpansionState::collapsed();

        assert!(state.toggle_group(&reports()));
        assert!(!state.is_manually_collapsed(&reports()));

        assert!(!state.toggle_group(&reports()));
        assert!(state.is_manually_collapsed(&reports()));

        assert!(state.toggle_group(&reports()));
        assert!(!state.is_manually_collapsed(&reports()));
    }

    #[test]
    fn test_search_expands_matches_and_collapses_others() {
        let entries = entries();
        let mut state = ExpansionState::for_edit(&entries);
        state.toggle_group(&GroupKey::Ungrouped);

        state.observe_search(&SearchQuery::new("calendar"), &entries);
        assert!(state.is_expanded(&settings()));
        assert!(!state.is_expanded(&reports()));
        assert!(!state.is_expanded(&GroupKey::Ungrouped));
        assert_eq!(state.last_search().map(SearchQuery::as_str), Some("calendar"));
    }

    #[test]
    fn test_manual_collapse_survives_refinement() {
        let entries = entries();
        let mut state = ExpansionState::collapsed();

        state.observe_search(&SearchQuery::new("pay"), &entries);
        assert!(state.is_expanded(&reports()));
        assert!(state.is_expanded(&settings()));

        state.toggle_group(&settings());
        state.observe_search(&SearchQuery::new("payr"), &entries);
        assert!(state.is_expanded(&reports()));
        assert!(!state.is_expanded(&settings()));

        // Deleting back stays the same search
        state.observe_search(&SearchQuery::new("pay"), &entries);
        assert!(!state.is_expanded(&settings()));
    }

    #[test]
    fn test_new_search_clears_manual_marks() {
        let entries = entries();
        let mut state = ExpansionState::collapsed();

        state.observe_search(&SearchQuery::new("pay"), &entries);
        state.toggle_group(&settings());
        assert!(state.is_manually_collapsed(&settings()));

        state.observe_search(&SearchQuery::new("calendar"), &entries);
        assert!(!state.is_manually_collapsed(&settings()));
        assert!(state.is_expanded(&settings()));
    }

    #[test]
    fn test_same_search_is_not_reapplied() {
        let entries = entries();
        let mut state = ExpansionState::collapsed();

        state.observe_search(&SearchQuery::new("pay"), &entries);
        // A collapse the user undid by hand is not fought
        state.toggle_group(&reports());
        state.toggle_group(&reports());
        state.toggle_group(&settings());
        state.observe_search(&SearchQuery::new(" PAY "), &entries);

        assert!(state.is_expanded(&reports()));
        assert!(!state.is_expanded(&settings()));
    }

    #[test]
    fn test_empty_search_keeps_expansion() {
        let entries = entries();
        let mut state = ExpansionState::collapsed();

        state.observe_search(&SearchQuery::new("audit"), &entries);
        assert!(state.is_expanded(&reports()));

        state.observe_search(&SearchQuery::new(""), &entries);
        assert!(state.is_expanded(&reports()));
        assert!(!state.is_expanded(&settings()));
        assert!(state.last_search().is_none());
    }

    #[test]
    fn test_search_after_clear_is_fresh() {
        let entries = entries();
        let mut state = ExpansionState::collapsed();

        state.observe_search(&SearchQuery::new("pay"), &entries);
        state.toggle_group(&settings());
        state.observe_search(&SearchQuery::new(""), &entries);

        state.observe_search(&SearchQuery::new("pay"), &entries);
        assert!(state.is_expanded(&settings()));
    }

    #[test]
    fn test_search_with_no_entries() {
        let mut state = ExpansionState::collapsed();
        state.observe_search(&SearchQuery::new("pay"), &[]);
        assert_eq!(state.last_search().map(SearchQuery::as_str), Some("pay"));
    }
}
