//! Grouping and filtering of a session's entries into the rendered view.
//!
//! Everything here is a pure derivation, rebuilt from scratch for every
//! render.

use crate::{
    expansion::ExpansionState,
    selection::{Selection, ToggleAllLabel},
    GroupKey, SelectedPermission,
};
use permset_core::{AccessLevel, SearchQuery, SupportedActions};
use serde::Serialize;

/// Entries of one group, borrowed from the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroup<'a> {
    /// Group key
    pub key: GroupKey,
    /// Entries in catalog order
    pub entries: Vec<&'a SelectedPermission>,
}

impl<'a> PermissionGroup<'a> {
    /// Keep only entries matching the query; subdomain matches keep the
    /// whole group.
    #[must_use]
    pub fn filtered(&self, query: &SearchQuery) -> PermissionGroup<'a> {
        PermissionGroup {
            key: self.key.clone(),
            entries: self
                .entries
                .iter()
                .copied()
                .filter(|entry| entry_matches(entry, query))
                .collect(),
        }
    }
}

/// Group entries by subdomain.
///
/// Named groups come first in order of first appearance, followed by the
/// ungrouped group when any entry lacks a subdomain.
#[must_use]
pub fn group_by_subdomain(entries: &[SelectedPermission]) -> Vec<PermissionGroup<'_>> {
    let mut groups: Vec<PermissionGroup<'_>> = Vec::new();
    let mut ungrouped = Vec::new();

    for entry in entries {
        match entry.subdomain.as_deref() {
            None => ungrouped.push(entry),
            Some(subdomain) => {
                if let Some(group) = groups
                    .iter_mut()
                    .find(|g| g.key.subdomain() == Some(subdomain))
                {
                    group.entries.push(entry);
                } else {
                    groups.push(PermissionGroup {
                        key: GroupKey::Named(subdomain.to_string()),
                        entries: vec![entry],
                    });
                }
            }
        }
    }

    if !ungrouped.is_empty() {
        groups.push(PermissionGroup {
            key: GroupKey::Ungrouped,
            entries: ungrouped,
        });
    }

    groups
}

fn entry_matches(entry: &SelectedPermission, query: &SearchQuery) -> bool {
    query.matches(&entry.permission)
        || entry
            .subdomain
            .as_deref()
            .is_some_and(|subdomain| query.matches(subdomain))
}

/// A rendered permission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryView {
    /// Subdomain, `"-"` for ungrouped entries
    pub subdomain: String,
    /// Permission name
    pub permission: String,
    /// Whether the switch is on
    pub is_enabled: bool,
    /// Level shown in the selector, kept while disabled
    pub access_level: Option<AccessLevel>,
    /// Selectable levels, empty for plain on/off permissions
    pub levels: Vec<AccessLevel>,
    /// Whether to show a level selector at all
    pub has_level_choice: bool,
    /// Supported actions descriptor
    pub supported_actions: SupportedActions,
    /// Sensitive data flag
    pub is_sensitive: bool,
    /// No scope limit flag
    pub no_scope_limit: bool,
    /// Scopable flag
    pub is_scopable: bool,
}

impl From<&SelectedPermission> for EntryView {
    fn from(entry: &SelectedPermission) -> Self {
        Self {
            subdomain: entry.subdomain_label().to_string(),
            permission: entry.permission.clone(),
            is_enabled: entry.is_enabled,
            access_level: entry.access_level,
            levels: entry.supported_actions.levels().to_vec(),
            has_level_choice: entry.supported_actions.has_level_choice(),
            supported_actions: entry.supported_actions,
            is_sensitive: entry.is_sensitive,
            no_scope_limit: entry.no_scope_limit,
            is_scopable: entry.is_scopable,
        }
    }
}

/// A rendered group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    /// Group key, passed back with group actions
    pub key: GroupKey,
    /// Header text
    pub label: String,
    /// Entries matching the search, in catalog order
    pub entries: Vec<EntryView>,
    /// Enabled entries in the whole group
    pub enabled_count: usize,
    /// All entries in the whole group
    pub total_count: usize,
    /// Whether the group body is shown
    pub expanded: bool,
    /// Enable-all/disable-all button
    pub toggle_all: ToggleAllLabel,
}

impl GroupView {
    /// The "n / m" badge.
    #[must_use]
    pub fn badge(&self) -> String {
        format!("{} / {}", self.enabled_count, self.total_count)
    }
}

/// The grouped, filtered view of a session.
///
/// An empty view is the "no permissions found" state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedView {
    /// Normalized search query the view was filtered by
    pub query: String,
    /// Visible groups: named first, ungrouped last
    pub groups: Vec<GroupView>,
}

impl GroupedView {
    /// Derive the view from a selection.
    #[must_use]
    pub fn build(
        selection: &Selection,
        query: &SearchQuery,
        expansion: &ExpansionState,
        ungrouped_label: &str,
    ) -> Self {
        let groups = group_by_subdomain(selection.entries())
            .into_iter()
            .filter_map(|group| {
                let visible = group.filtered(query);
                if visible.entries.is_empty() {
                    return None;
                }

                let label = match &group.key {
                    GroupKey::Named(name) => name.clone(),
                    GroupKey::Ungrouped => ungrouped_label.to_string(),
                };

                Some(GroupView {
                    label,
                    entries: visible.entries.into_iter().map(EntryView::from).collect(),
                    enabled_count: group.entries.iter().filter(|e| e.is_enabled).count(),
                    total_count: group.entries.len(),
                    expanded: expansion.is_expanded(&group.key),
                    toggle_all: selection.toggle_all_label(&group.key),
                    key: group.key,
                })
            })
            .collect();

        Self {
            query: query.as_str().to_string(),
            groups,
        }
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Find a visible group.
    #[must_use]
    pub fn group(&self, key: &GroupKey) -> Option<&GroupView> {
        self.groups.iter().find(|g| &g.key == key)
    }

    /// Number of visible entries across all groups.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }

    /// Split `text` around the first case-insensitive occurrence of the
    /// view's query.
    #[must_use]
    pub fn highlight<'t>(&self, text: &'t str) -> Highlighted<'t> {
        Highlighted::split(text, &self.query)
    }
}

/// Text split around a highlighted match.
///
/// Without a match the whole text is in `prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlighted<'t> {
    /// Text before the match
    pub prefix: &'t str,
    /// The matched text, in its original case
    pub matched: &'t str,
    /// Text after the match
    pub suffix: &'t str,
}

impl<'t> Highlighted<'t> {
    /// Split `text` around the first match of an already-normalized query.
    #[must_use]
    pub fn split(text: &'t str, query: &str) -> Self {
        let unmatched = Self {
            prefix: text,
            matched: "",
            suffix: "",
        };

        if query.is_empty() {
            return unmatched;
        }

        // Whole-string lowering, as in `SearchQuery::matches`. Per-char
        // lowered lengths agree with it, so offsets map back onto `text`.
        let lowered = text.to_lowercase();
        let Some(lowered_start) = lowered.find(query) else {
            return unmatched;
        };
        let lowered_end = lowered_start + query.len();

        let mut position = 0;
        let mut start = None;
        let mut end = text.len();
        for (index, ch) in text.char_indices() {
            let next = position + ch.to_lowercase().map(char::len_utf8).sum::<usize>();
            if start.is_none() && next > lowered_start {
                start = Some(index);
            }
            if next >= lowered_end {
                end = index + ch.len_utf8();
                break;
            }
            position = next;
        }

        let start = start.unwrap_or(end);
        Self {
            prefix: &text[..start],
            matched: &text[start..end],
            suffix: &text[end..],
        }
    }

    /// Whether the query was found.
    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.matched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permset_catalog::{CatalogDomain, CatalogPermission, DomainMetadata};

    fn domain() -> CatalogDomain {
        let permission = |name: &str, subdomain: Option<&str>| CatalogPermission {
            name: name.to_string(),
            subdomain: subdomain.map(str::to_string),
            supported_actions: SupportedActions::ViewEdit,
            sensitive: false,
            no_scope_limit: false,
            scopable: false,
        };

        CatalogDomain {
            domain: DomainMetadata {
                name: "Payroll".to_string(),
                order: None,
            },
            permissions: vec![
                permission("Run Payroll", None),
                permission("Payroll Reports", Some("Reports")),
                permission("Payroll Calendar", Some("Settings")),
                permission("Audit Trail", Some("Reports")),
                permission("Bank Details", None),
            ],
        }
    }

    fn build(selection: &Selection, query: &str) -> GroupedView {
        GroupedView::build(
            selection,
            &SearchQuery::new(query),
            &ExpansionState::collapsed(),
            "Other",
        )
    }

    #[test]
    fn test_group_by_subdomain_order() {
        let selection = Selection::seed(&domain(), &[]);
        let groups = group_by_subdomain(selection.entries());

        let keys: Vec<String> = groups.iter().map(|g| g.key.to_string()).collect();
        assert_eq!(keys, vec!["Reports", "Settings", "-"]);

        let reports: Vec<&str> = groups[0].entries.iter().map(|e| e.permission.as_str()).collect();
        assert_eq!(reports, vec!["Payroll Reports", "Audit Trail"]);

        let ungrouped: Vec<&str> = groups[2].entries.iter().map(|e| e.permission.as_str()).collect();
        assert_eq!(ungrouped, vec!["Run Payroll", "Bank Details"]);
    }

    #[test]
    fn test_group_by_subdomain_empty() {
        assert!(group_by_subdomain(&[]).is_empty());
    }

    #[test]
    fn test_view_without_query() {
        let selection = Selection::seed(&domain(), &[]);
        let view = build(&selection, "");

        assert_eq!(view.groups.len(), 3);
        assert_eq!(view.entry_count(), 5);
        assert_eq!(view.groups[2].label, "Other");
        assert_eq!(view.groups[2].key, GroupKey::Ungrouped);
        assert!(view.groups.iter().all(|g| !g.expanded));
    }

    #[test]
    fn test_view_filters_and_drops_empty_groups() {
        let selection = Selection::seed(&domain(), &[]);

        let view = build(&selection, "  AUDIT ");
        assert_eq!(view.query, "audit");
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].label, "Reports");
        assert_eq!(view.groups[0].entries.len(), 1);
        // Counts cover the whole group
        assert_eq!(view.groups[0].total_count, 2);

        // Subdomain name match keeps every entry of the group
        let view = build(&selection, "settings");
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].entries[0].permission, "Payroll Calendar");

        let view = build(&selection, "bank");
        assert_eq!(view.groups.len(), 1);
        assert_eq!(view.groups[0].key, GroupKey::Ungrouped);
    }

    #[test]
    fn test_view_no_permissions_found() {
        let selection = Selection::seed(&domain(), &[]);
        assert!(build(&selection, "whistleblowing").is_empty());
        assert!(build(&Selection::default(), "").is_empty());
    }

    #[test]
    fn test_view_counts_and_toggle_label() {
        let mut selection = Selection::seed(&domain(), &[]);
        selection.enable_all(&GroupKey::Named("Reports".to_string()));
        selection.toggle("Bank Details", None);

        let view = build(&selection, "");
        let reports = view
            .group(&GroupKey::Named("Reports".to_string()))
            .expect("reports group");
        assert_eq!(reports.badge(), "2 / 2");
        assert_eq!(reports.toggle_all, ToggleAllLabel::DisableAll);

        let other = view.group(&GroupKey::Ungrouped).expect("ungrouped group");
        assert_eq!(other.badge(), "1 / 2");
        assert_eq!(other.toggle_all, ToggleAllLabel::EnableAll);
    }

    #[test]
    fn test_entry_view() {
        let selection = Selection::seed(&domain(), &[]);
        let view = build(&selection, "run");
        let entry = &view.groups[0].entries[0];

        assert_eq!(entry.subdomain, "-");
        assert_eq!(entry.levels, vec![AccessLevel::View, AccessLevel::Edit]);
        assert!(entry.has_level_choice);
        assert_eq!(entry.access_level, Some(AccessLevel::View));
        assert!(!entry.is_scopable);
    }

    #[test]
    fn test_view_serializes() {
        let selection = Selection::seed(&domain(), &[]);
        let json = serde_json::to_value(build(&selection, "pay")).expect("serialize view");

        assert_eq!(json["query"], "pay");
        assert_eq!(json["groups"][0]["key"]["named"], "Reports");
        assert_eq!(json["groups"][0]["toggle_all"], "enable_all");
        assert_eq!(json["groups"][2]["key"], "ungrouped");
    }

    #[test]
    fn test_highlight() {
        let split = Highlighted::split("Payroll Reports", "rep");
        assert_eq!(split.prefix, "Payroll ");
        assert_eq!(split.matched, "Rep");
        assert_eq!(split.suffix, "orts");
        assert!(split.is_match());

        let split = Highlighted::split("Payroll Reports", "");
        assert_eq!(split.prefix, "Payroll Reports");
        assert!(!split.is_match());

        let split = Highlighted::split("Payroll Reports", "absence");
        assert_eq!(split.prefix, "Payroll Reports");
        assert!(!split.is_match());
    }

    #[test]
    fn test_highlight_non_ascii() {
        let split = Highlighted::split("Überstunden", "über");
        assert_eq!(split.matched, "Über");
        assert_eq!(split.suffix, "stunden");
    }

    #[test]
    fn test_highlight_final_sigma() {
        let query = SearchQuery::new("ΟΔΟΣ");
        assert!(query.matches("ΟΔΟΣ"));

        let split = Highlighted::split("ΟΔΟΣ", query.as_str());
        assert_eq!(split.matched, "ΟΔΟΣ");
        assert!(split.prefix.is_empty());

        let split = Highlighted::split("Κεντρική ΟΔΟΣ", query.as_str());
        assert_eq!(split.prefix, "Κεντρική ");
        assert_eq!(split.matched, "ΟΔΟΣ");
    }

    #[test]
    fn test_visible_entries_always_highlight() {
        let domain = CatalogDomain {
            domain: DomainMetadata {
                name: "Greek".to_string(),
                order: None,
            },
            permissions: vec![CatalogPermission {
                name: "ΟΔΟΣ".to_string(),
                subdomain: None,
                supported_actions: SupportedActions::YesNo,
                sensitive: false,
                no_scope_limit: false,
                scopable: false,
            }],
        };
        let selection = Selection::seed(&domain, &[]);
        let view = build(&selection, "ΟΔΟΣ");

        assert_eq!(view.entry_count(), 1);
        for entry in view.groups.iter().flat_map(|g| &g.entries) {
            assert!(view.highlight(&entry.permission).is_match());
        }
    }

    #[test]
    fn test_view_highlight_uses_query() {
        let selection = Selection::seed(&domain(), &[]);
        let view = build(&selection, "CAL");
        assert_eq!(view.highlight("Payroll Calendar").matched, "Cal");
    }
}
