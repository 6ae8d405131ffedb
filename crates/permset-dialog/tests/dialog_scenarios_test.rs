//! End-to-end dialog flows against an in-memory committed store.

use permset_catalog::{CatalogDomain, CatalogRegistry};
use permset_core::AccessLevel;
use permset_dialog::{
    changed, CommittedPermissions, CommittedStore, DialogAction, DialogController, DialogError,
    GroupKey, SessionMode, ToggleAllLabel,
};
use pretty_assertions::assert_eq;

const PAYROLL: &str = r#"
[domain]
name = "Payroll"

[[permissions]]
name = "View Payslips"
subdomain = "Payslips"
supported_actions = "View only"
sensitive = true

[[permissions]]
name = "Edit Payslips"
subdomain = "Payslips"
supported_actions = "View-Edit"
sensitive = true
"#;

const REPORTING: &str = r#"
[domain]
name = "Reporting"

[[permissions]]
name = "Payroll Reports"
subdomain = "Reports"
supported_actions = "View only"

[[permissions]]
name = "Headcount Reports"
subdomain = "Reports"
supported_actions = "View only"

[[permissions]]
name = "Payroll Calendar"
subdomain = "Settings"
supported_actions = "View - Edit"

[[permissions]]
name = "Report Templates"
subdomain = "Settings"
supported_actions = "Edit only"

[[permissions]]
name = "Export Data"
subdomain = "-"
supported_actions = "Yes - No"
"#;

fn controller() -> DialogController {
    let payroll: CatalogDomain = toml::from_str(PAYROLL).expect("parse payroll");
    let reporting: CatalogDomain = toml::from_str(REPORTING).expect("parse reporting");
    let registry = CatalogRegistry::from_domains(vec![payroll, reporting]).expect("build registry");
    DialogController::new(registry)
}

fn committed_rows(store: &CommittedStore, domain: &str) -> Vec<(String, bool, Option<AccessLevel>)> {
    store
        .get(domain)
        .into_iter()
        .map(|e| (e.permission, e.is_enabled, e.access_level))
        .collect()
}

fn row(permission: &str, level: AccessLevel) -> (String, bool, Option<AccessLevel>) {
    (permission.to_string(), true, Some(level))
}

fn reports() -> GroupKey {
    GroupKey::Named("Reports".to_string())
}

fn settings() -> GroupKey {
    GroupKey::Named("Settings".to_string())
}

/// Add Payroll with both permissions, the second at Edit.
fn add_payroll(dialog: &mut DialogController, store: &mut CommittedStore) {
    let mode = dialog.open("Payroll", &*store).expect("open payroll");
    assert_eq!(mode, SessionMode::Add);

    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "View Payslips"))
        .expect("toggle view");
    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "Edit Payslips"))
        .expect("toggle edit");
    dialog
        .dispatch(DialogAction::set_level(
            Some("Payslips"),
            "Edit Payslips",
            AccessLevel::Edit,
        ))
        .expect("set edit level");

    assert!(dialog.is_save_enabled());
    assert_eq!(dialog.action_label().as_deref(), Some("Add 2 Permissions"));

    let count = dialog.save(store).expect("save payroll");
    assert_eq!(count, 2);
    assert!(!dialog.is_open());
}

#[test]
fn test_add_new_domain_enable_two_permissions() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();

    add_payroll(&mut dialog, &mut store);

    assert_eq!(
        committed_rows(&store, "Payroll"),
        vec![
            row("View Payslips", AccessLevel::View),
            row("Edit Payslips", AccessLevel::Edit),
        ]
    );
}

#[test]
fn test_edit_existing_domain_disable_one() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    add_payroll(&mut dialog, &mut store);

    let mode = dialog.open("Payroll", &store).expect("reopen payroll");
    assert_eq!(mode, SessionMode::Edit);
    assert_eq!(dialog.title().as_deref(), Some("Edit Permission · Payroll"));
    assert_eq!(dialog.action_label().as_deref(), Some("Save"));

    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "View Payslips"))
        .expect("toggle view off");
    dialog.save(&mut store).expect("save payroll");

    assert_eq!(
        committed_rows(&store, "Payroll"),
        vec![row("Edit Payslips", AccessLevel::Edit)]
    );
}

#[test]
fn test_disable_all_removes_domain() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    add_payroll(&mut dialog, &mut store);

    dialog.open("Payroll", &store).expect("reopen payroll");
    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "View Payslips"))
        .expect("toggle view off");
    dialog.save(&mut store).expect("save payroll");

    dialog.open("Payroll", &store).expect("reopen payroll");
    dialog
        .dispatch(DialogAction::DisableAll {
            group: GroupKey::Named("Payslips".to_string()),
        })
        .expect("disable all");
    assert_eq!(dialog.save(&mut store), Ok(0));

    assert!(store.get("Payroll").is_empty());
    assert!(store.summary().is_empty());

    // With nothing committed the domain opens in add mode again
    assert_eq!(dialog.open("Payroll", &store), Ok(SessionMode::Add));
}

#[test]
fn test_edit_round_trip_without_changes() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    add_payroll(&mut dialog, &mut store);
    let before = store.clone();

    dialog.open("Payroll", &store).expect("reopen payroll");
    let session = dialog.session().expect("open session");
    assert!(!changed(session.selection().entries(), session.initial()));
    assert!(!dialog.is_save_enabled());

    assert!(matches!(
        dialog.save(&mut store),
        Err(DialogError::NothingToSave { .. })
    ));
    assert!(dialog.cancel());
    assert_eq!(store, before);
}

#[test]
fn test_toggle_back_to_initial_disables_save() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    add_payroll(&mut dialog, &mut store);

    dialog.open("Payroll", &store).expect("reopen payroll");
    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "View Payslips"))
        .expect("toggle");
    assert!(dialog.is_save_enabled());
    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "View Payslips"))
        .expect("toggle back");
    assert!(!dialog.is_save_enabled());
}

#[test]
fn test_reenable_restores_access_level() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    add_payroll(&mut dialog, &mut store);

    dialog.open("Payroll", &store).expect("reopen payroll");
    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "Edit Payslips"))
        .expect("toggle off");
    dialog
        .dispatch(DialogAction::toggle(Some("Payslips"), "Edit Payslips"))
        .expect("toggle on");

    let session = dialog.session().expect("open session");
    let entry = session
        .selection()
        .get("Edit Payslips", Some("Payslips"))
        .expect("entry");
    assert_eq!(entry.effective_access_level(), Some(AccessLevel::Edit));
}

#[test]
fn test_search_auto_expand_then_manual_collapse_survives_next_keystroke() {
    let mut dialog = controller();
    let store = CommittedStore::new();
    dialog.open("Reporting", &store).expect("open reporting");

    dialog.dispatch(DialogAction::search("pay")).expect("search pay");
    let view = dialog.view().expect("view");
    assert!(view.group(&reports()).expect("reports").expanded);
    assert!(view.group(&settings()).expect("settings").expanded);

    dialog
        .dispatch(DialogAction::ToggleGroup { group: settings() })
        .expect("collapse settings");

    dialog.dispatch(DialogAction::search("payr")).expect("search payr");
    let view = dialog.view().expect("view");
    assert!(view.group(&reports()).expect("reports").expanded);
    assert!(!view.group(&settings()).expect("settings").expanded);
}

#[test]
fn test_search_view_and_empty_state() {
    let mut dialog = controller();
    let store = CommittedStore::new();
    dialog.open("Reporting", &store).expect("open reporting");

    let view = dialog.view().expect("view");
    let labels: Vec<&str> = view.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Reports", "Settings", "Other"]);
    assert!(view.groups.iter().all(|g| !g.expanded));

    dialog.dispatch(DialogAction::search("  REPORT ")).expect("search");
    let view = dialog.view().expect("view");
    assert_eq!(view.groups.len(), 2);
    let reports_view = view.group(&reports()).expect("reports");
    assert_eq!(reports_view.entries.len(), 2);
    assert_eq!(view.highlight("Report Templates").matched, "Report");

    dialog.dispatch(DialogAction::search("absence")).expect("search");
    assert!(dialog.view().expect("view").is_empty());

    // Clearing the search keeps expansion as it was
    dialog.dispatch(DialogAction::search("")).expect("clear search");
    let view = dialog.view().expect("view");
    assert_eq!(view.groups.len(), 3);
    assert!(view.groups.iter().all(|g| !g.expanded));
}

#[test]
fn test_toggle_all_on_ungrouped_group() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    dialog.open("Reporting", &store).expect("open reporting");

    let other = dialog
        .view()
        .expect("view")
        .group(&GroupKey::Ungrouped)
        .expect("other")
        .clone();
    assert_eq!(other.toggle_all, ToggleAllLabel::EnableAll);

    dialog
        .dispatch(DialogAction::ToggleAll {
            group: GroupKey::Ungrouped,
        })
        .expect("toggle all");
    let view = dialog.view().expect("view");
    let other = view.group(&GroupKey::Ungrouped).expect("other");
    assert_eq!(other.toggle_all, ToggleAllLabel::DisableAll);
    assert_eq!(other.badge(), "1 / 1");
    assert_eq!(view.group(&reports()).expect("reports").badge(), "0 / 2");

    assert_eq!(dialog.action_label().as_deref(), Some("Add 1 Permission"));
    dialog.save(&mut store).expect("save");

    let committed = store.get("Reporting");
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].permission, "Export Data");
    assert_eq!(committed[0].subdomain, None);
    assert_eq!(committed[0].access_level, None);
}

#[test]
fn test_edit_mode_initial_expansion() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    dialog.open("Reporting", &store).expect("open reporting");
    dialog
        .dispatch(DialogAction::toggle(Some("Settings"), "Report Templates"))
        .expect("toggle");
    dialog.save(&mut store).expect("save");

    dialog.open("Reporting", &store).expect("reopen reporting");
    let view = dialog.view().expect("view");
    assert!(!view.group(&reports()).expect("reports").expanded);
    assert!(view.group(&settings()).expect("settings").expanded);
    assert!(!view.group(&GroupKey::Ungrouped).expect("other").expanded);
}

#[test]
fn test_sessions_do_not_leak_between_domains() {
    let mut dialog = controller();
    let mut store = CommittedStore::new();
    add_payroll(&mut dialog, &mut store);

    dialog.open("Reporting", &store).expect("open reporting");
    dialog
        .dispatch(DialogAction::toggle(Some("Reports"), "Payroll Reports"))
        .expect("toggle");
    dialog.save(&mut store).expect("save reporting");

    assert_eq!(store.domains(), vec!["Payroll", "Reporting"]);
    assert_eq!(store.get("Payroll").len(), 2);
    assert_eq!(store.get("Reporting").len(), 1);
}

#[test]
fn test_stale_references_are_ignored() {
    let mut dialog = controller();
    let store = CommittedStore::new();
    dialog.open("Payroll", &store).expect("open payroll");

    dialog
        .dispatch(DialogAction::toggle(None, "View Payslips"))
        .expect("stale toggle is a no-op");
    dialog
        .dispatch(DialogAction::set_level(None, "Gone", AccessLevel::Edit))
        .expect("stale level is a no-op");
    dialog
        .dispatch(DialogAction::EnableAll {
            group: GroupKey::Named("Gone".to_string()),
        })
        .expect("unknown group is a no-op");

    assert!(!dialog.is_save_enabled());
}
