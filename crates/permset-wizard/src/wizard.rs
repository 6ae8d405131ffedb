//! Wizard facade tying the draft, the steps and the permission dialog.

use crate::draft::PermissionSetDraft;
use crate::error::Result;
use crate::steps::{StepTracker, WizardStep};
use permset_catalog::CatalogRegistry;
use permset_core::AppConfig;
use permset_dialog::{DialogAction, DialogController, GroupedView, SessionMode};
use tracing::info;

/// A permission set being created, from "Get started" to "Confirm".
pub struct PermissionSetWizard {
    draft: PermissionSetDraft,
    steps: StepTracker,
    dialog: DialogController,
}

impl PermissionSetWizard {
    /// Start a wizard with an empty draft.
    #[must_use]
    pub fn new(catalog: CatalogRegistry) -> Self {
        Self {
            draft: PermissionSetDraft::new(),
            steps: StepTracker::new(),
            dialog: DialogController::new(catalog),
        }
    }

    /// Start a wizard using the dialog and wizard configuration.
    pub fn with_config(catalog: CatalogRegistry, config: &AppConfig) -> Result<Self> {
        Ok(Self {
            draft: PermissionSetDraft::from_config(&config.wizard)?,
            steps: StepTracker::new(),
            dialog: DialogController::with_config(catalog, &config.dialog),
        })
    }

    /// The draft.
    #[must_use]
    pub fn draft(&self) -> &PermissionSetDraft {
        &self.draft
    }

    /// Mutable draft for the form steps.
    pub fn draft_mut(&mut self) -> &mut PermissionSetDraft {
        &mut self.draft
    }

    /// The permission dialog.
    #[must_use]
    pub fn dialog(&self) -> &DialogController {
        &self.dialog
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.steps.current()
    }

    /// Steps with whether each breadcrumb is clickable.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<(WizardStep, bool)> {
        self.steps.breadcrumbs()
    }

    /// Continue to the next step.
    pub fn next(&mut self) -> WizardStep {
        self.steps.next()
    }

    /// Return to the previous step.
    pub fn back(&mut self) -> WizardStep {
        self.steps.back()
    }

    /// Breadcrumb click.
    pub fn jump_to(&mut self, step: WizardStep) -> Result<()> {
        self.steps.jump_to(step)
    }

    /// Domain names for the picker, filtered by `query`.
    #[must_use]
    pub fn pick_domains(&self, query: &str) -> Vec<String> {
        self.dialog
            .catalog()
            .search(query)
            .iter()
            .map(|domain| domain.name().to_string())
            .collect()
    }

    /// Open the permission dialog for a domain card or picker entry.
    pub fn open_domain(&mut self, domain: &str) -> Result<SessionMode> {
        Ok(self.dialog.open(domain, self.draft.permissions())?)
    }

    /// Forward a user request to the open dialog.
    pub fn dispatch(&mut self, action: DialogAction) -> Result<()> {
        Ok(self.dialog.dispatch(action)?)
    }

    /// View of the open dialog.
    pub fn dialog_view(&self) -> Result<GroupedView> {
        Ok(self.dialog.view()?)
    }

    /// Commit the open dialog into the draft.
    pub fn save_dialog(&mut self) -> Result<usize> {
        Ok(self.dialog.save(self.draft.permissions_mut())?)
    }

    /// Close the dialog without committing.
    pub fn cancel_dialog(&mut self) -> bool {
        self.dialog.cancel()
    }

    /// Delete a domain card. Returns how many permissions were dropped.
    pub fn remove_domain(&mut self, domain: &str) -> usize {
        let removed = self.draft.permissions_mut().remove_domain(domain);
        if removed > 0 {
            info!(domain, removed, "removed domain permissions");
        }
        removed
    }

    /// Finish the wizard, yielding the draft.
    #[must_use]
    pub fn finish(self) -> PermissionSetDraft {
        info!(
            id = %self.draft.id,
            permissions = self.draft.permissions().len(),
            assignees = self.draft.assignees().len(),
            "permission set ready"
        );
        self.draft
    }
}
