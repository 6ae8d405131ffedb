//! Presentation boundary of the dialog.
//!
//! The UI feeds requests in through [`DialogController::dispatch`] and
//! renders whatever [`DialogController::view`] returns.

use crate::{
    committed::CommittedPermissions,
    grouping::GroupedView,
    session::{DialogSession, SessionMode},
    DialogError, GroupKey, Result,
};
use permset_catalog::CatalogRegistry;
use permset_core::{AccessLevel, DialogConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A user request against the open session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogAction {
    /// Flip one permission's switch
    TogglePermission {
        /// Subdomain, `None` for ungrouped permissions
        subdomain: Option<String>,
        /// Permission name
        permission: String,
    },
    /// Pick an access level
    SetAccessLevel {
        /// Subdomain, `None` for ungrouped permissions
        subdomain: Option<String>,
        /// Permission name
        permission: String,
        /// Requested level
        level: AccessLevel,
    },
    /// Enable every permission in a group
    EnableAll {
        /// Target group
        group: GroupKey,
    },
    /// Disable every permission in a group
    DisableAll {
        /// Target group
        group: GroupKey,
    },
    /// Press a group's enable-all/disable-all button
    ToggleAll {
        /// Target group
        group: GroupKey,
    },
    /// Click a group's chevron
    ToggleGroup {
        /// Target group
        group: GroupKey,
    },
    /// The search field changed
    SetSearch {
        /// Raw search text
        text: String,
    },
}

impl DialogAction {
    /// Shorthand for [`DialogAction::TogglePermission`].
    #[must_use]
    pub fn toggle(subdomain: Option<&str>, permission: &str) -> Self {
        Self::TogglePermission {
            subdomain: subdomain.map(str::to_string),
            permission: permission.to_string(),
        }
    }

    /// Shorthand for [`DialogAction::SetAccessLevel`].
    #[must_use]
    pub fn set_level(subdomain: Option<&str>, permission: &str, level: AccessLevel) -> Self {
        Self::SetAccessLevel {
            subdomain: subdomain.map(str::to_string),
            permission: permission.to_string(),
            level,
        }
    }

    /// Shorthand for [`DialogAction::SetSearch`].
    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self::SetSearch { text: text.into() }
    }
}

/// Drives the dialog: `Closed`, then `Open(Add | Edit)`, then `Closed`.
pub struct DialogController {
    catalog: CatalogRegistry,
    ungrouped_label: String,
    session: Option<DialogSession>,
}

impl DialogController {
    /// Create a closed controller over a catalog.
    #[must_use]
    pub fn new(catalog: CatalogRegistry) -> Self {
        Self::with_config(catalog, &DialogConfig::default())
    }

    /// Create a closed controller using dialog configuration.
    #[must_use]
    pub fn with_config(catalog: CatalogRegistry, config: &DialogConfig) -> Self {
        Self {
            catalog,
            ungrouped_label: config.ungrouped_label.clone(),
            session: None,
        }
    }

    /// The catalog backing the dialog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogRegistry {
        &self.catalog
    }

    /// Whether a session is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// The open session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DialogSession> {
        self.session.as_ref()
    }

    /// Open a domain. Edit mode when `committed` already holds entries for
    /// it, add mode otherwise.
    ///
    /// A session that is already open is discarded. On error the
    /// controller is left closed.
    pub fn open<C>(&mut self, domain: &str, committed: &C) -> Result<SessionMode>
    where
        C: CommittedPermissions + ?Sized,
    {
        if let Some(previous) = self.session.take() {
            debug!(domain = %previous.domain(), "discarding open session");
        }

        let definition = self
            .catalog
            .get(domain)
            .map_err(|_| DialogError::UnknownDomain(domain.to_string()))?;

        let session = DialogSession::open(&definition, &committed.get(domain));
        let mode = session.mode();

        info!(
            domain,
            %mode,
            permissions = session.selection().entries().len(),
            "opened permission dialog"
        );

        self.session = Some(session);
        Ok(mode)
    }

    /// Apply a user request to the open session.
    pub fn dispatch(&mut self, action: DialogAction) -> Result<()> {
        let session = self.session.as_mut().ok_or(DialogError::NotOpen)?;

        match action {
            DialogAction::TogglePermission {
                subdomain,
                permission,
            } => {
                session.toggle(&permission, subdomain.as_deref());
            }
            DialogAction::SetAccessLevel {
                subdomain,
                permission,
                level,
            } => {
                session.set_access_level(&permission, subdomain.as_deref(), level)?;
            }
            DialogAction::EnableAll { group } => {
                session.enable_all(&group);
            }
            DialogAction::DisableAll { group } => {
                session.disable_all(&group);
            }
            DialogAction::ToggleAll { group } => {
                session.toggle_all(&group);
            }
            DialogAction::ToggleGroup { group } => {
                session.toggle_group(&group);
            }
            DialogAction::SetSearch { text } => {
                session.set_search(text);
            }
        }

        Ok(())
    }

    /// The grouped, filtered view of the open session.
    pub fn view(&self) -> Result<GroupedView> {
        let session = self.session.as_ref().ok_or(DialogError::NotOpen)?;
        Ok(session.view(&self.ungrouped_label))
    }

    /// Whether the primary action is enabled. False while closed.
    #[must_use]
    pub fn is_save_enabled(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(DialogSession::is_save_enabled)
    }

    /// Dialog title of the open session.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.session.as_ref().map(DialogSession::title)
    }

    /// Primary action label of the open session.
    #[must_use]
    pub fn action_label(&self) -> Option<String> {
        self.session.as_ref().map(DialogSession::action_label)
    }

    /// Commit the open session and close the dialog.
    ///
    /// The domain's committed entries are replaced by the enabled entries
    /// in catalog order. Returns how many were committed. When saving is
    /// not enabled the session stays open and nothing is written.
    pub fn save<C>(&mut self, committed: &mut C) -> Result<usize>
    where
        C: CommittedPermissions + ?Sized,
    {
        let session = self.session.as_ref().ok_or(DialogError::NotOpen)?;
        if !session.is_save_enabled() {
            return Err(DialogError::NothingToSave {
                domain: session.domain().to_string(),
            });
        }

        let Some(session) = self.session.take() else {
            return Err(DialogError::NotOpen);
        };
        let domain = session.domain().to_string();
        let mode = session.mode();
        let entries = session.into_enabled();
        let count = entries.len();

        committed.replace(&domain, entries);
        info!(domain = %domain, %mode, count, "committed permission dialog");

        Ok(count)
    }

    /// Discard the open session. Returns false if none was open.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                info!(domain = %session.domain(), "discarded permission dialog");
                true
            }
            None => false,
        }
    }
}
