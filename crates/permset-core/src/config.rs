//! Configuration management for the permission set builder.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/permset/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Permission catalog settings
    pub catalog: CatalogConfig,
    /// Add/Edit permission dialog settings
    pub dialog: DialogConfig,
    /// Permission set wizard settings
    pub wizard: WizardConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file, falling back to defaults if
    /// it doesn't exist.
    pub fn load_from(config_path: &Path) -> ConfigResult<Self> {
        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(config_path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `PERMSET_CATALOG_DIR`: Override the permission catalog directory
    /// - `PERMSET_UNGROUPED_LABEL`: Override the label of the ungrouped permission group
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of the current values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PERMSET_CATALOG_DIR") {
            if !val.trim().is_empty() {
                tracing::debug!("Override catalog.dir from env: {}", val);
                self.catalog.dir = Some(PathBuf::from(val));
            }
        }

        if let Ok(val) = std::env::var("PERMSET_UNGROUPED_LABEL") {
            tracing::debug!("Override dialog.ungrouped_label from env: {}", val);
            self.dialog.ungrouped_label = val;
        }
    }

    /// Check values that deserialize fine but make no sense.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dialog.ungrouped_label.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "dialog.ungrouped_label".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/permset/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "permset", "permset").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Permission catalog settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding the catalog TOML files. When unset, the
    /// `permission-catalog/` directory at the workspace root is used.
    pub dir: Option<PathBuf>,
}

/// Add/Edit permission dialog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Label of the synthetic group collecting permissions without a subdomain
    pub ungrouped_label: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            ungrouped_label: "Other".to_string(),
        }
    }
}

/// Permission set wizard settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Scope preselected for new permission sets (kebab-case option value,
    /// e.g. `direct-reports`). Unset means the user must pick one.
    pub default_scope: Option<String>,
}
