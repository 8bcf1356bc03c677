//! Where a plugin keeps its files.
//!
//! Paths are templates with `{MGR_NAME}`, `{PLUGIN_NAME}` and
//! `{CONFIG_FORMAT}` placeholders, resolved against the manager root.
//! Every default can be overridden from the environment, which is how the
//! panel tells a plugin where it is installed.

use std::env;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::config::PLAIN_FORMAT;
use crate::error::{PanelError, Result};

/// Default internal name of the panel.
pub const DEFAULT_MANAGER_NAME: &str = "ispmgr";
pub const DEFAULT_CONFIG_FILE: &str = "etc/plugin_{PLUGIN_NAME}.{CONFIG_FORMAT}";
pub const DEFAULT_MANAGER_CONFIG_FILE: &str = "etc/{MGR_NAME}.conf";
pub const DEFAULT_LOG_FILE: &str = "var/plugin_{PLUGIN_NAME}.log";

/// Unresolved plugin layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSettings {
    pub plugin_name: String,
    pub manager_name: String,
    pub manager_root: PathBuf,
    pub config_format: String,
    pub config_file: String,
    pub manager_config_file: String,
    pub log_file: String,
}

/// Plugin layout with every template expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginPaths {
    pub config_file: PathBuf,
    pub manager_config_file: PathBuf,
    pub log_file: PathBuf,
}

impl PluginSettings {
    /// Settings with built-in defaults, rooted at `manager_root`.
    pub fn new(plugin_name: &str, manager_root: impl Into<PathBuf>) -> Result<Self> {
        validate_plugin_name(plugin_name)?;
        Ok(Self {
            plugin_name: plugin_name.to_string(),
            manager_name: DEFAULT_MANAGER_NAME.to_string(),
            manager_root: manager_root.into(),
            config_format: PLAIN_FORMAT.to_string(),
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            manager_config_file: DEFAULT_MANAGER_CONFIG_FILE.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
        })
    }

    /// Settings with environment overrides applied.
    ///
    /// Reads `MGR_NAME`, `MGR_ROOT` (default: current directory),
    /// `CONFIG_FILE`, `MGR_CONFIG_FILE` and `PLUGIN_LOG_FILE`.
    pub fn from_env(plugin_name: &str) -> Result<Self> {
        let root = match non_empty_var("MGR_ROOT") {
            Some(root) => PathBuf::from(root),
            None => env::current_dir().map_err(|e| {
                PanelError::Config(format!("Failed to resolve current directory: {}", e))
            })?,
        };

        let mut settings = Self::new(plugin_name, root)?;
        if let Some(name) = non_empty_var("MGR_NAME") {
            settings.manager_name = name;
        }
        if let Some(file) = non_empty_var("CONFIG_FILE") {
            settings.config_file = file;
        }
        if let Some(file) = non_empty_var("MGR_CONFIG_FILE") {
            settings.manager_config_file = file;
        }
        if let Some(file) = non_empty_var("PLUGIN_LOG_FILE") {
            settings.log_file = file;
        }
        Ok(settings)
    }

    pub fn with_config_format(mut self, format: &str) -> Self {
        self.config_format = format.to_lowercase();
        self
    }

    pub fn with_manager_name(mut self, name: &str) -> Self {
        self.manager_name = name.to_string();
        self
    }

    /// Expand placeholders in `template`.
    pub fn expand(&self, template: &str) -> String {
        template
            .replace("{MGR_NAME}", &self.manager_name)
            .replace("{PLUGIN_NAME}", &self.plugin_name)
            .replace("{CONFIG_FORMAT}", &self.config_format)
    }

    fn resolve_path(&self, template: &str) -> PathBuf {
        let path = PathBuf::from(self.expand(template));
        if path.is_absolute() {
            path
        } else {
            self.manager_root.join(path)
        }
    }

    pub fn resolve(&self) -> PluginPaths {
        PluginPaths {
            config_file: self.resolve_path(&self.config_file),
            manager_config_file: self.resolve_path(&self.manager_config_file),
            log_file: self.resolve_path(&self.log_file),
        }
    }

    pub fn manager_root(&self) -> &Path {
        &self.manager_root
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Plugin names end up in file names, so keep them to a safe alphabet:
/// 1-64 alphanumeric characters, hyphens and underscores, starting
/// alphanumeric.
pub fn validate_plugin_name(name: &str) -> Result<()> {
    let name_re = Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_\-]{0,63}$")
        .map_err(|e| PanelError::Config(format!("Invalid plugin name pattern: {}", e)))?;
    if !name_re.is_match(name) {
        return Err(PanelError::InvalidPlugin(format!(
            "Invalid plugin name '{}': must be 1-64 alphanumeric characters, hyphens and underscores, starting with alphanumeric",
            name
        )));
    }
    Ok(())
}
