//! The plugin's own runtime settings.

use std::path::PathBuf;

use crate::error::Result;

use super::registry::{LoadStatus, ParamRegistry};
use super::schema::ParamType;

fn declare_runtime(params: &mut ParamRegistry) {
    params
        .declare("Debug", ParamType::Bool, Some(false.into()))
        .declare("Env", ParamType::StrList, None);
}

/// Runtime settings of a plugin: debug logging and extra environment
/// variables handed to CGI requests.
///
/// ```text
/// Debug On
/// Env APP_ENV=prod
/// Env LANG=C.UTF-8
/// ```
#[derive(Debug)]
pub struct RuntimeConfig {
    params: ParamRegistry,
}

impl RuntimeConfig {
    pub fn new(path: impl Into<PathBuf>, format: &str) -> Self {
        Self {
            params: ParamRegistry::new(path, format, declare_runtime),
        }
    }

    pub fn params(&self) -> &ParamRegistry {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamRegistry {
        &mut self.params
    }

    pub fn load(&mut self) -> Result<bool> {
        self.params.load()
    }

    pub fn load_status(&mut self) -> Result<LoadStatus> {
        self.params.load_status()
    }

    pub fn is_debug_mode(&self) -> bool {
        self.params.get_bool("Debug")
    }

    /// `Env` entries as written (`NAME=value`). Never absent.
    pub fn environment_variables(&self) -> Vec<String> {
        self.params.get_list("Env")
    }

    /// `Env` entries split at the first `=`. Entries without `=` get an
    /// empty value; entries with an empty name are dropped.
    pub fn environment_pairs(&self) -> Vec<(String, String)> {
        self.environment_variables()
            .into_iter()
            .filter_map(|entry| {
                let (name, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
                let name = name.trim();
                (!name.is_empty()).then(|| (name.to_string(), value.to_string()))
            })
            .collect()
    }
}
