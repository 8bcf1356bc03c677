//! Plugin entry point: routes a panel invocation to the right runner.
//!
//! The panel starts the plugin with an event name as the first argument
//! (`preinstall`, `postinstall`, ..., `run-cgi`), or as a CGI script when a
//! user opens one of the plugin's pages. [`PluginHost::run`] sets up
//! logging, loads the plugin config, and dispatches:
//!
//! - CGI environment, or `run-cgi` → the web runner
//! - any other lifecycle event → its registered handler (none = no-op)
//! - anything else → the console runner

use std::collections::HashMap;

use anyhow::Context;
use tracing::{debug, error, info, warn};

use crate::config::{ConnectionConfig, LoadStatus, RuntimeConfig};
use crate::error::{PanelError, Result};
use crate::utils::logging::{init_logging, LogFormat, LoggingOptions};

use super::cgi::{is_cgi_environment, CgiRequest};
use super::event::LifecycleEvent;
use super::settings::{PluginPaths, PluginSettings};

/// Serves a CGI request. Returns the process exit code.
pub trait WebRunner {
    fn serve(&mut self, host: &mut PluginHost, request: &CgiRequest) -> anyhow::Result<i32>;
}

impl<F> WebRunner for F
where
    F: FnMut(&mut PluginHost, &CgiRequest) -> anyhow::Result<i32>,
{
    fn serve(&mut self, host: &mut PluginHost, request: &CgiRequest) -> anyhow::Result<i32> {
        self(host, request)
    }
}

/// Runs a console command that is not a lifecycle event. `args` starts
/// with the command name. Returns the process exit code.
pub trait ConsoleRunner {
    fn run(&mut self, host: &mut PluginHost, args: &[String]) -> anyhow::Result<i32>;
}

impl<F> ConsoleRunner for F
where
    F: FnMut(&mut PluginHost, &[String]) -> anyhow::Result<i32>,
{
    fn run(&mut self, host: &mut PluginHost, args: &[String]) -> anyhow::Result<i32> {
        self(host, args)
    }
}

/// Reacts to a lifecycle event (install, update, delete).
pub trait LifecycleHandler {
    fn handle(&mut self, host: &mut PluginHost, event: LifecycleEvent) -> anyhow::Result<()>;
}

impl<F> LifecycleHandler for F
where
    F: FnMut(&mut PluginHost, LifecycleEvent) -> anyhow::Result<()>,
{
    fn handle(&mut self, host: &mut PluginHost, event: LifecycleEvent) -> anyhow::Result<()> {
        self(host, event)
    }
}

/// A plugin instance: its layout, its configs and its runners.
pub struct PluginHost {
    settings: PluginSettings,
    paths: PluginPaths,
    installed: bool,
    cgi_mode: bool,
    log_format: LogFormat,
    runtime: Option<RuntimeConfig>,
    connection: Option<ConnectionConfig>,
    web_runner: Option<Box<dyn WebRunner>>,
    console_runner: Option<Box<dyn ConsoleRunner>>,
    handlers: HashMap<LifecycleEvent, Box<dyn LifecycleHandler>>,
}

impl PluginHost {
    pub fn new(settings: PluginSettings) -> Self {
        let paths = settings.resolve();
        Self {
            settings,
            paths,
            installed: true,
            cgi_mode: is_cgi_environment(),
            log_format: LogFormat::Text,
            runtime: None,
            connection: None,
            web_runner: None,
            console_runner: None,
            handlers: HashMap::new(),
        }
    }

    /// Host with settings taken from the environment.
    pub fn from_env(plugin_name: &str) -> Result<Self> {
        Ok(Self::new(PluginSettings::from_env(plugin_name)?))
    }

    pub fn with_web_runner(mut self, runner: impl WebRunner + 'static) -> Self {
        self.web_runner = Some(Box::new(runner));
        self
    }

    pub fn with_console_runner(mut self, runner: impl ConsoleRunner + 'static) -> Self {
        self.console_runner = Some(Box::new(runner));
        self
    }

    /// Register the handler for `event`, replacing any previous one.
    pub fn on(mut self, event: LifecycleEvent, handler: impl LifecycleHandler + 'static) -> Self {
        self.handlers.insert(event, Box::new(handler));
        self
    }

    /// Force CGI mode on or off instead of detecting it from the environment.
    pub fn set_cgi_mode(&mut self, cgi_mode: bool) {
        self.cgi_mode = cgi_mode;
    }

    pub fn set_log_format(&mut self, format: LogFormat) {
        self.log_format = format;
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    pub fn paths(&self) -> &PluginPaths {
        &self.paths
    }

    pub fn plugin_name(&self) -> &str {
        &self.settings.plugin_name
    }

    /// False while handling `preinstall`: nothing of the plugin exists on
    /// disk yet, so its configs are not read or created.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    // ------------------------------------------------------------------------
    // Configs
    // ------------------------------------------------------------------------

    /// Create and load the runtime config if needed. Returns the load
    /// status only when a load happened on this call.
    fn ensure_runtime(&mut self) -> Result<Option<LoadStatus>> {
        if !self.installed || self.runtime.is_some() {
            return Ok(None);
        }
        let mut config = RuntimeConfig::new(&self.paths.config_file, &self.settings.config_format);
        let status = config.load_status()?;
        self.runtime = Some(config);
        Ok(Some(status))
    }

    fn ensure_connection(&mut self) -> Result<Option<LoadStatus>> {
        if !self.installed || self.connection.is_some() {
            return Ok(None);
        }
        let mut config =
            ConnectionConfig::new(&self.paths.manager_config_file, &self.settings.manager_name);
        let status = config.load_status()?;
        self.connection = Some(config);
        Ok(Some(status))
    }

    /// The plugin's runtime config, loaded on first access. `None` when
    /// the plugin is not installed.
    pub fn runtime_config(&mut self) -> Result<Option<&mut RuntimeConfig>> {
        if let Some(status) = self.ensure_runtime()? {
            report_load("Plugin", status);
        }
        Ok(self.runtime.as_mut())
    }

    /// The panel's connection config, loaded on first access. `None` when
    /// the plugin is not installed.
    pub fn connection_config(&mut self) -> Result<Option<&mut ConnectionConfig>> {
        if let Some(status) = self.ensure_connection()? {
            report_load("Manager", status);
        }
        Ok(self.connection.as_mut())
    }

    // ------------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------------

    /// Handle one invocation. `args` are the process arguments without the
    /// program name; the first one names the command. Returns the exit code.
    pub fn run(&mut self, args: &[String]) -> i32 {
        let command = args.first().map(String::as_str);
        let event = command.and_then(|c| c.parse::<LifecycleEvent>().ok());
        self.installed = event != Some(LifecycleEvent::PreInstall);

        // Load before logging is up so the debug flag can set the file level;
        // the outcome is reported once the subscriber exists.
        let runtime_status = self.ensure_runtime();
        let debug = self.runtime.as_ref().is_some_and(RuntimeConfig::is_debug_mode);
        let options = LoggingOptions {
            log_file: Some(&self.paths.log_file),
            debug,
            format: self.log_format,
        };
        init_logging(&options);

        match runtime_status {
            Ok(Some(status)) => report_load("Plugin", status),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Plugin config not loaded"),
        }

        if let Some(command) = command {
            info!(plugin = %self.plugin_name(), command, "Run command");
        }

        match self.dispatch(event, args) {
            Ok(code) => code,
            Err(e) => {
                let message = format!("{:#}", e);
                error!(plugin = %self.plugin_name(), error = %message, "Command failed");
                1
            }
        }
    }

    /// Run a lifecycle event as if the panel had invoked it.
    pub fn run_event(&mut self, event: LifecycleEvent) -> i32 {
        self.run(&[event.as_str().to_string()])
    }

    fn dispatch(&mut self, event: Option<LifecycleEvent>, args: &[String]) -> anyhow::Result<i32> {
        if self.cgi_mode {
            return self.serve_cgi();
        }
        match event {
            Some(LifecycleEvent::RunCgi) => self.serve_cgi(),
            Some(event) => self.handle_event(event).map(|()| 0),
            None => self.run_console(args),
        }
    }

    fn handle_event(&mut self, event: LifecycleEvent) -> anyhow::Result<()> {
        let Some(mut handler) = self.handlers.remove(&event) else {
            debug!(%event, "No handler registered, nothing to do");
            return Ok(());
        };
        let result = handler
            .handle(self, event)
            .with_context(|| format!("Handler for {} failed", event));
        self.handlers.insert(event, handler);
        result
    }

    fn serve_cgi(&mut self) -> anyhow::Result<i32> {
        let env = self
            .runtime_config()?
            .map(|config| config.environment_pairs())
            .unwrap_or_default();
        let request = CgiRequest::from_process(&env)?;

        let mut runner = self.web_runner.take().ok_or_else(|| {
            PanelError::Runner("Web application runner is not defined".to_string())
        })?;
        let result = runner.serve(self, &request);
        self.web_runner = Some(runner);
        result
    }

    fn run_console(&mut self, args: &[String]) -> anyhow::Result<i32> {
        let mut runner = self.console_runner.take().ok_or_else(|| {
            PanelError::Runner("Console application runner is not defined".to_string())
        })?;
        let result = runner.run(self, args);
        self.console_runner = Some(runner);
        result
    }
}

fn report_load(kind: &str, status: LoadStatus) {
    match status {
        LoadStatus::Loaded => debug!(kind, "Config loaded"),
        LoadStatus::Seeded => info!(kind, "Config file created with defaults"),
        LoadStatus::SeedFailed | LoadStatus::Failed => {
            warn!(kind, ?status, "{} config not loaded", kind)
        }
    }
}

impl std::fmt::Debug for PluginHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginHost")
            .field("settings", &self.settings)
            .field("installed", &self.installed)
            .field("cgi_mode", &self.cgi_mode)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
