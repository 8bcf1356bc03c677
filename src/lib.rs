//! Panelkit - SDK for server control panel plugins
//!
//! Typed key-value config files with plain-text and JSON formats, and a
//! host that routes panel lifecycle events and CGI requests to plugin code.

pub mod config;
pub mod error;
pub mod plugins;
pub mod utils;

pub use config::{
    to_boolean, ConfigSchema, ConnectionConfig, FileFormat, LoadStatus, ParamRegistry, ParamType,
    ParamValue, RuntimeConfig,
};
pub use error::{PanelError, Result};
pub use plugins::{CgiRequest, LifecycleEvent, PluginHost, PluginSettings};
