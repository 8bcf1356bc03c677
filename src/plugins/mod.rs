//! Plugin runtime for Panelkit
//!
//! A panel plugin is an executable the control panel calls in two ways:
//! with a lifecycle event as its first argument (install, update, delete),
//! or as a CGI script behind one of the panel's pages. This module turns
//! such an invocation into a call on the plugin's own code.
//!
//! # Architecture
//!
//! - **event**: `LifecycleEvent`, the commands the panel sends
//! - **settings**: `PluginSettings`/`PluginPaths`, file layout with environment overrides
//! - **cgi**: `CgiRequest`, the environment and body handed to a web runner
//! - **host**: `PluginHost`, which loads configs, sets up logging and dispatches
//!
//! # Plugin Layout
//!
//! ```text
//! $MGR_ROOT/
//! ├── etc/
//! │   ├── ispmgr.conf              # panel config: database connection
//! │   └── plugin_<name>.conf       # plugin config: Debug, Env
//! └── var/
//!     └── plugin_<name>.log
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use panelkit::plugins::{CgiRequest, LifecycleEvent, PluginHost};
//!
//! let mut host = PluginHost::from_env("backup")
//!     .unwrap()
//!     .on(LifecycleEvent::PostInstall, |_: &mut PluginHost, _: LifecycleEvent| -> anyhow::Result<()> {
//!         Ok(())
//!     })
//!     .with_web_runner(|_: &mut PluginHost, _: &CgiRequest| -> anyhow::Result<i32> {
//!         print!("Content-Type: text/plain\r\n\r\nok");
//!         Ok(0)
//!     });
//!
//! let args: Vec<String> = std::env::args().skip(1).collect();
//! std::process::exit(host.run(&args));
//! ```

pub mod cgi;
pub mod event;
pub mod host;
pub mod settings;

pub use cgi::{is_cgi_environment, CgiRequest};
pub use event::LifecycleEvent;
pub use host::{ConsoleRunner, LifecycleHandler, PluginHost, WebRunner};
pub use settings::{validate_plugin_name, PluginPaths, PluginSettings};
