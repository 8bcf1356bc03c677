//! Typed key-value configuration files.
//!
//! # Architecture
//!
//! - **key**: `ParamKey`, the case-insensitive parameter identity
//! - **value**: typed `ParamValue`, on-disk `RawValue`/`RawConfig`, `to_boolean`
//! - **schema**: `ParamType` and `ParamSpec` declarations
//! - **format**: the `FileFormat` trait with plain-text and JSON formats
//! - **registry**: `ParamRegistry`, which ties declarations, values and a format together
//! - **connection** / **runtime**: the two config kinds a plugin reads
//!
//! # Usage
//!
//! ```rust,no_run
//! use panelkit::config::{ParamRegistry, ParamType};
//!
//! let mut config = ParamRegistry::new("etc/plugin_demo.conf", "conf", |p: &mut ParamRegistry| {
//!     p.declare("Port", ParamType::Int, Some(8080.into()));
//!     p.declare("Env", ParamType::StrList, None);
//! });
//!
//! if !config.load().unwrap() {
//!     eprintln!("config not loaded, using defaults");
//! }
//! let port = config.get_int("Port").unwrap_or(8080);
//! println!("listening on {}", port);
//! ```

mod connection;
pub mod format;
mod key;
mod registry;
mod runtime;
mod schema;
mod value;

pub use connection::{ConnectionConfig, ConnectionDescriptor, Endpoint, DEFAULT_PORT};
pub use format::{FileFormat, JsonFormat, PlainTextFormat, JSON_FORMAT, PLAIN_FORMAT};
pub use key::ParamKey;
pub use registry::{ConfigSchema, LoadStatus, NoSchema, ParamRegistry};
pub use runtime::RuntimeConfig;
pub use schema::{ParamSpec, ParamType};
pub use value::{to_boolean, ParamValue, RawConfig, RawValue};
