//! Log output for plugin runs.
//!
//! Everything is logged through `tracing`. Two sinks are installed:
//!
//! - stderr, filtered by `RUST_LOG` (default `warn`), which the panel shows
//!   to the administrator on failure;
//! - the plugin log file, appended to on every run, at `info` level or
//!   `debug` when the plugin config enables debug mode.
//!
//! A log file that cannot be opened only disables the second sink.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Log file line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON lines; anything else is text.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Options for [`init_logging`].
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions<'a> {
    pub log_file: Option<&'a Path>,
    pub debug: bool,
    pub format: LogFormat,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber. Returns true when the log file sink is
/// active.
///
/// Safe to call more than once: later calls leave the first subscriber in
/// place.
pub fn init_logging(options: &LoggingOptions<'_>) -> bool {
    let stderr_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let mut layers: Vec<BoxedLayer> = vec![fmt::layer()
        .with_writer(io::stderr)
        .with_filter(stderr_filter)
        .boxed()];

    let mut open_error = None;
    if let Some(path) = options.log_file {
        match open_log_file(path) {
            Ok(file) => layers.push(file_layer(file, options)),
            Err(e) => open_error = Some((path, e)),
        }
    }
    let file_active = options.log_file.is_some() && open_error.is_none();

    let _ = tracing_subscriber::registry().with(layers).try_init();

    if let Some((path, e)) = open_error {
        error!(path = %path.display(), error = %e, "Couldn't create log file");
    }
    file_active
}

fn file_layer(file: File, options: &LoggingOptions<'_>) -> BoxedLayer {
    let level = if options.debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let writer = Mutex::new(file);

    match options.format {
        LogFormat::Text => fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(level)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_filter(level)
            .boxed(),
    }
}

/// Open `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}
