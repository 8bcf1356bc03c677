//! On-disk config formats.
//!
//! A [`FileFormat`] moves a [`RawConfig`] to and from a file. Formats know
//! nothing about parameter types; the registry coerces values before a save
//! and after a load.
//!
//! Two formats ship with every registry:
//!
//! - `conf` ([`PlainTextFormat`]): one `<Name> <value>` per line, `#` comments,
//!   repeated names form a list.
//! - `json` ([`JsonFormat`]): a single object of strings and string arrays.
//!
//! More can be added per registry with
//! [`ParamRegistry::register_format`](super::ParamRegistry::register_format).

mod json;
mod plain;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{PanelError, Result};

use super::value::RawConfig;

pub use json::JsonFormat;
pub use plain::PlainTextFormat;

/// Format name of [`PlainTextFormat`].
pub const PLAIN_FORMAT: &str = "conf";

/// Format name of [`JsonFormat`].
pub const JSON_FORMAT: &str = "json";

/// Serializer/deserializer between a file and a flat raw mapping.
#[cfg_attr(test, mockall::automock)]
pub trait FileFormat: Send + Sync {
    /// Write `data` to `path`. Implementations must not leave a partially
    /// written file at `path`; see [`write_atomic`].
    fn save(&self, path: &Path, data: &RawConfig) -> Result<()>;

    /// Read `path` into a raw mapping.
    fn load(&self, path: &Path) -> Result<RawConfig>;
}

/// Write `contents` to `path` through a temp file in the same directory,
/// then rename it over the destination.
///
/// The rename is the commit point: readers see either the old file or the
/// complete new one. The temp file is removed on every early return.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| {
        PanelError::Format(format!(
            "Failed to create temp file in {}: {}",
            dir.display(),
            e
        ))
    })?;

    temp.write_all(contents)?;
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| {
        PanelError::Format(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;

    Ok(())
}
