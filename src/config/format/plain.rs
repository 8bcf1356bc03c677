//! Line-oriented `<Name> <value>` format.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::value::{RawConfig, RawValue};
use crate::error::{PanelError, Result};

use super::{write_atomic, FileFormat};

/// Plain-text config format used by the panel itself.
///
/// ```text
/// # comment
/// Host localhost
/// Env ONE=1
/// Env TWO=2
/// ```
///
/// Blank lines and `#` lines are skipped. The first whitespace (space or
/// tab) splits the name from the rest of the line; a line with only a name
/// has an empty value. A name repeated on several lines loads as a list in
/// file order, and a list saves as one line per element. Lines that are not
/// valid UTF-8 are skipped on their own; the rest of the file still loads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextFormat;

impl PlainTextFormat {
    pub fn parse(content: &str) -> RawConfig {
        let mut data = RawConfig::new();
        for line in content.lines() {
            parse_line(&mut data, line);
        }
        data
    }

    /// Parse raw file bytes line by line.
    pub fn parse_bytes(content: &[u8]) -> RawConfig {
        let mut data = RawConfig::new();
        for (number, line) in content.split(|b| *b == b'\n').enumerate() {
            match std::str::from_utf8(line) {
                Ok(line) => parse_line(&mut data, line),
                Err(e) => debug!(line = number + 1, error = %e, "Skipping non UTF-8 line"),
            }
        }
        data
    }

    pub fn render(data: &RawConfig) -> String {
        let mut out = String::new();
        for (name, value) in data.iter() {
            match value {
                RawValue::Scalar(v) => push_line(&mut out, name, v),
                RawValue::List(items) => {
                    for v in items {
                        push_line(&mut out, name, v);
                    }
                }
            }
        }
        out
    }
}

fn parse_line(data: &mut RawConfig, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }

    let (name, value) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    data.append(name, value.to_string());
}

fn push_line(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    if !value.is_empty() {
        out.push(' ');
        out.push_str(value);
    }
    out.push('\n');
}

impl FileFormat for PlainTextFormat {
    fn save(&self, path: &Path, data: &RawConfig) -> Result<()> {
        write_atomic(path, Self::render(data).as_bytes())
    }

    fn load(&self, path: &Path) -> Result<RawConfig> {
        if !path.is_file() {
            return Err(PanelError::Format(format!(
                "Config file {} does not exist",
                path.display()
            )));
        }

        let content = fs::read(path).map_err(|e| {
            PanelError::Format(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let data = Self::parse_bytes(&content);
        debug!(path = %path.display(), params = data.len(), "Parsed plain-text config");
        Ok(data)
    }
}
