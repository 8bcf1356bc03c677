//! JSON object format.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::config::value::{RawConfig, RawValue};
use crate::error::{PanelError, Result};

use super::{write_atomic, FileFormat};

/// A single JSON object mapping parameter names to strings or string arrays.
///
/// Saves are pretty-printed. On load, numbers and booleans are kept as their
/// JSON text and `null` entries are dropped; a document that is not an
/// object fails the load.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl JsonFormat {
    pub fn parse(content: &str) -> Result<RawConfig> {
        let document: Value = serde_json::from_str(content)?;
        let Value::Object(object) = document else {
            return Err(PanelError::Format(
                "JSON config must be an object of parameters".to_string(),
            ));
        };

        let mut data = RawConfig::new();
        for (name, value) in object {
            match value {
                Value::Null => continue,
                Value::Array(items) => {
                    let items = items.into_iter().filter_map(scalar_text).collect();
                    data.insert(name, RawValue::List(items));
                }
                other => match scalar_text(other) {
                    Some(text) => data.insert(name, RawValue::Scalar(text)),
                    None => debug!(param = %name, "Skipping nested JSON object"),
                },
            }
        }
        Ok(data)
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl FileFormat for JsonFormat {
    fn save(&self, path: &Path, data: &RawConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(path, json.as_bytes())
    }

    fn load(&self, path: &Path) -> Result<RawConfig> {
        let content = fs::read_to_string(path).map_err(|e| {
            PanelError::Format(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let data = Self::parse(&content)?;
        debug!(path = %path.display(), params = data.len(), "Parsed JSON config");
        Ok(data)
    }
}
