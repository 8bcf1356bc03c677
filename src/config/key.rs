//! Normalized parameter identity.

use std::fmt;

/// Lookup key for a parameter.
///
/// Parameter names are case-insensitive: `DBHost`, `dbhost` and `DBHOST`
/// all refer to the same entry. The key is lower-cased once on construction
/// so every map lookup compares normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamKey(String);

impl ParamKey {
    /// Normalize a parameter name into a lookup key.
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    /// The normalized (lower-case) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
