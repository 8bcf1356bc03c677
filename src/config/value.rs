//! Parameter values on both sides of the file boundary.
//!
//! [`ParamValue`] is the typed, in-memory view a registry hands to callers.
//! [`RawValue`] and [`RawConfig`] are the untyped view a file format reads
//! and writes: every value is a string or an ordered list of strings.
//! The registry's coercion functions are the only translation between the two.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::key::ParamKey;

// ============================================================================
// ParamValue
// ============================================================================

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// No value. Setting a parameter to `Null` clears it.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
}

impl ParamValue {
    /// Borrow the string payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the list payload, if this is a `List`.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<RawValue> for ParamValue {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Scalar(s) => ParamValue::Str(s),
            RawValue::List(items) => ParamValue::List(items),
        }
    }
}

/// Canonical truthy/falsy coercion.
///
/// - `Bool` is returned as-is, `Null` is false.
/// - Numbers are true when nonzero.
/// - Strings are compared case-insensitively: `on`, `yes`, `y` and `true`
///   are true; numeric strings are true when nonzero (`"1.0"` is true,
///   `"0.0"` is false); anything else is false.
/// - Lists are true when non-empty.
pub fn to_boolean(value: &ParamValue) -> bool {
    match value {
        ParamValue::Null => false,
        ParamValue::Bool(b) => *b,
        ParamValue::Int(n) => *n != 0,
        ParamValue::Float(x) => *x != 0.0,
        ParamValue::Str(s) => str_to_boolean(s),
        ParamValue::List(items) => !items.is_empty(),
    }
}

fn str_to_boolean(s: &str) -> bool {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "on" | "yes" | "y" | "true" => true,
        "" | "off" | "no" | "n" | "false" => false,
        other if is_decimal(other) => other.parse::<f64>().map(|x| x != 0.0).unwrap_or(false),
        _ => false,
    }
}

/// Optional sign, digits, at most one decimal point. Rejects `nan`, `inf`
/// and exponents.
fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let mut seen_digit = false;
    let mut seen_point = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => return false,
        }
    }
    seen_digit
}

// ============================================================================
// RawValue / RawConfig
// ============================================================================

/// An untyped value as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Scalar(String),
    /// A name that appears more than once (plain text) or an array (JSON).
    List(Vec<String>),
}

impl RawValue {
    /// The value as a list: a scalar becomes a one-element list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            RawValue::Scalar(s) => vec![s],
            RawValue::List(items) => items,
        }
    }

    /// The last written value. Repeated scalar keys resolve to their final line.
    pub fn last(&self) -> Option<&str> {
        match self {
            RawValue::Scalar(s) => Some(s),
            RawValue::List(items) => items.last().map(String::as_str),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Scalar(value.to_string())
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(value: Vec<&str>) -> Self {
        RawValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// A flat, ordered mapping from parameter name to raw value.
///
/// Names are kept exactly as written; first-seen order is preserved so a
/// saved file lists parameters in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    entries: Vec<(String, RawValue)>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `name`. A second occurrence (compared without
    /// case) turns the value into a list; later occurrences extend it.
    pub fn append(&mut self, name: &str, value: String) {
        let key = ParamKey::new(name);
        match self.entries.iter_mut().find(|(n, _)| ParamKey::new(n) == key) {
            Some((_, existing)) => {
                let mut items = std::mem::replace(existing, RawValue::List(Vec::new())).into_list();
                items.push(value);
                *existing = RawValue::List(items);
            }
            None => self.entries.push((name.to_string(), RawValue::Scalar(value))),
        }
    }

    /// Set `name` to `value`, replacing any previous value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: RawValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for RawConfig {
    type Item = (String, RawValue);
    type IntoIter = std::vec::IntoIter<(String, RawValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for RawConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
