//! Parameter declarations.

use std::fmt;

use super::key::ParamKey;
use super::value::ParamValue;

/// Declared type of a parameter. Drives coercion at the file boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamType {
    /// Raw file values pass through unchanged.
    #[default]
    Untyped,
    Str,
    Int,
    /// Stored on disk as `On` / `Off`.
    Bool,
    /// Repeated lines in plain text, an array in JSON.
    StrList,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Untyped => "untyped",
            ParamType::Str => "string",
            ParamType::Int => "int",
            ParamType::Bool => "bool",
            ParamType::StrList => "string-list",
        };
        f.write_str(name)
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Name as declared; used verbatim when writing the file.
    pub name: String,
    pub key: ParamKey,
    pub ty: ParamType,
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    /// Build a spec. A `StrList` without a default gets an empty list so
    /// list parameters never read back as absent.
    pub fn new(name: &str, ty: ParamType, default: Option<ParamValue>) -> Self {
        let default = default.filter(|value| !value.is_null());
        let default = match ty {
            ParamType::StrList => default.or_else(|| Some(ParamValue::List(Vec::new()))),
            _ => default,
        };
        Self {
            name: name.trim().to_string(),
            key: ParamKey::new(name),
            ty,
            default,
        }
    }

    /// An untyped spec with no default, used for names seen only in a file
    /// or set without a declaration.
    pub fn untyped(name: &str) -> Self {
        Self::new(name, ParamType::Untyped, None)
    }
}
