//! The typed parameter registry.
//!
//! A [`ParamRegistry`] owns the parameters of one config file: their
//! declared types and defaults, and any current values. Declarations come
//! from a [`ConfigSchema`] supplied at construction, which is (re)applied
//! whenever the registry is initialized: once at construction and again at
//! the start of every [`load`](ParamRegistry::load).
//!
//! Values are stored exactly as set. Coercion only happens at the file
//! boundary: [`from_string_form`](ParamRegistry::from_string_form) after a
//! load and [`to_string_form`](ParamRegistry::to_string_form) before a save.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{PanelError, Result};

use super::format::{FileFormat, JsonFormat, PlainTextFormat, JSON_FORMAT, PLAIN_FORMAT};
use super::key::ParamKey;
use super::schema::{ParamSpec, ParamType};
use super::value::{to_boolean, ParamValue, RawConfig, RawValue};

/// Declares the parameters of a registry.
///
/// Implemented by the config kinds in this crate and by any
/// `Fn(&mut ParamRegistry)` closure:
///
/// ```rust
/// use panelkit::config::{ParamRegistry, ParamType};
///
/// let registry = ParamRegistry::new("/tmp/demo.conf", "conf", |params: &mut ParamRegistry| {
///     params.declare("Port", ParamType::Int, Some(8080.into()));
///     params.declare("Env", ParamType::StrList, None);
/// });
/// assert_eq!(registry.get_int("port"), Some(8080));
/// ```
pub trait ConfigSchema: Send + Sync {
    fn declare(&self, params: &mut ParamRegistry);
}

impl<F> ConfigSchema for F
where
    F: Fn(&mut ParamRegistry) + Send + Sync,
{
    fn declare(&self, params: &mut ParamRegistry) {
        self(params)
    }
}

/// Schema with no declarations; every parameter is untyped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchema;

impl ConfigSchema for NoSchema {
    fn declare(&self, _params: &mut ParamRegistry) {}
}

/// What a call to [`ParamRegistry::load_status`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file was read and its values applied.
    Loaded,
    /// No file existed; one was written with the declared defaults.
    Seeded,
    /// No file existed and writing one failed.
    SeedFailed,
    /// The file exists but could not be read or parsed.
    Failed,
}

impl LoadStatus {
    pub fn is_loaded(self) -> bool {
        self == LoadStatus::Loaded
    }
}

#[derive(Debug, Clone)]
struct ParamEntry {
    spec: ParamSpec,
    value: Option<ParamValue>,
}

impl ParamEntry {
    fn effective(&self) -> Option<&ParamValue> {
        self.value.as_ref().or(self.spec.default.as_ref())
    }
}

/// Registry of named, typed parameters backed by one config file.
pub struct ParamRegistry {
    path: PathBuf,
    format: String,
    formats: HashMap<String, Arc<dyn FileFormat>>,
    schema: Arc<dyn ConfigSchema>,
    entries: Vec<ParamEntry>,
    index: HashMap<ParamKey, usize>,
    initialized: bool,
}

impl ParamRegistry {
    /// Create a registry for `path` in the named format, declared by `schema`.
    ///
    /// The `conf` and `json` formats are always registered. The format name
    /// is not checked here; an unknown name fails at the first load or save.
    pub fn new(
        path: impl Into<PathBuf>,
        format: &str,
        schema: impl ConfigSchema + 'static,
    ) -> Self {
        let mut registry = Self {
            path: path.into(),
            format: format.to_lowercase(),
            formats: HashMap::new(),
            schema: Arc::new(schema),
            entries: Vec::new(),
            index: HashMap::new(),
            initialized: false,
        };
        registry
            .register_format(PLAIN_FORMAT, PlainTextFormat)
            .register_format(JSON_FORMAT, JsonFormat);
        registry.ensure_initialized();
        registry
    }

    /// Create a registry with no declared parameters.
    pub fn untyped(path: impl Into<PathBuf>, format: &str) -> Self {
        Self::new(path, format, NoSchema)
    }

    /// Register (or replace) a file format under a case-insensitive name.
    pub fn register_format(
        &mut self,
        name: &str,
        format: impl FileFormat + 'static,
    ) -> &mut Self {
        self.formats.insert(name.to_lowercase(), Arc::new(format));
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    // ------------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------------

    /// Run the schema once per initialization epoch.
    ///
    /// The flag is set before the schema runs so a schema that reads or
    /// declares through the registry does not re-enter itself.
    fn ensure_initialized(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        let schema = Arc::clone(&self.schema);
        schema.declare(self);
    }

    /// Drop every declaration and value and rebuild from the schema.
    fn reset(&mut self) {
        self.initialized = false;
        self.entries.clear();
        self.index.clear();
        self.ensure_initialized();
    }

    /// Declare a parameter, or update the type and default of an existing
    /// one. A current value survives re-declaration.
    pub fn declare(
        &mut self,
        name: &str,
        ty: ParamType,
        default: Option<ParamValue>,
    ) -> &mut Self {
        let spec = ParamSpec::new(name, ty, default);
        match self.index.get(&spec.key) {
            Some(&i) => self.entries[i].spec = spec,
            None => self.push_entry(spec, None),
        }
        self
    }

    fn push_entry(&mut self, spec: ParamSpec, value: Option<ParamValue>) {
        self.index.insert(spec.key.clone(), self.entries.len());
        self.entries.push(ParamEntry { spec, value });
    }

    fn entry(&self, name: &str) -> Option<&ParamEntry> {
        self.index
            .get(&ParamKey::new(name))
            .map(|&i| &self.entries[i])
    }

    /// True if `name` has been declared (explicitly, by `set_param`, or by
    /// appearing in a loaded file), whether or not it has a value.
    pub fn has_param(&self, name: &str) -> bool {
        self.index.contains_key(&ParamKey::new(name))
    }

    /// Declared type of `name`; undeclared names are untyped.
    pub fn param_type(&self, name: &str) -> ParamType {
        self.entry(name).map(|e| e.spec.ty).unwrap_or_default()
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    /// Current value of `name`, else its declared default, else `None`.
    pub fn get_param(&self, name: &str) -> Option<&ParamValue> {
        self.entry(name).and_then(ParamEntry::effective)
    }

    /// Store `value` as-is. Setting `ParamValue::Null` clears the value.
    /// An undeclared name is declared untyped.
    pub fn set_param(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.ensure_initialized();
        let value: ParamValue = value.into();
        let value = Some(value).filter(|v| !v.is_null());
        let key = ParamKey::new(name);
        match self.index.get(&key) {
            Some(&i) => self.entries[i].value = value,
            None => self.push_entry(ParamSpec::untyped(name), value),
        }
    }

    /// Effective value rendered as text. Lists render their last element.
    pub fn get_string(&self, name: &str) -> Option<String> {
        match self.get_param(name)? {
            ParamValue::Null => None,
            ParamValue::List(items) => items.last().cloned(),
            other => Some(other.to_string()),
        }
    }

    /// Effective value as an integer, parsing text when needed.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match self.get_param(name)? {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Bool(b) => Some(i64::from(*b)),
            ParamValue::Float(x) => Some(*x as i64),
            ParamValue::Str(s) => Some(parse_int_prefix(s)),
            ParamValue::List(items) => items.last().map(|s| parse_int_prefix(s)),
            ParamValue::Null => None,
        }
    }

    /// Effective value through [`to_boolean`]; absent is false.
    pub fn get_bool(&self, name: &str) -> bool {
        self.get_param(name).map(to_boolean).unwrap_or(false)
    }

    /// Effective value as a list. A scalar becomes a one-element list and
    /// an absent value an empty one.
    pub fn get_list(&self, name: &str) -> Vec<String> {
        match self.get_param(name) {
            None | Some(ParamValue::Null) => Vec::new(),
            Some(ParamValue::List(items)) => items.clone(),
            Some(other) => vec![other.to_string()],
        }
    }

    /// Declared name and effective value of every parameter, in
    /// declaration order. Parameters with neither value nor default are
    /// skipped.
    pub fn params(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .filter_map(|e| e.effective().map(|v| (e.spec.name.as_str(), v)))
    }

    // ------------------------------------------------------------------------
    // Coercion
    // ------------------------------------------------------------------------

    /// Convert a raw file value to the declared type of `name`.
    ///
    /// Never fails: unparseable integers become 0.
    pub fn from_string_form(&self, name: &str, raw: RawValue) -> ParamValue {
        match self.param_type(name) {
            ParamType::Str => match raw {
                RawValue::Scalar(s) => ParamValue::Str(s),
                RawValue::List(items) => items
                    .last()
                    .cloned()
                    .map_or(ParamValue::Null, ParamValue::Str),
            },
            ParamType::Int => ParamValue::Int(raw.last().map(parse_int_prefix).unwrap_or(0)),
            ParamType::Bool => ParamValue::Bool(
                raw.last()
                    .map(|s| to_boolean(&ParamValue::from(s)))
                    .unwrap_or(false),
            ),
            ParamType::StrList => ParamValue::List(raw.into_list()),
            ParamType::Untyped => ParamValue::from(raw),
        }
    }

    /// Convert a value to its on-disk form. Booleans are written as
    /// `On`/`Off`; everything else keeps its shape. `Null` has no form.
    pub fn to_string_form(&self, name: &str, value: &ParamValue) -> Option<RawValue> {
        if let ParamType::Bool = self.param_type(name) {
            let text = if to_boolean(value) { "On" } else { "Off" };
            return Some(RawValue::Scalar(text.to_string()));
        }
        match value {
            ParamValue::Null => None,
            ParamValue::List(items) => Some(RawValue::List(items.clone())),
            other => Some(RawValue::Scalar(other.to_string())),
        }
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    fn reader(&self) -> Result<Arc<dyn FileFormat>> {
        self.formats
            .get(&self.format)
            .cloned()
            .ok_or_else(|| PanelError::UnsupportedFormat(self.format.clone()))
    }

    /// Reload from disk, discarding all in-memory values first.
    ///
    /// Returns `Ok(true)` only when the file was read. A missing file is
    /// seeded with the declared defaults and still reports `Ok(false)`, so
    /// callers should treat `false` as "running on defaults", not as fatal.
    /// The only `Err` is an unsupported format.
    pub fn load(&mut self) -> Result<bool> {
        Ok(self.load_status()?.is_loaded())
    }

    /// [`load`](Self::load) with the reason for a `false` spelled out.
    pub fn load_status(&mut self) -> Result<LoadStatus> {
        self.reset();
        let reader = self.reader()?;

        if !self.path.is_file() {
            return Ok(if self.seed(reader.as_ref()) {
                info!(path = %self.path.display(), "Seeded missing config file with defaults");
                LoadStatus::Seeded
            } else {
                LoadStatus::SeedFailed
            });
        }

        let data = match reader.load(&self.path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to load config");
                return Ok(LoadStatus::Failed);
            }
        };

        for (name, raw) in data {
            let value = self.from_string_form(&name, raw);
            self.set_param(&name, value);
        }
        debug!(path = %self.path.display(), params = self.entries.len(), "Loaded config");
        Ok(LoadStatus::Loaded)
    }

    /// Write every explicitly set value. Parameters that only have a
    /// default are not written.
    pub fn save(&mut self) -> Result<bool> {
        self.ensure_initialized();
        let reader = self.reader()?;
        let data = self.collect(|entry| entry.value.as_ref());
        Ok(self.write(reader.as_ref(), &data))
    }

    /// First-run write: explicit values and declared defaults.
    fn seed(&self, reader: &dyn FileFormat) -> bool {
        let data = self.collect(|entry| {
            entry
                .effective()
                .filter(|v| !matches!(v, ParamValue::List(items) if items.is_empty()))
        });
        self.write(reader, &data)
    }

    fn collect<'a>(
        &'a self,
        pick: impl Fn(&'a ParamEntry) -> Option<&'a ParamValue>,
    ) -> RawConfig {
        let mut data = RawConfig::new();
        for entry in &self.entries {
            let Some(value) = pick(entry) else { continue };
            if let Some(raw) = self.to_string_form(&entry.spec.name, value) {
                data.insert(entry.spec.name.clone(), raw);
            }
        }
        data
    }

    fn write(&self, reader: &dyn FileFormat, data: &RawConfig) -> bool {
        match reader.save(&self.path, data) {
            Ok(()) => {
                debug!(path = %self.path.display(), params = data.len(), "Saved config");
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to save config");
                false
            }
        }
    }
}

impl std::fmt::Debug for ParamRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamRegistry")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

/// Parse the leading signed integer of `s`, or 0 if there is none.
fn parse_int_prefix(s: &str) -> i64 {
    let s = s.trim();
    let digits_start = usize::from(s.starts_with(['-', '+']));
    let end = s[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(s.len(), |i| i + digits_start);
    s[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::format::MockFileFormat;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn test_schema(params: &mut ParamRegistry) {
        params.declare("Port", ParamType::Int, None);
        params.declare("Env", ParamType::StrList, None);
        params.declare("Option", ParamType::StrList, None);
    }

    fn temp_registry(file: &str) -> (ParamRegistry, TempDir) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let registry = ParamRegistry::new(dir.path().join(file), PLAIN_FORMAT, test_schema);
        (registry, dir)
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("9876"), 9876);
        assert_eq!(parse_int_prefix(" -12abc"), -12);
        assert_eq!(parse_int_prefix("+7"), 7);
        assert_eq!(parse_int_prefix("abc"), 0);
        assert_eq!(parse_int_prefix(""), 0);
        assert_eq!(parse_int_prefix("-"), 0);
    }

    #[test]
    fn test_declared_list_defaults_to_empty() {
        let (registry, _dir) = temp_registry("test.conf");
        assert_eq!(registry.get_param("Env"), Some(&ParamValue::List(vec![])));
        assert!(registry.get_list("Option").is_empty());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let (mut registry, _dir) = temp_registry("test.conf");
        registry.set_param("PORT", 42);
        assert_eq!(registry.get_param("port"), Some(&ParamValue::Int(42)));
        assert!(registry.has_param("pOrT"));
    }

    #[test]
    fn test_get_param_prefers_value_over_default() {
        let (mut registry, _dir) = temp_registry("test.conf");
        registry.declare("Host", ParamType::Str, Some("localhost".into()));
        assert_eq!(registry.get_string("Host").as_deref(), Some("localhost"));

        registry.set_param("host", "db.example");
        assert_eq!(registry.get_string("Host").as_deref(), Some("db.example"));

        registry.set_param("host", ParamValue::Null);
        assert_eq!(registry.get_string("Host").as_deref(), Some("localhost"));
    }

    #[test]
    fn test_undeclared_param() {
        let (mut registry, _dir) = temp_registry("test.conf");
        assert!(!registry.has_param("Host"));
        assert!(registry.get_param("Host").is_none());
        assert_eq!(registry.param_type("Host"), ParamType::Untyped);

        registry.set_param("Host", "localhost");
        assert!(registry.has_param("Host"));
        assert_eq!(registry.param_type("Host"), ParamType::Untyped);
    }

    #[test]
    fn test_set_param_does_not_coerce() {
        let (mut registry, _dir) = temp_registry("test.conf");
        registry.set_param("Port", "not-a-number");
        assert_eq!(
            registry.get_param("Port"),
            Some(&ParamValue::Str("not-a-number".into()))
        );
    }

    #[test]
    fn test_redeclare_keeps_value() {
        let (mut registry, _dir) = temp_registry("test.conf");
        registry.set_param("Port", 1);
        registry.declare("port", ParamType::Int, Some(2.into()));
        assert_eq!(registry.get_int("Port"), Some(1));
    }

    #[test]
    fn test_from_string_form() {
        let (mut registry, _dir) = temp_registry("test.conf");
        registry.declare("Debug", ParamType::Bool, None);
        registry.declare("Host", ParamType::Str, None);

        assert_eq!(registry.from_string_form("Port", "9876".into()), ParamValue::Int(9876));
        assert_eq!(registry.from_string_form("Port", "junk".into()), ParamValue::Int(0));
        assert_eq!(registry.from_string_form("Debug", "On".into()), ParamValue::Bool(true));
        assert_eq!(registry.from_string_form("Debug", "off".into()), ParamValue::Bool(false));
        assert_eq!(
            registry.from_string_form("Host", vec!["a", "b"].into()),
            ParamValue::Str("b".into())
        );
        assert_eq!(
            registry.from_string_form("Env", "ONE=1".into()),
            ParamValue::List(vec!["ONE=1".into()])
        );
        assert_eq!(
            registry.from_string_form("Unknown", vec!["x", "y"].into()),
            ParamValue::List(vec!["x".into(), "y".into()])
        );
    }

    #[test]
    fn test_to_string_form() {
        let (mut registry, _dir) = temp_registry("test.conf");
        registry.declare("Debug", ParamType::Bool, None);

        assert_eq!(
            registry.to_string_form("Debug", &ParamValue::Bool(true)),
            Some(RawValue::from("On"))
        );
        assert_eq!(
            registry.to_string_form("Debug", &"no".into()),
            Some(RawValue::from("Off"))
        );
        assert_eq!(
            registry.to_string_form("Port", &ParamValue::Int(1234)),
            Some(RawValue::from("1234"))
        );
        assert_eq!(
            registry.to_string_form("Env", &vec!["A=1"].into()),
            Some(RawValue::from(vec!["A=1"]))
        );
        assert_eq!(registry.to_string_form("Port", &ParamValue::Null), None);
    }

    #[test]
    fn test_schema_runs_once_per_epoch() {
        let dir = TempDir::new().unwrap();
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let mut registry = ParamRegistry::new(
            dir.path().join("count.conf"),
            PLAIN_FORMAT,
            move |params: &mut ParamRegistry| {
                counter.fetch_add(1, Ordering::SeqCst);
                params.declare("Port", ParamType::Int, None);
            },
        );
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        registry.set_param("Port", 1);
        registry.save().unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 1);

        registry.load().unwrap();
        registry.load().unwrap();
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_schema_may_query_registry() {
        let dir = TempDir::new().unwrap();
        let registry = ParamRegistry::new(
            dir.path().join("nested.conf"),
            PLAIN_FORMAT,
            |params: &mut ParamRegistry| {
                params.declare("Host", ParamType::Str, Some("localhost".into()));
                let host = params.get_string("Host").unwrap_or_default();
                params.set_param("Origin", format!("http://{}", host));
            },
        );
        assert_eq!(
            registry.get_string("Origin").as_deref(),
            Some("http://localhost")
        );
    }

    #[test]
    fn test_unsupported_format_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut registry = ParamRegistry::new(dir.path().join("x.yaml"), "yaml", test_schema);

        assert!(matches!(registry.load(), Err(PanelError::UnsupportedFormat(f)) if f == "yaml"));
        assert!(matches!(registry.save(), Err(PanelError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_register_format_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("x.txt");
        let mut registry = ParamRegistry::new(&path, "TXT", test_schema);
        registry.register_format("Txt", PlainTextFormat);

        registry.set_param("Port", 5);
        assert!(registry.save().unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Port 5\n");
    }

    #[test]
    fn test_load_reports_reader_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.conf");
        std::fs::write(&path, "Port 1\n").unwrap();

        let mut reader = MockFileFormat::new();
        reader
            .expect_load()
            .times(1)
            .returning(|_| Err(PanelError::Format("corrupt".into())));

        let mut registry = ParamRegistry::new(&path, "mock", test_schema);
        registry.register_format("mock", reader);

        assert_eq!(registry.load_status().unwrap(), LoadStatus::Failed);
        assert!(registry.get_int("Port").is_none());
    }

    #[test]
    fn test_save_reports_writer_failure() {
        let dir = TempDir::new().unwrap();
        let mut reader = MockFileFormat::new();
        reader
            .expect_save()
            .times(1)
            .returning(|_, _| Err(PanelError::Format("disk full".into())));

        let mut registry = ParamRegistry::new(dir.path().join("x.conf"), "mock", test_schema);
        registry.register_format("mock", reader);
        registry.set_param("Port", 1);

        assert!(!registry.save().unwrap());
    }

    #[test]
    fn test_load_stores_undeclared_keys() {
        let (mut registry, _dir) = temp_registry("test.conf");
        std::fs::write(registry.path(), "Host localhost\nExtra a\nExtra b\n").unwrap();

        assert!(registry.load().unwrap());
        assert_eq!(registry.get_param("Host"), Some(&ParamValue::Str("localhost".into())));
        assert_eq!(registry.get_list("extra"), vec!["a", "b"]);
        assert!(registry.has_param("Extra"));
    }

    #[test]
    fn test_load_discards_unsaved_values() {
        let (mut registry, _dir) = temp_registry("test.conf");
        std::fs::write(registry.path(), "Port 1\n").unwrap();

        registry.set_param("Port", 99);
        registry.set_param("Scratch", "x");
        assert!(registry.load().unwrap());

        assert_eq!(registry.get_int("Port"), Some(1));
        assert!(!registry.has_param("Scratch"));
    }

    #[test]
    fn test_load_missing_file_seeds_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.conf");
        let mut registry = ParamRegistry::new(&path, PLAIN_FORMAT, |p: &mut ParamRegistry| {
            p.declare("Host", ParamType::Str, Some("localhost".into()));
            p.declare("Debug", ParamType::Bool, Some(false.into()));
            p.declare("Password", ParamType::Str, None);
            p.declare("Env", ParamType::StrList, None);
        });

        assert_eq!(registry.load_status().unwrap(), LoadStatus::Seeded);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Host localhost\nDebug Off\n"
        );
    }

    #[test]
    fn test_load_missing_directory_seed_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("fresh.conf");
        let mut registry = ParamRegistry::new(&path, PLAIN_FORMAT, test_schema);

        assert_eq!(registry.load_status().unwrap(), LoadStatus::SeedFailed);
        assert!(!registry.load().unwrap());
    }

    #[test]
    fn test_params_iterates_in_declaration_order() {
        let (mut registry, _dir) = temp_registry("test.conf");
        registry.set_param("Port", 80);
        registry.set_param("Host", "h");

        let names: Vec<&str> = registry.params().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Port", "Env", "Option", "Host"]);
    }
}
