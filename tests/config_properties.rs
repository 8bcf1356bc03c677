//! End-to-end behavior of config files through the public API.

use std::fs;
use std::path::Path;

use panelkit::config::{LoadStatus, ParamRegistry, ParamType, ParamValue};
use panelkit::to_boolean;
use tempfile::TempDir;

fn service_registry(path: &Path, format: &str) -> ParamRegistry {
    ParamRegistry::new(path, format, |p: &mut ParamRegistry| {
        p.declare("Port", ParamType::Int, None)
            .declare("Env", ParamType::StrList, None)
            .declare("Option", ParamType::StrList, None);
    })
}

fn env_list() -> Vec<String> {
    vec!["ONE=1".into(), "TWO=2".into(), "THREE=3".into()]
}

#[test]
fn test_round_trip_plain_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin.conf");

    let mut writer = service_registry(&path, "conf");
    writer.set_param("Port", 1234);
    writer.set_param("Env", env_list());
    assert!(writer.save().unwrap());

    let mut reader = service_registry(&path, "conf");
    assert!(reader.load().unwrap());
    assert_eq!(reader.get_param("Port"), Some(&ParamValue::Int(1234)));
    assert_eq!(reader.get_param("Env"), Some(&ParamValue::List(env_list())));
    assert_eq!(reader.get_list("Option"), Vec::<String>::new());
}

#[test]
fn test_round_trip_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin.json");

    let mut writer = service_registry(&path, "json");
    writer.set_param("Port", 1234);
    writer.set_param("Env", env_list());
    assert!(writer.save().unwrap());

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["Env"][1], "TWO=2");

    let mut reader = service_registry(&path, "json");
    assert!(reader.load().unwrap());
    assert_eq!(reader.get_int("Port"), Some(1234));
    assert_eq!(reader.get_list("Env"), env_list());
}

#[test]
fn test_load_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin.conf");
    fs::write(&path, "Port 80\nEnv A=1\nEnv B=2\n").unwrap();

    let mut registry = service_registry(&path, "conf");
    assert!(registry.load().unwrap());
    let first: Vec<(String, ParamValue)> = registry
        .params()
        .map(|(n, v)| (n.to_string(), v.clone()))
        .collect();

    assert!(registry.load().unwrap());
    let second: Vec<(String, ParamValue)> = registry
        .params()
        .map(|(n, v)| (n.to_string(), v.clone()))
        .collect();

    assert_eq!(first, second);
    assert_eq!(registry.get_list("Env"), vec!["A=1", "B=2"]);
}

#[test]
fn test_missing_file_is_seeded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin.conf");

    let mut registry = ParamRegistry::new(&path, "conf", |p: &mut ParamRegistry| {
        p.declare("Host", ParamType::Str, Some("localhost".into()));
    });

    assert!(!registry.load().unwrap());
    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "Host localhost\n");
    assert_eq!(registry.load_status().unwrap(), LoadStatus::Loaded);
}

#[test]
fn test_boolean_table() {
    let truthy = [
        ParamValue::Bool(true),
        ParamValue::Int(1),
        ParamValue::Float(1.0),
        "1".into(),
        "1.0".into(),
        "on".into(),
        "On".into(),
        "y".into(),
        "Yes".into(),
    ];
    let falsy = [
        ParamValue::Bool(false),
        ParamValue::Null,
        ParamValue::List(Vec::new()),
        ParamValue::Int(0),
        ParamValue::Float(0.0),
        "0".into(),
        "0.0".into(),
        "n".into(),
        "N".into(),
        "No".into(),
    ];

    for value in &truthy {
        assert!(to_boolean(value), "expected {:?} to be true", value);
    }
    for value in &falsy {
        assert!(!to_boolean(value), "expected {:?} to be false", value);
    }
}

#[test]
fn test_list_default_is_empty_list() {
    let dir = TempDir::new().unwrap();
    let registry = service_registry(&dir.path().join("plugin.conf"), "conf");

    assert_eq!(registry.get_param("Env"), Some(&ParamValue::List(Vec::new())));
}

#[test]
fn test_comments_and_blank_lines_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.conf");
    fs::write(&path, "# comment\n\n   \nHost localhost\n  # indented comment\n").unwrap();

    let mut registry = ParamRegistry::untyped(&path, "conf");
    assert!(registry.load().unwrap());

    assert_eq!(registry.get_string("Host").as_deref(), Some("localhost"));
    assert_eq!(registry.params().count(), 1);
}

#[test]
fn test_invalid_utf8_line_does_not_fail_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("panel.conf");
    fs::write(&path, b"# Caf\xe9 settings\nHost db.internal\n").unwrap();

    let mut registry = ParamRegistry::new(&path, "conf", |p: &mut ParamRegistry| {
        p.declare("Host", ParamType::Str, Some("localhost".into()));
    });

    assert!(registry.load().unwrap());
    assert_eq!(registry.get_string("Host").as_deref(), Some("db.internal"));
}

#[test]
fn test_save_omits_unset_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin.conf");

    let mut registry = ParamRegistry::new(&path, "conf", |p: &mut ParamRegistry| {
        p.declare("Host", ParamType::Str, Some("localhost".into()))
            .declare("User", ParamType::Str, None);
    });
    registry.set_param("User", "admin");
    assert!(registry.save().unwrap());

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "User admin\n");
    assert!(!contents.contains("Host"));
}

#[test]
fn test_names_are_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("plugin.conf");
    fs::write(&path, "port 8080\nDEBUG yes\n").unwrap();

    let mut registry = ParamRegistry::new(&path, "conf", |p: &mut ParamRegistry| {
        p.declare("Port", ParamType::Int, None)
            .declare("Debug", ParamType::Bool, Some(false.into()));
    });
    assert!(registry.load().unwrap());

    assert_eq!(registry.get_int("PORT"), Some(8080));
    assert!(registry.get_bool("debug"));
}
