//! The process-wide alias registry
//!
//! These tests mutate global state, so they live in their own test binary and take a
//! lock to run one at a time.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Map, Value};
use sluice::{aliases, filter, filter_value, Error, Filter, FilterOptions, Specification};

static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    aliases::reset();
    guard
}

fn slug(value: &Value, _args: &[Value]) -> Result<Value, Error> {
    match value {
        Value::String(s) => Ok(Value::String(s.trim().to_lowercase().replace(' ', "-"))),
        other => Err(Error::filter(format!("Value '{}' is not a string", other))),
    }
}

#[test]
fn test_registered_alias_is_seen_by_later_calls() {
    let _guard = serial();
    let spec = json!({"title": [["slug"]]});
    let input = json!({"title": " Hello World "});

    assert!(matches!(
        filter_value(&spec, &input, &Value::Null),
        Err(Error::Domain(_))
    ));

    aliases::register("slug", slug, false).unwrap();
    let response = filter_value(&spec, &input, &Value::Null).unwrap();
    assert_eq!(
        response.filtered_value().unwrap()["title"],
        json!("hello-world")
    );
}

#[test]
fn test_builtin_collision_needs_overwrite() {
    let _guard = serial();
    assert_eq!(
        aliases::register("int", slug, false).unwrap_err(),
        Error::domain("Alias 'int' exists")
    );

    aliases::register("int", slug, true).unwrap();
    let response = filter_value(&json!({"n": [["int"]]}), &json!({"n": "A B"}), &Value::Null)
        .unwrap();
    assert_eq!(response.filtered_value().unwrap()["n"], json!("a-b"));
}

#[test]
fn test_replace_all_failure_keeps_previous_registry() {
    let _guard = serial();
    let filter_fn: Arc<dyn Filter> = Arc::new(slug);

    let err = aliases::replace_all(vec![
        ("one", Arc::clone(&filter_fn)),
        ("one", Arc::clone(&filter_fn)),
    ])
    .unwrap_err();
    assert_eq!(err, Error::domain("Alias 'one' exists"));
    assert!(aliases::shared().contains("int"));
    assert!(!aliases::shared().contains("one"));

    aliases::replace_all(vec![("one", filter_fn)]).unwrap();
    let current = aliases::shared();
    assert_eq!(current.len(), 1);
    assert!(!current.contains("int"));
}

#[test]
fn test_snapshots_are_isolated_from_later_changes() {
    let _guard = serial();
    let snapshot = aliases::shared();
    aliases::register("slug", slug, false).unwrap();

    assert!(!snapshot.contains("slug"));
    assert!(aliases::shared().contains("slug"));
}

#[test]
fn test_reset_restores_builtins() {
    let _guard = serial();
    let filter_fn: Arc<dyn Filter> = Arc::new(slug);
    aliases::replace_all(vec![("only", filter_fn)]).unwrap();
    aliases::reset();

    let spec = Specification::from_value(&json!({"n": [["int"]]})).unwrap();
    let mut input = Map::new();
    input.insert("n".into(), json!("5"));
    let response = filter(&spec, &input, FilterOptions::default()).unwrap();
    assert_eq!(response.filtered_value().unwrap()["n"], json!(5));
}

#[test]
fn test_integer_alias_names() {
    let _guard = serial();
    aliases::register(7i64, slug, false).unwrap();
    let response =
        filter_value(&json!({"s": [[7]]}), &json!({"s": "X Y"}), &Value::Null).unwrap();
    assert_eq!(response.filtered_value().unwrap()["s"], json!("x-y"));
}
