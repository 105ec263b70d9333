// SPDX-License-Identifier: MIT

//! Integration tests for the configuration binder.
//!
//! These tests exercise the full binder contract through a realistic schema:
//! defaults, validation rules (primitive, nested and instance-of), custom
//! setter dispatch, conventional setters, direct field slots, and the
//! raw-snapshot semantics of `get`/`has`/`set`.

use dotcfg::prelude::*;

/// An application object carried through the configuration.
struct Endpoint {
    url: String,
}

#[derive(Default)]
struct TestAppConfig {
    a_int: i64,
    b_bool: bool,
    c_obj: Option<ConfigValue>,
    d_arr: Vec<ConfigValue>,
    d_arr_via_setter: bool,
}

impl ConfigSchema for TestAppConfig {
    fn defaults() -> ConfigMap {
        let mut defaults = ConfigMap::new();
        defaults.insert("a_int", 100);
        defaults
    }

    fn validation_rules() -> FieldRules {
        FieldRules::new()
            .with("a_int", TypeRule::Primitive(ValueKind::Int))
            .with("b_bool", TypeRule::Primitive(ValueKind::Bool))
            .with("c_obj", TypeRule::instance_of::<Endpoint>())
            .with("d_arr", TypeRule::Primitive(ValueKind::Seq))
            .with("opts.retries", TypeRule::Primitive(ValueKind::Int))
            .with("opts.state", TypeRule::Primitive(ValueKind::Bool))
            .with("not_found_key", TypeRule::Primitive(ValueKind::Bool))
    }

    fn setter_maps() -> SetterMaps {
        SetterMaps::new().with("dArr", "set_array")
    }

    fn bind(registry: &mut BindingRegistry<Self>) {
        // Conventional setter for the aInt field.
        registry.setter("set_a_int", |state, value| {
            if let Some(n) = value.as_i64() {
                state.a_int = n;
            }
        });
        // Custom setter, dispatched through the setter map; stores the
        // sequence reversed to make the transformation observable.
        registry.setter("set_array", |state, value| {
            if let Some(items) = value.as_seq() {
                state.d_arr = items.iter().rev().cloned().collect();
            }
            state.d_arr_via_setter = true;
        });
        registry.field("bBool", |state, value| {
            if let Some(b) = value.as_bool() {
                state.b_bool = b;
            }
        });
        registry.field("cObj", |state, value| {
            state.c_obj = Some(value);
        });
    }
}

#[test]
fn test_constructor_with_empty_config_uses_defaults() {
    let cfg = Configuration::<TestAppConfig>::new(ConfigMap::new()).unwrap();

    assert_eq!(cfg.get("a_int").unwrap(), &ConfigValue::from(100));
    assert_eq!(cfg.state().a_int, 100);
}

#[test]
fn test_constructor_with_config_binds_every_field() {
    let mut supplied = ConfigMap::new();
    supplied.insert("a_int", 10);
    supplied.insert("b_bool", true);
    supplied.insert(
        "c_obj",
        ConfigValue::instance(Endpoint {
            url: "http://localhost".to_string(),
        }),
    );
    supplied.insert("d_arr", ConfigValue::from(vec![1, 2, 3]));

    let cfg = Configuration::<TestAppConfig>::new(supplied).unwrap();

    assert_eq!(cfg.get("a_int").unwrap(), &ConfigValue::from(10));
    assert_eq!(cfg.get("b_bool").unwrap(), &ConfigValue::from(true));
    assert_eq!(
        cfg.get("c_obj")
            .unwrap()
            .downcast_ref::<Endpoint>()
            .map(|e| e.url.as_str()),
        Some("http://localhost")
    );
    assert_eq!(cfg.get("d_arr").unwrap(), &ConfigValue::from(vec![1, 2, 3]));

    assert_eq!(cfg.state().a_int, 10);
    assert!(cfg.state().b_bool);
    assert!(cfg.state().c_obj.is_some());
}

#[test]
fn test_get_missing_key_names_the_path() {
    let cfg = Configuration::<TestAppConfig>::new(ConfigMap::new()).unwrap();

    let err = cfg.get("missing_key").unwrap_err();
    assert!(matches!(err, ConfigError::KeyNotFound { .. }));
    assert!(err.to_string().contains("missing_key"));
}

#[test]
fn test_float_against_integer_rule_is_fatal() {
    let mut supplied = ConfigMap::new();
    supplied.insert("a_int", 10.8);

    let err = Configuration::<TestAppConfig>::new(supplied).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    assert!(err.to_string().contains("a_int"));
    assert!(err.to_string().contains("integer"));
    assert!(err.to_string().contains("float"));
}

#[test]
fn test_scalar_against_instance_rule_is_fatal() {
    let mut supplied = ConfigMap::new();
    supplied.insert("c_obj", 123);

    let err = Configuration::<TestAppConfig>::new(supplied).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    assert!(err.to_string().contains("Endpoint"));
}

#[test]
fn test_wrong_instance_type_is_fatal() {
    struct Other;
    let mut supplied = ConfigMap::new();
    supplied.insert("c_obj", ConfigValue::instance(Other));

    let err = Configuration::<TestAppConfig>::new(supplied).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
}

#[test]
fn test_validation_runs_before_any_binding() {
    let mut cfg = Configuration::<TestAppConfig>::new(ConfigMap::new()).unwrap();

    let mut bad = ConfigMap::new();
    bad.insert("b_bool", true);
    bad.insert("a_int", 10.8);

    let err = cfg.load(bad).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    // The failing load must not have bound any field, not even the valid one.
    assert!(!cfg.state().b_bool);
}

#[test]
fn test_nested_rule_paths_validate() {
    let mut opts = ConfigMap::new();
    opts.set("retries", "three");
    let mut supplied = ConfigMap::new();
    supplied.insert("opts", opts);

    let err = Configuration::<TestAppConfig>::new(supplied).unwrap_err();
    assert!(err.to_string().contains("opts.retries"));

    let mut opts = ConfigMap::new();
    opts.set("retries", 3);
    opts.set("state", true);
    let mut supplied = ConfigMap::new();
    supplied.insert("opts", opts);

    let cfg = Configuration::<TestAppConfig>::new(supplied).unwrap();
    assert_eq!(cfg.get("opts.retries").unwrap(), &ConfigValue::from(3));
}

#[test]
fn test_rule_for_absent_key_is_skipped() {
    // "not_found_key" has a rule but never appears; loading must succeed.
    let cfg = Configuration::<TestAppConfig>::new(ConfigMap::new()).unwrap();
    assert!(!cfg.has("not_found_key"));
}

#[test]
fn test_setter_map_dispatch_transforms_value() {
    let mut supplied = ConfigMap::new();
    supplied.insert("d_arr", ConfigValue::from(vec![1, 2, 3]));

    let cfg = Configuration::<TestAppConfig>::new(supplied).unwrap();

    // The custom setter ran and stored its own transformation.
    assert!(cfg.state().d_arr_via_setter);
    assert_eq!(
        cfg.state().d_arr,
        vec![
            ConfigValue::from(3),
            ConfigValue::from(2),
            ConfigValue::from(1)
        ]
    );
    // The raw snapshot keeps the supplied value untouched.
    assert_eq!(cfg.get("d_arr").unwrap(), &ConfigValue::from(vec![1, 2, 3]));
}

#[test]
fn test_kebab_case_keys_bind_like_snake_case() {
    let mut supplied = ConfigMap::new();
    supplied.insert("b-bool", true);

    let cfg = Configuration::<TestAppConfig>::new(supplied).unwrap();
    assert!(cfg.state().b_bool);
}

#[test]
fn test_set_revalidates_only_the_touched_path() {
    let mut cfg = Configuration::<TestAppConfig>::new(ConfigMap::new()).unwrap();

    let err = cfg.set("c_obj", 123).unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    assert!(!cfg.has("c_obj"));

    // Other fields are untouched by the failed set.
    assert_eq!(cfg.get("a_int").unwrap(), &ConfigValue::from(100));

    cfg.set(
        "c_obj",
        ConfigValue::instance(Endpoint {
            url: "http://example".to_string(),
        }),
    )
    .unwrap();
    assert!(cfg.has("c_obj"));
}

#[test]
fn test_set_updates_snapshot_but_not_bound_field() {
    let mut cfg = Configuration::<TestAppConfig>::new(ConfigMap::new()).unwrap();

    cfg.set("a_int", 10).unwrap();

    // The raw snapshot is the source of truth for get; the field bound at
    // load time is deliberately left stale.
    assert_eq!(cfg.get("a_int").unwrap(), &ConfigValue::from(10));
    assert_eq!(cfg.state().a_int, 100);
}

#[test]
fn test_set_writes_dot_paths_into_snapshot() {
    let mut cfg = Configuration::<TestAppConfig>::new(ConfigMap::new()).unwrap();

    cfg.set("log.file.path", "/tmp/app.log").unwrap();
    assert_eq!(
        cfg.get("log.file.path").unwrap(),
        &ConfigValue::from("/tmp/app.log")
    );
    assert!(cfg.raw().has("log"));
}

#[test]
fn test_unbound_keys_stay_raw_only() {
    let mut supplied = ConfigMap::new();
    supplied.insert("unknown_key", "kept");

    let cfg = Configuration::<TestAppConfig>::new(supplied).unwrap();
    assert_eq!(cfg.get("unknown_key").unwrap(), &ConfigValue::from("kept"));
}

#[test]
fn test_minimal_schema_binds_nothing() {
    #[derive(Default)]
    struct Bare;
    impl ConfigSchema for Bare {}

    let mut supplied = ConfigMap::new();
    supplied.insert("anything", 1.25);

    let cfg = Configuration::<Bare>::new(supplied).unwrap();
    assert_eq!(cfg.get("anything").unwrap(), &ConfigValue::from(1.25));
}

#[cfg(feature = "json")]
#[test]
fn test_binder_over_parsed_document() {
    let map = dotcfg::adapters::json::from_str(
        r#"{"a_int": 7, "b_bool": true, "opts": {"retries": 2}}"#,
    )
    .unwrap();

    let cfg = Configuration::<TestAppConfig>::new(map).unwrap();
    assert_eq!(cfg.state().a_int, 7);
    assert!(cfg.state().b_bool);
    assert_eq!(cfg.get("opts.retries").unwrap(), &ConfigValue::from(2));
}
