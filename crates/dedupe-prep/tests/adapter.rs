//! Tests for the field specification adapter.

use dedupe_prep::registry::TypeRegistry;
use dedupe_prep::{
    ColumnDescriptor, PrepError, VariableKind, VariableOptions, adapt, adapt_values, adapt_with,
};
use serde_json::json;

fn spec(entries: &[ColumnDescriptor]) -> Vec<ColumnDescriptor> {
    entries.to_vec()
}

#[test]
fn mixed_specification_keeps_order_and_options() {
    let descriptors = spec(&[
        "name".into(),
        ("lat_lon", "LatLong").into(),
        ("price", "Price", "has missing").into(),
    ]);
    let variables = adapt(&descriptors).expect("adapt");

    assert_eq!(variables.len(), 3);
    assert_eq!(variables[0].field(), "name");
    assert_eq!(variables[0].kind(), VariableKind::String);
    assert_eq!(variables[1].field(), "lat_lon");
    assert_eq!(variables[1].kind(), VariableKind::LatLong);
    assert_eq!(variables[1].options(), VariableOptions::default());
    assert_eq!(variables[2].field(), "price");
    assert!(variables[2].has_missing());
    assert!(!variables[2].crf());
}

#[test]
fn bare_name_equals_explicit_string() {
    let bare = adapt(&spec(&["col".into()])).expect("bare");
    let explicit = adapt(&spec(&[("col", "String").into()])).expect("explicit");
    assert_eq!(bare, explicit);
}

#[test]
fn categorical_without_categories_is_unsupported() {
    let err = adapt(&spec(&[("col", "Categorical").into()])).unwrap_err();
    assert!(matches!(err, PrepError::UnsupportedConfiguration { .. }));

    let err = adapt(&spec(&[("col", "Categorical", "has missing").into()])).unwrap_err();
    assert!(matches!(err, PrepError::UnsupportedConfiguration { .. }));
}

#[test]
fn unknown_type_is_rejected() {
    let err = adapt(&spec(&[("col", "NotARealType").into()])).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"unknown variable type 'NotARealType'");
}

#[test]
fn type_names_are_case_sensitive() {
    let err = adapt(&spec(&[("col", "string").into()])).unwrap_err();
    assert!(matches!(err, PrepError::UnknownType { .. }));
}

#[test]
fn crf_is_limited_to_string_kinds() {
    let variables = adapt(&spec(&[
        ("first", "String", "crf").into(),
        ("last", "ShortString", "crf").into(),
    ]))
    .expect("adapt");
    assert!(variables.iter().all(|var| var.crf()));

    let err = adapt(&spec(&[("col", "LatLong", "crf").into()])).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"column 'col': unsupported field property 'crf' for type LatLong"
    );
}

#[test]
fn first_failure_aborts_the_whole_list() {
    let err = adapt(&spec(&[
        "name".into(),
        ("city", "Bogus").into(),
        ("zip", "Exact", "nope").into(),
    ]))
    .unwrap_err();
    match err {
        PrepError::UnknownType { type_name } => assert_eq!(type_name, "Bogus"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn plugin_types_resolve_once_installed() {
    let mut registry = TypeRegistry::new();
    for kind in [
        VariableKind::Name,
        VariableKind::Address,
        VariableKind::DateTime,
        VariableKind::Number,
    ] {
        registry.install_plugin(kind);
    }
    let variables = adapt_with(
        &registry,
        &spec(&[
            ("full_name", "Name").into(),
            ("street", "Address", "has missing").into(),
            ("born", "DateTime").into(),
            ("age", "Number").into(),
        ]),
    )
    .expect("adapt");
    let kinds: Vec<_> = variables.iter().map(|var| var.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            VariableKind::Name,
            VariableKind::Address,
            VariableKind::DateTime,
            VariableKind::Number
        ]
    );
    assert!(variables[1].has_missing());
}

#[cfg(not(feature = "plugin-datetime"))]
#[test]
fn missing_plugin_points_to_the_package() {
    let err = adapt(&spec(&[("born", "DateTime").into()])).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"variable type 'DateTime' requires the optional plugin package 'dedupe-variable-datetime'; install it and enable the `plugin-datetime` feature"
    );
}

#[cfg(not(feature = "plugin-address"))]
#[test]
fn missing_plugin_with_flag_is_unavailable() {
    for flag in ["has missing", "fuzzy"] {
        let err = adapt(&spec(&[("street", "Address", flag).into()])).unwrap_err();
        match err {
            PrepError::UnavailableType {
                type_name,
                package,
                feature,
            } => {
                assert_eq!(type_name, "Address");
                assert_eq!(package, "dedupe-variable-address");
                assert_eq!(feature, "plugin-address");
            }
            other => panic!("unexpected error for {flag}: {other}"),
        }
    }
}

#[test]
fn categorical_flag_errors() {
    let err = adapt(&spec(&[("c", "Categorical", "fuzzy").into()])).unwrap_err();
    assert!(matches!(err, PrepError::UnsupportedFieldOption { .. }));
    let err = adapt(&spec(&[("c", "Categorical", "crf").into()])).unwrap_err();
    assert!(matches!(err, PrepError::UnsupportedFieldOption { .. }));
}

#[test]
fn missing_plugin_does_not_affect_core_types() {
    let variables = adapt(&spec(&[("city", "ShortString").into(), ("tags", "Set").into()]))
        .expect("core types resolve without plugins");
    assert_eq!(variables.len(), 2);
}

#[test]
fn json_specification_is_adapted() {
    let values = vec![
        json!("name"),
        json!(["city", "ShortString", "crf"]),
        json!(["seen", "Exists"]),
    ];
    let variables = adapt_values(&values).expect("adapt");
    assert_eq!(variables.len(), 3);
    assert!(variables[1].crf());
    assert_eq!(variables[2].kind(), VariableKind::Exists);
}

#[test]
fn malformed_json_entries_are_rejected() {
    for value in [json!(["only"]), json!(7), json!({"field": "a"}), json!(["a", "b", "c", "d"])] {
        let err = adapt_values(&[value.clone()]).unwrap_err();
        assert!(
            matches!(err, PrepError::MalformedDescriptor { .. }),
            "{value}: {err}"
        );
    }
}

#[test]
fn definitions_serialize_in_engine_format() {
    let variables = adapt(&spec(&[
        "name".into(),
        ("price", "Price", "has missing").into(),
        ColumnDescriptor::categorical("color", ["red", "blue"]),
    ]))
    .expect("adapt");
    let json = serde_json::to_value(&variables).expect("serialize");
    assert_eq!(
        json,
        json!([
            {"field": "name", "type": "String"},
            {"field": "price", "type": "Price", "has missing": true},
            {"field": "color", "type": "Categorical", "categories": ["red", "blue"]}
        ])
    );
}
