//! Property tests for normalization and adaptation invariants.

use dedupe_prep::normalize::{clean_text, normalize_frame};
use dedupe_prep::{ColumnDescriptor, adapt};
use polars::prelude::{DataFrame, NamedFrom, Series};
use proptest::prelude::*;

fn descriptor_strategy() -> impl Strategy<Value = ColumnDescriptor> {
    let column = "[a-z_]{1,12}";
    let type_name = prop::sample::select(vec![
        "String",
        "ShortString",
        "Text",
        "Exact",
        "Set",
        "LatLong",
        "Price",
        "Exists",
    ]);
    prop_oneof![
        column.prop_map(ColumnDescriptor::column),
        (column, type_name.clone()).prop_map(|(c, t)| ColumnDescriptor::typed(c, t)),
        (column, type_name).prop_map(|(c, t)| ColumnDescriptor::with_option(c, t, "has missing")),
    ]
}

proptest! {
    #[test]
    fn clean_text_is_idempotent(raw in any::<String>()) {
        if let Some(once) = clean_text(&raw) {
            prop_assert_eq!(clean_text(&once), Some(once.clone()));
        }
    }

    #[test]
    fn cleaned_text_is_canonical(raw in any::<String>()) {
        if let Some(cleaned) = clean_text(&raw) {
            prop_assert!(cleaned.is_ascii());
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
            prop_assert!(!cleaned.contains("  "));
            prop_assert_eq!(cleaned.to_lowercase(), cleaned.clone());
        }
    }

    #[test]
    fn missing_markers_always_null(
        marker in prop::sample::select(vec!["nan", "none", "nat"]),
        upper in any::<bool>(),
        left in "[ \t]{0,3}",
        right in "[ \t]{0,3}",
    ) {
        let text = if upper { marker.to_uppercase() } else { marker.to_string() };
        prop_assert_eq!(clean_text(&format!("{left}{text}{right}")), None);
    }

    #[test]
    fn normalize_frame_is_idempotent(
        cells in prop::collection::vec(prop::option::of(any::<String>()), 0..16)
    ) {
        let df = DataFrame::new(vec![Series::new("cell".into(), cells).into()]).expect("frame");
        let once = normalize_frame(&df).expect("first pass");
        let twice = normalize_frame(&once).expect("second pass");
        prop_assert!(once.equals_missing(&twice));
    }

    #[test]
    fn adapt_preserves_length_and_order(
        descriptors in prop::collection::vec(descriptor_strategy(), 0..12)
    ) {
        let variables = adapt(&descriptors).expect("core types always adapt");
        prop_assert_eq!(variables.len(), descriptors.len());
        for (variable, descriptor) in variables.iter().zip(&descriptors) {
            prop_assert_eq!(variable.field(), descriptor.column_name());
        }
    }
}
