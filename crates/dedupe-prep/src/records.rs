//! Row-indexed records in the shape matching engines consume.

use std::collections::BTreeMap;

use dedupe_common::{any_to_f64, any_to_text};
use polars::prelude::{AnyValue, DataFrame, Series};
use serde::Serialize;

use crate::error::Result;

/// A single field value of a prepared record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    LatLong(f64, f64),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One table row keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Zero-based row position in the prepared table.
    pub id: usize,
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }
}

fn list_value(inner: &Series) -> FieldValue {
    let values: Option<Vec<Option<f64>>> = inner.f64().ok().map(|ca| ca.into_iter().collect());
    match values.as_deref() {
        Some([Some(lat), Some(lon)]) => FieldValue::LatLong(*lat, *lon),
        _ => FieldValue::Text(format!("{inner}")),
    }
}

fn field_value(value: AnyValue<'_>) -> FieldValue {
    match value {
        AnyValue::Null => FieldValue::Null,
        AnyValue::String(s) => FieldValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => FieldValue::Text(s.to_string()),
        AnyValue::List(inner) => list_value(&inner),
        AnyValue::Boolean(flag) => {
            FieldValue::Text(if flag { "True" } else { "False" }.to_string())
        }
        other => match any_to_f64(other.clone()) {
            Some(number) if number.is_nan() => FieldValue::Null,
            Some(number) => FieldValue::Number(number),
            None => FieldValue::Text(any_to_text(other)),
        },
    }
}

/// Converts a prepared table into one record per row.
pub fn frame_to_records(df: &DataFrame) -> Result<Vec<Record>> {
    let columns = df.get_columns();
    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut fields = BTreeMap::new();
        for column in columns {
            fields.insert(column.name().to_string(), field_value(column.get(row)?));
        }
        records.push(Record { id: row, fields });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values_map_to_fields() {
        assert_eq!(field_value(AnyValue::Null), FieldValue::Null);
        assert_eq!(
            field_value(AnyValue::String("cafe nyc")),
            FieldValue::Text("cafe nyc".to_string())
        );
        assert_eq!(field_value(AnyValue::Float64(350.5)), FieldValue::Number(350.5));
        assert_eq!(field_value(AnyValue::Float64(f64::NAN)), FieldValue::Null);
        assert_eq!(field_value(AnyValue::Int32(7)), FieldValue::Number(7.0));
    }

    #[test]
    fn fields_serialize_untagged() {
        let json = serde_json::to_string(&vec![
            FieldValue::Null,
            FieldValue::Text("a".into()),
            FieldValue::Number(1.5),
            FieldValue::LatLong(45.5, -122.6),
        ])
        .expect("serialize fields");
        assert_eq!(json, r#"[null,"a",1.5,[45.5,-122.6]]"#);
    }
}
