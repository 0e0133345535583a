//! Column coercion for the LatLong and Price types.
//!
//! Both comparators need typed values rather than text:
//!
//! - LatLong columns become `List(Float64)` cells holding `[lat, lon]`
//! - Price columns become `Float64` with thousands separators removed
//!
//! Nulls stay null in both cases.

use dedupe_common::{any_to_text, parse_f64};
use dedupe_model::{ColumnDescriptor, VariableKind};
use polars::prelude::{AnyValue, Column, DataFrame, DataType, NamedFrom, PlSmallStr, Series};
use tracing::{debug, info_span, warn};

use crate::error::{PrepError, Result};
use crate::options::MissingColumnPolicy;

/// Parses a textual coordinate pair such as `(45.5, -122.6)`.
///
/// Parentheses or brackets are optional and elements may be quoted.
/// Both elements must be finite numbers.
///
/// # Examples
///
/// ```
/// use dedupe_prep::coerce::parse_lat_long;
///
/// assert_eq!(parse_lat_long("(45.5, -122.6)"), Some((45.5, -122.6)));
/// assert_eq!(parse_lat_long("[1, 2]"), Some((1.0, 2.0)));
/// assert_eq!(parse_lat_long("45.5"), None);
/// ```
pub fn parse_lat_long(text: &str) -> Option<(f64, f64)> {
    let inner = strip_brackets(text.trim());
    let mut parts = inner.split(',').map(str::trim);
    let lat = parse_coordinate(parts.next()?)?;
    let lon = parse_coordinate(parts.next()?)?;
    match (parts.next(), parts.next()) {
        (None, _) | (Some(""), None) => Some((lat, lon)),
        _ => None,
    }
}

fn strip_brackets(text: &str) -> &str {
    let bracketed = (text.starts_with('(') && text.ends_with(')'))
        || (text.starts_with('[') && text.ends_with(']'));
    if bracketed && text.len() >= 2 {
        text[1..text.len() - 1].trim()
    } else {
        text
    }
}

fn parse_coordinate(part: &str) -> Option<f64> {
    let unquoted = part.trim_matches(|c| c == '\'' || c == '"');
    parse_f64(unquoted).filter(|value| value.is_finite())
}

fn pair_from_list(inner: &Series) -> Option<(f64, f64)> {
    let values: Vec<Option<f64>> = inner.f64().ok()?.into_iter().collect();
    match values.as_slice() {
        [Some(lat), Some(lon)] => Some((*lat, *lon)),
        _ => None,
    }
}

/// Parses a price after removing thousands-separator commas.
///
/// Textual `nan` and numeric NaN both yield `Some(None)`; unparsable text
/// yields `None`.
pub fn parse_price(text: &str) -> Option<Option<f64>> {
    let stripped = text.replace(',', "");
    let value = parse_f64(&stripped)?;
    Some(if value.is_nan() { None } else { Some(value) })
}

/// Converts a column to `List(Float64)` coordinate pairs.
///
/// The output type does not depend on the data; an empty or all-null column
/// is still `List(Float64)`.
///
/// # Errors
///
/// [`PrepError::InvalidLatLong`] for the first non-null cell that is not a pair.
pub fn coerce_lat_long(column: &Column) -> Result<Series> {
    let name = column.name().clone();
    let mut values: Vec<Option<Series>> = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        let pair = match column.get(row)? {
            AnyValue::Null => None,
            AnyValue::List(inner) => Some(pair_from_list(&inner).ok_or_else(|| {
                invalid_lat_long(name.as_str(), row, format!("list of {} values", inner.len()))
            })?),
            value => {
                let text = any_to_text(value);
                Some(
                    parse_lat_long(&text)
                        .ok_or_else(|| invalid_lat_long(name.as_str(), row, text))?,
                )
            }
        };
        values.push(pair.map(|(lat, lon)| Series::new(PlSmallStr::EMPTY, [lat, lon])));
    }
    debug!(column = %name, rows = values.len(), "coerced LatLong column");
    let pairs = Series::new(name, values);
    Ok(pairs.cast(&lat_long_dtype())?)
}

/// Column type of coerced LatLong columns.
pub fn lat_long_dtype() -> DataType {
    DataType::List(Box::new(DataType::Float64))
}

fn invalid_lat_long(column: &str, row: usize, value: String) -> PrepError {
    PrepError::InvalidLatLong {
        column: column.to_string(),
        row,
        value,
    }
}

/// Converts a column to `Float64` prices.
///
/// # Errors
///
/// [`PrepError::InvalidPrice`] for the first cell that is not a number after
/// comma stripping.
pub fn coerce_price(column: &Column) -> Result<Series> {
    let name = column.name().clone();
    let mut values: Vec<Option<f64>> = Vec::with_capacity(column.len());
    for row in 0..column.len() {
        // Nulls stringify to "nan", which parses to NaN and back to null.
        let text = any_to_text(column.get(row)?);
        let price = parse_price(&text).ok_or_else(|| PrepError::InvalidPrice {
            column: name.to_string(),
            row,
            value: text.clone(),
        })?;
        values.push(price);
    }
    debug!(column = %name, rows = values.len(), "coerced Price column");
    Ok(Series::new(name, values))
}

/// Coerces every LatLong and Price column named by the descriptors.
///
/// Descriptors of other types, and bare column names, are ignored.
///
/// # Errors
///
/// - [`PrepError::ColumnNotFound`] when a descriptor names a missing column
///   and the policy is [`MissingColumnPolicy::Error`]
/// - [`PrepError::InvalidLatLong`] / [`PrepError::InvalidPrice`] for bad cells
pub fn coerce_special_columns(
    df: &mut DataFrame,
    descriptors: &[ColumnDescriptor],
    policy: MissingColumnPolicy,
) -> Result<()> {
    let _span = info_span!("coerce_special_columns", descriptors = descriptors.len()).entered();
    for descriptor in descriptors {
        let kind = match descriptor.type_name().and_then(VariableKind::from_name) {
            Some(kind @ (VariableKind::LatLong | VariableKind::Price)) => kind,
            _ => continue,
        };
        let name = descriptor.column_name();
        let coerced = {
            let Ok(column) = df.column(name) else {
                match policy {
                    MissingColumnPolicy::Error => {
                        return Err(PrepError::ColumnNotFound {
                            column: name.to_string(),
                        });
                    }
                    MissingColumnPolicy::Skip => {
                        warn!(column = name, kind = %kind, "skipping coercion of missing column");
                        continue;
                    }
                }
            };
            if kind == VariableKind::LatLong {
                coerce_lat_long(column)?
            } else {
                coerce_price(column)?
            }
        };
        df.with_column(coerced)?;
    }
    Ok(())
}
