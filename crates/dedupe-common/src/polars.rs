//! Polars `AnyValue` utility functions.
//!
//! Cells in a raw table are not homogeneously typed. These helpers turn any
//! scalar cell into text the way a loosely typed dataframe library would, so
//! downstream cleaning can treat every column the same.

use polars::prelude::AnyValue;

/// Text used for a missing cell before cleaning.
///
/// The normalizer maps this literal back to null at its final step.
pub const MISSING_TEXT: &str = "nan";

/// Converts a Polars `AnyValue` to its textual representation.
///
/// Nulls render as [`MISSING_TEXT`], booleans as `True`/`False`, and integral
/// floats keep one decimal place (`1200.0`).
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use dedupe_common::any_to_text;
///
/// assert_eq!(any_to_text(AnyValue::Null), "nan");
/// assert_eq!(any_to_text(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_text(AnyValue::Float64(1200.0)), "1200.0");
/// assert_eq!(any_to_text(AnyValue::String("Café")), "Café");
/// ```
pub fn any_to_text(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => MISSING_TEXT.to_string(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_float(f64::from(v)),
        AnyValue::Float64(v) => format_float(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "True" } else { "False" }.to_string(),
        other => other.to_string(),
    }
}

/// Formats a float so integral values keep a trailing `.0`.
///
/// # Examples
///
/// ```
/// use dedupe_common::format_float;
///
/// assert_eq!(format_float(1.0), "1.0");
/// assert_eq!(format_float(350.5), "350.5");
/// assert_eq!(format_float(f64::NAN), "nan");
/// ```
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return MISSING_TEXT.to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
///
/// Handles integer types, floating-point types, and string parsing.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_text_null() {
        assert_eq!(any_to_text(AnyValue::Null), "nan");
    }

    #[test]
    fn test_any_to_text_integers() {
        assert_eq!(any_to_text(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_text(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_text(AnyValue::UInt32(0)), "0");
    }

    #[test]
    fn test_any_to_text_floats() {
        assert_eq!(any_to_text(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_text(AnyValue::Float64(1.0)), "1.0");
        assert_eq!(any_to_text(AnyValue::Float64(-93.25)), "-93.25");
        assert_eq!(any_to_text(AnyValue::Float64(f64::NAN)), "nan");
    }

    #[test]
    fn test_any_to_text_boolean() {
        assert_eq!(any_to_text(AnyValue::Boolean(true)), "True");
        assert_eq!(any_to_text(AnyValue::Boolean(false)), "False");
    }

    #[test]
    fn test_format_float_infinite() {
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::Float64(3.5)), Some(3.5));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("invalid")), None);
    }

    #[test]
    fn test_parse_f64() {
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64("350.5"), Some(350.5));
        assert_eq!(parse_f64("  1200  "), Some(1200.0));
        assert_eq!(parse_f64("invalid"), None);
    }
}
