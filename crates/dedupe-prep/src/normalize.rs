//! Text normalization applied uniformly to every cell of a table.
//!
//! Each cell goes through the same pipeline, in order:
//!
//! 1. stringify (nulls become `nan`)
//! 2. lower-case
//! 3. strip characters outside word characters, whitespace and `.-(),:/\`
//! 4. collapse whitespace runs and trim
//! 5. fold accents to ASCII (`é` -> `e`)
//! 6. map `nan`, `none` and `nat` to null
//!
//! The output of [`normalize_frame`] has the same shape as its input, with
//! every column turned into a nullable string column.

use std::sync::LazyLock;

use dedupe_common::any_to_text;
use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
use regex::Regex;
use tracing::{debug, info_span, trace};

use crate::error::Result;
use crate::logging::redact_value;

/// Everything outside word characters, whitespace and `. - ( ) , : / \`.
///
/// `\w` and `\s` are Unicode-aware so non-English text survives until
/// accent folding.
static DISALLOWED_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\w\s.\-(),:/\\]").expect("Invalid disallowed-character regex")
});

/// Cleaned values that stand for a missing cell.
const MISSING_MARKERS: &[&str] = &["nan", "none", "nat"];

/// Returns true when a cleaned value is one of the textual missing markers.
pub fn is_missing_marker(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

fn strip_and_collapse(text: &str) -> String {
    let stripped = DISALLOWED_CHARS.replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans a single piece of text (steps 2 to 6).
///
/// Returns `None` when the cleaned text is a missing marker.
///
/// # Examples
///
/// ```
/// use dedupe_prep::normalize::clean_text;
///
/// assert_eq!(clean_text("  Café   NYC ").as_deref(), Some("cafe nyc"));
/// assert_eq!(clean_text(" NaN "), None);
/// assert_eq!(clean_text("O'Brien & Sons").as_deref(), Some("obrien sons"));
/// ```
pub fn clean_text(raw: &str) -> Option<String> {
    let mut cleaned = strip_and_collapse(&raw.to_lowercase());

    let folded = deunicode::deunicode(&cleaned);
    if folded != cleaned {
        // Transliteration can emit capitals, spaces and brackets ("[?]").
        cleaned = strip_and_collapse(&folded.to_lowercase());
    }

    if is_missing_marker(&cleaned) {
        None
    } else {
        Some(cleaned)
    }
}

/// Cleans a single cell of any type (steps 1 to 6).
pub fn clean_cell(value: AnyValue<'_>) -> Option<String> {
    clean_text(&any_to_text(value))
}

/// Cleans every value of a column, keeping its name and length.
pub fn normalize_column(column: &Column) -> Result<Column> {
    let mut values: Vec<Option<String>> = Vec::with_capacity(column.len());
    let mut nulled = 0usize;
    for row in 0..column.len() {
        let value = column.get(row)?;
        let cleaned = clean_cell(value);
        match cleaned.as_deref() {
            Some(text) => {
                trace!(column = %column.name(), row, value = redact_value(text), "cleaned cell");
            }
            None => nulled += 1,
        }
        values.push(cleaned);
    }
    debug!(column = %column.name(), rows = values.len(), nulled, "normalized column");
    Ok(Series::new(column.name().clone(), values).into_column())
}

/// Cleans every cell of a table.
///
/// Column names, column order and row count are preserved. The input frame
/// is left untouched.
///
/// # Errors
///
/// Returns an error only if Polars fails to read a cell or rebuild the frame.
pub fn normalize_frame(df: &DataFrame) -> Result<DataFrame> {
    let _span = info_span!("normalize_frame", rows = df.height(), columns = df.width()).entered();
    let columns = df
        .get_columns()
        .iter()
        .map(normalize_column)
        .collect::<Result<Vec<Column>>>()?;
    Ok(DataFrame::new(columns)?)
}
