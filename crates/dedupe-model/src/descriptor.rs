//! User-authored field specification entries.
//!
//! A field specification is a list of loosely shaped entries:
//!
//! | Shape | Meaning |
//! |-------|---------|
//! | `"col"` | exact-match capable string comparator |
//! | `["col", "Type"]` | `Type` with default options |
//! | `["col", "Type", "flag"]` | `Type` with one option enabled |
//!
//! [`ColumnDescriptor`] captures those shapes without interpreting the type
//! name or flag; validation happens when the descriptor is adapted.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ModelError, Result};

/// Option flag accepted in the third slot of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOption {
    /// `"has missing"`
    HasMissing,
    /// `"crf"`
    Crf,
}

impl FieldOption {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldOption::HasMissing => "has missing",
            FieldOption::Crf => "crf",
        }
    }

    /// Parses the literal flag text. Flags are case-sensitive.
    pub fn parse(flag: &str) -> Option<Self> {
        match flag {
            "has missing" => Some(FieldOption::HasMissing),
            "crf" => Some(FieldOption::Crf),
            _ => None,
        }
    }
}

/// One entry of a field specification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ColumnDescriptor {
    /// A bare column name.
    Column(String),
    /// `(column, type name)`.
    Typed { column: String, type_name: String },
    /// `(column, type name, option flag)`.
    WithOption {
        column: String,
        type_name: String,
        option: String,
    },
    /// A categorical column with its allowed values.
    ///
    /// The tuple shapes have no slot for categories, so categorical columns
    /// can only be described this way.
    Categorical {
        column: String,
        categories: Vec<String>,
        has_missing: bool,
    },
}

impl ColumnDescriptor {
    pub fn column(name: impl Into<String>) -> Self {
        ColumnDescriptor::Column(name.into())
    }

    pub fn typed(column: impl Into<String>, type_name: impl Into<String>) -> Self {
        ColumnDescriptor::Typed {
            column: column.into(),
            type_name: type_name.into(),
        }
    }

    pub fn with_option(
        column: impl Into<String>,
        type_name: impl Into<String>,
        option: impl Into<String>,
    ) -> Self {
        ColumnDescriptor::WithOption {
            column: column.into(),
            type_name: type_name.into(),
            option: option.into(),
        }
    }

    pub fn categorical<I, S>(column: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnDescriptor::Categorical {
            column: column.into(),
            categories: categories.into_iter().map(Into::into).collect(),
            has_missing: false,
        }
    }

    /// Name of the described column.
    pub fn column_name(&self) -> &str {
        match self {
            ColumnDescriptor::Column(column)
            | ColumnDescriptor::Typed { column, .. }
            | ColumnDescriptor::WithOption { column, .. }
            | ColumnDescriptor::Categorical { column, .. } => column,
        }
    }

    /// Declared type name, if the shape carries one.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            ColumnDescriptor::Column(_) => None,
            ColumnDescriptor::Typed { type_name, .. }
            | ColumnDescriptor::WithOption { type_name, .. } => Some(type_name),
            ColumnDescriptor::Categorical { .. } => Some("Categorical"),
        }
    }

    /// Parses a JSON field specification entry.
    ///
    /// Accepts a string or an array of two or three strings. Anything else is
    /// [`ModelError::MalformedDescriptor`].
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(column) => Ok(ColumnDescriptor::Column(column.clone())),
            Value::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| item.as_str())
                    .collect::<Option<Vec<&str>>>()
                    .ok_or_else(|| malformed(value, "elements must be strings"))?;
                match parts.as_slice() {
                    [column, type_name] => Ok(ColumnDescriptor::typed(*column, *type_name)),
                    [column, type_name, option] => {
                        Ok(ColumnDescriptor::with_option(*column, *type_name, *option))
                    }
                    _ => Err(malformed(
                        value,
                        &format!("expected 2 or 3 elements, found {}", parts.len()),
                    )),
                }
            }
            _ => Err(malformed(
                value,
                "expected a column name or a [column, type] list",
            )),
        }
    }
}

fn malformed(value: &Value, reason: &str) -> ModelError {
    ModelError::MalformedDescriptor {
        descriptor: value.to_string(),
        reason: reason.to_string(),
    }
}

impl TryFrom<Value> for ColumnDescriptor {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(&value)
    }
}

impl From<&str> for ColumnDescriptor {
    fn from(column: &str) -> Self {
        ColumnDescriptor::column(column)
    }
}

impl From<String> for ColumnDescriptor {
    fn from(column: String) -> Self {
        ColumnDescriptor::Column(column)
    }
}

impl From<(&str, &str)> for ColumnDescriptor {
    fn from((column, type_name): (&str, &str)) -> Self {
        ColumnDescriptor::typed(column, type_name)
    }
}

impl From<(&str, &str, &str)> for ColumnDescriptor {
    fn from((column, type_name, option): (&str, &str, &str)) -> Self {
        ColumnDescriptor::with_option(column, type_name, option)
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnDescriptor::Column(column) => write!(f, "{column:?}"),
            ColumnDescriptor::Typed { column, type_name } => {
                write!(f, "({column:?}, {type_name:?})")
            }
            ColumnDescriptor::WithOption {
                column,
                type_name,
                option,
            } => write!(f, "({column:?}, {type_name:?}, {option:?})"),
            ColumnDescriptor::Categorical {
                column, categories, ..
            } => write!(f, "({column:?}, \"Categorical\", {categories:?})"),
        }
    }
}
