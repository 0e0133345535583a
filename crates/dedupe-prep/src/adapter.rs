//! Field specification adapter.
//!
//! Turns a loosely shaped field specification into the typed variable
//! descriptors a matching engine expects:
//!
//! | Descriptor | Result |
//! |------------|--------|
//! | `"col"` | `String(col)` |
//! | `("col", "Type")` | `Type(col)` |
//! | `("col", "Type", "has missing")` | `Type(col, has_missing)` |
//! | `("col", "String" \| "ShortString", "crf")` | `Type(col, crf)` |
//!
//! The output has one descriptor per input entry, in input order. Engines
//! align descriptors with their labeling prompts by position.

use dedupe_model::{
    ColumnDescriptor, FieldOption, VariableDescriptor, VariableKind, VariableOptions,
};
use serde_json::Value;
use tracing::{debug, info_span};

use crate::error::{PrepError, Result};
use crate::registry::{TypeRegistry, default_registry};

/// Adapts a field specification using the shared registry.
///
/// # Errors
///
/// Fails on the first entry that cannot be adapted; no partial list is
/// returned.
pub fn adapt(descriptors: &[ColumnDescriptor]) -> Result<Vec<VariableDescriptor>> {
    adapt_with(default_registry(), descriptors)
}

/// Adapts a field specification against a specific registry.
pub fn adapt_with(
    registry: &TypeRegistry,
    descriptors: &[ColumnDescriptor],
) -> Result<Vec<VariableDescriptor>> {
    let _span = info_span!("adapt", descriptors = descriptors.len()).entered();
    descriptors
        .iter()
        .map(|descriptor| adapt_descriptor(registry, descriptor))
        .collect()
}

/// Adapts a field specification written as JSON values.
///
/// Each value must be a column name or a list of two or three strings.
pub fn adapt_values(values: &[Value]) -> Result<Vec<VariableDescriptor>> {
    adapt_values_with(default_registry(), values)
}

pub fn adapt_values_with(
    registry: &TypeRegistry,
    values: &[Value],
) -> Result<Vec<VariableDescriptor>> {
    let _span = info_span!("adapt_values", descriptors = values.len()).entered();
    values
        .iter()
        .map(|value| {
            let descriptor = ColumnDescriptor::from_value(value)?;
            adapt_descriptor(registry, &descriptor)
        })
        .collect()
}

/// Adapts a single entry.
pub fn adapt_descriptor(
    registry: &TypeRegistry,
    descriptor: &ColumnDescriptor,
) -> Result<VariableDescriptor> {
    let variable = match descriptor {
        ColumnDescriptor::Column(column) => {
            VariableDescriptor::new(VariableKind::String, column.as_str(), VariableOptions::new())
        }
        ColumnDescriptor::Typed { column, type_name } => {
            let entry = registry.resolve(type_name)?;
            if entry.kind() == VariableKind::Categorical {
                return Err(categories_required(column, type_name));
            }
            entry.build(column, VariableOptions::new())
        }
        ColumnDescriptor::WithOption {
            column,
            type_name,
            option,
        } => {
            let entry = registry.resolve(type_name)?;
            let options = match FieldOption::parse(option) {
                Some(FieldOption::HasMissing) if entry.kind() == VariableKind::Categorical => {
                    return Err(categories_required(column, type_name));
                }
                Some(FieldOption::HasMissing) => VariableOptions::new().with_has_missing(true),
                Some(FieldOption::Crf) if entry.kind().supports_crf() => {
                    VariableOptions::new().with_crf(true)
                }
                _ => {
                    return Err(PrepError::UnsupportedFieldOption {
                        column: column.clone(),
                        type_name: type_name.clone(),
                        option: option.clone(),
                    });
                }
            };
            entry.build(column, options)
        }
        ColumnDescriptor::Categorical {
            column,
            categories,
            has_missing,
        } => {
            let entry = registry.resolve(VariableKind::Categorical.as_str())?;
            if categories.is_empty() {
                return Err(PrepError::UnsupportedConfiguration {
                    column: column.clone(),
                    type_name: entry.kind().to_string(),
                    reason: "requires at least one category".to_string(),
                });
            }
            VariableDescriptor::categorical(column.as_str(), categories.clone(), *has_missing)
        }
    };
    debug!(
        column = variable.field(),
        kind = %variable.kind(),
        has_missing = variable.has_missing(),
        crf = variable.crf(),
        "adapted field"
    );
    Ok(variable)
}

fn categories_required(column: &str, type_name: &str) -> PrepError {
    PrepError::UnsupportedConfiguration {
        column: column.to_string(),
        type_name: type_name.to_string(),
        reason: "requires an explicit list of categories; use a categorical descriptor"
            .to_string(),
    }
}
