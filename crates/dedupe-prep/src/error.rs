//! Error types for table preparation and field adaptation.

use dedupe_model::ModelError;
use thiserror::Error;

/// Errors raised while preparing data for a matching engine.
///
/// Every variant is a deterministic input-validation failure; none is worth
/// retrying.
#[derive(Debug, Error)]
pub enum PrepError {
    // === Field Specification Errors ===
    /// Type name is not a registry key.
    #[error("unknown variable type '{type_name}'")]
    UnknownType { type_name: String },

    /// Plugin type whose implementation is not installed.
    #[error(
        "variable type '{type_name}' requires the optional plugin package '{package}'; \
         install it and enable the `{feature}` feature"
    )]
    UnavailableType {
        type_name: String,
        package: &'static str,
        feature: &'static str,
    },

    /// Type requested in a shape that cannot carry its mandatory parameters.
    #[error("column '{column}': {type_name} {reason}")]
    UnsupportedConfiguration {
        column: String,
        type_name: String,
        reason: String,
    },

    /// Option flag unknown, or not valid for the type.
    #[error("column '{column}': unsupported field property '{option}' for type {type_name}")]
    UnsupportedFieldOption {
        column: String,
        type_name: String,
        option: String,
    },

    /// Descriptor is not one of the accepted shapes.
    #[error("unrecognized field spec {descriptor}: {reason}")]
    MalformedDescriptor { descriptor: String, reason: String },

    // === Column Coercion Errors ===
    #[error(
        "column '{column}' row {row}: cannot read '{value}' as a coordinate; \
         make sure that LatLong columns are tuples arranged like (lat, lon)"
    )]
    InvalidLatLong {
        column: String,
        row: usize,
        value: String,
    },

    #[error(
        "column '{column}' row {row}: cannot read '{value}' as a number; \
         make sure that Price columns can be converted to float"
    )]
    InvalidPrice {
        column: String,
        row: usize,
        value: String,
    },

    // === DataFrame Errors ===
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Record id returned by the engine does not address a row.
    #[error("cluster record id {record_id} is out of range for a table of {height} rows")]
    LengthMismatch { record_id: usize, height: usize },

    // === Matching Engine Errors ===
    /// Failure reported by an external matching engine.
    #[error("matching engine failed: {message}")]
    Engine { message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for PrepError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl From<ModelError> for PrepError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MalformedDescriptor { descriptor, reason } => {
                Self::MalformedDescriptor { descriptor, reason }
            }
        }
    }
}

/// Result type for preparation operations.
pub type Result<T> = std::result::Result<T, PrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::UnknownType {
            type_name: "NotARealType".to_string(),
        };
        assert_eq!(err.to_string(), "unknown variable type 'NotARealType'");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let prep_err: PrepError = polars_err.into();
        assert!(matches!(prep_err, PrepError::DataFrame { .. }));
    }

    #[test]
    fn test_error_from_model() {
        let model_err = ModelError::MalformedDescriptor {
            descriptor: "42".to_string(),
            reason: "expected a column name".to_string(),
        };
        let prep_err: PrepError = model_err.into();
        assert!(matches!(prep_err, PrepError::MalformedDescriptor { .. }));
    }
}
