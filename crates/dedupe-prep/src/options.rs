//! Configuration options for table preparation.

use serde::{Deserialize, Serialize};

/// What to do when a descriptor names a column the table does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingColumnPolicy {
    /// Fail with [`crate::PrepError::ColumnNotFound`].
    #[default]
    Error,
    /// Log a warning and leave the column out of type coercion.
    Skip,
}

/// Options controlling [`crate::prepare`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Run the text normalizer over every cell.
    /// Default: true.
    pub clean_text: bool,

    /// Coerce LatLong and Price columns to their typed representations.
    /// Default: true.
    pub coerce_types: bool,

    /// Handling of descriptors whose column is absent from the table.
    pub missing_columns: MissingColumnPolicy,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            clean_text: true,
            coerce_types: true,
            missing_columns: MissingColumnPolicy::default(),
        }
    }
}

impl PrepareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clean_text(mut self, enable: bool) -> Self {
        self.clean_text = enable;
        self
    }

    #[must_use]
    pub fn with_coerce_types(mut self, enable: bool) -> Self {
        self.coerce_types = enable;
        self
    }

    #[must_use]
    pub fn with_missing_columns(mut self, policy: MissingColumnPolicy) -> Self {
        self.missing_columns = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_clean_and_coerce() {
        let options = PrepareOptions::default();
        assert!(options.clean_text);
        assert!(options.coerce_types);
        assert_eq!(options.missing_columns, MissingColumnPolicy::Error);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options: PrepareOptions =
            serde_json::from_str(r#"{"missing_columns": "Skip"}"#).expect("parse options");
        assert!(options.clean_text);
        assert_eq!(options.missing_columns, MissingColumnPolicy::Skip);
    }
}
