//! Variable descriptors handed to the matching engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparator type of a matched column.
///
/// The first nine kinds ship with every matching engine. `Name`, `Address`,
/// `DateTime` and `Number` are provided by optional plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariableKind {
    String,
    ShortString,
    Text,
    Exact,
    Set,
    LatLong,
    Price,
    Categorical,
    Exists,
    Name,
    Address,
    DateTime,
    Number,
}

impl VariableKind {
    /// Every kind, core kinds first.
    pub const ALL: [VariableKind; 13] = [
        VariableKind::String,
        VariableKind::ShortString,
        VariableKind::Text,
        VariableKind::Exact,
        VariableKind::Set,
        VariableKind::LatLong,
        VariableKind::Price,
        VariableKind::Categorical,
        VariableKind::Exists,
        VariableKind::Name,
        VariableKind::Address,
        VariableKind::DateTime,
        VariableKind::Number,
    ];

    /// The type name as written in a field specification.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::String => "String",
            VariableKind::ShortString => "ShortString",
            VariableKind::Text => "Text",
            VariableKind::Exact => "Exact",
            VariableKind::Set => "Set",
            VariableKind::LatLong => "LatLong",
            VariableKind::Price => "Price",
            VariableKind::Categorical => "Categorical",
            VariableKind::Exists => "Exists",
            VariableKind::Name => "Name",
            VariableKind::Address => "Address",
            VariableKind::DateTime => "DateTime",
            VariableKind::Number => "Number",
        }
    }

    /// Looks up a kind by its exact (case-sensitive) type name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// True for kinds supplied by an optional plugin package.
    pub fn is_plugin(self) -> bool {
        matches!(
            self,
            VariableKind::Name
                | VariableKind::Address
                | VariableKind::DateTime
                | VariableKind::Number
        )
    }

    /// True for the string kinds that accept a sequence-labeling comparator.
    pub fn supports_crf(self) -> bool {
        matches!(self, VariableKind::String | VariableKind::ShortString)
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-variable comparator options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableOptions {
    /// Missing values get their own indicator instead of counting as a mismatch.
    pub has_missing: bool,
    /// Use the sequence-labeling (CRF) comparator. String kinds only.
    pub crf: bool,
}

impl VariableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_has_missing(mut self, enable: bool) -> Self {
        self.has_missing = enable;
        self
    }

    #[must_use]
    pub fn with_crf(mut self, enable: bool) -> Self {
        self.crf = enable;
        self
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A typed description of one column's role in record matching.
///
/// Descriptors are immutable once built. Serializing one yields the
/// definition dictionary form matching engines accept, e.g.
/// `{"field": "price", "type": "Price", "has missing": true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableDescriptor {
    field: String,
    #[serde(rename = "type")]
    kind: VariableKind,
    #[serde(rename = "has missing", skip_serializing_if = "is_false")]
    has_missing: bool,
    #[serde(skip_serializing_if = "is_false")]
    crf: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<String>>,
}

impl VariableDescriptor {
    /// Builds a descriptor for any non-categorical kind.
    pub fn new(kind: VariableKind, field: impl Into<String>, options: VariableOptions) -> Self {
        Self {
            field: field.into(),
            kind,
            has_missing: options.has_missing,
            crf: options.crf,
            categories: None,
        }
    }

    /// Builds a categorical descriptor with its allowed category values.
    pub fn categorical(
        field: impl Into<String>,
        categories: Vec<String>,
        has_missing: bool,
    ) -> Self {
        Self {
            field: field.into(),
            kind: VariableKind::Categorical,
            has_missing,
            crf: false,
            categories: Some(categories),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn has_missing(&self) -> bool {
        self.has_missing
    }

    pub fn crf(&self) -> bool {
        self.crf
    }

    pub fn options(&self) -> VariableOptions {
        VariableOptions {
            has_missing: self.has_missing,
            crf: self.crf,
        }
    }

    /// Allowed values; only set for [`VariableKind::Categorical`].
    pub fn categories(&self) -> Option<&[String]> {
        self.categories.as_deref()
    }
}
