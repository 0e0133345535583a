//! Data types shared by the dedupe preparation stages.
//!
//! - [`ColumnDescriptor`]: one user-authored entry of a field specification
//! - [`VariableKind`]: the comparator type names a matching engine understands
//! - [`VariableDescriptor`]: the typed, validated output of field adaptation

pub mod descriptor;
pub mod error;
pub mod variable;

pub use descriptor::{ColumnDescriptor, FieldOption};
pub use error::{ModelError, Result};
pub use variable::{VariableDescriptor, VariableKind, VariableOptions};
