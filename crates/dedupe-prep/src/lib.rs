//! Table preparation for record deduplication engines.
//!
//! This crate provides the stages that sit in front of an entity-resolution
//! engine:
//!
//! - **normalize**: per-cell text cleaning applied to a whole table
//! - **registry**: type names, including optional plugin types
//! - **adapter**: field specification to typed variable descriptors
//! - **coerce**: LatLong and Price column conversion
//! - **records**: row-indexed records for the engine
//! - **clusters**: engine results attached back onto the table
//! - **pipeline**: the composed flow and the [`MatchingEngine`] seam
//!
//! # Example
//!
//! ```
//! use dedupe_prep::{ColumnDescriptor, PrepareOptions, prepare};
//! use polars::prelude::{DataFrame, NamedFrom, Series};
//!
//! let df = DataFrame::new(vec![
//!     Series::new("name".into(), ["  Café   NYC ", "Cafe nyc"]).into(),
//!     Series::new("price".into(), ["1,200", "350.5"]).into(),
//! ])
//! .unwrap();
//! let spec = vec![
//!     ColumnDescriptor::from("name"),
//!     ColumnDescriptor::from(("price", "Price", "has missing")),
//! ];
//! let prepared = prepare(&df, &spec, &PrepareOptions::default()).unwrap();
//! assert_eq!(prepared.variables.len(), 2);
//! assert_eq!(prepared.records[0].get("name").and_then(|v| v.as_text()), Some("cafe nyc"));
//! ```

pub mod adapter;
pub mod clusters;
pub mod coerce;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod records;
pub mod registry;

pub use adapter::{adapt, adapt_values, adapt_with};
pub use clusters::{CLUSTER_ID_COLUMN, CONFIDENCE_COLUMN, Cluster, attach_clusters};
pub use coerce::coerce_special_columns;
pub use error::{PrepError, Result};
pub use normalize::{clean_text, normalize_frame};
pub use options::{MissingColumnPolicy, PrepareOptions};
pub use pipeline::{
    MatchingEngine, PreparedInput, dedupe_frame, dedupe_frame_with, prepare, prepare_and_run,
    prepare_and_run_with, prepare_with,
};
pub use records::{FieldValue, Record, frame_to_records};
pub use registry::{TypeRegistry, TypeStatus, default_registry};

// Re-export model types so callers need a single dependency
pub use dedupe_model::{ColumnDescriptor, VariableDescriptor, VariableKind, VariableOptions};
