//! Preparation pipeline and the matching-engine seam.
//!
//! [`prepare`] runs the stages in a fixed order and fails fast:
//!
//! 1. adapt the field specification (rejects bad specs before any data work)
//! 2. check that every described column exists
//! 3. normalize text
//! 4. coerce LatLong and Price columns
//! 5. export records
//!
//! The matching engine itself is external; [`MatchingEngine`] is the
//! interface it is driven through.

use dedupe_model::{ColumnDescriptor, VariableDescriptor};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use crate::adapter::adapt_with;
use crate::clusters::{Cluster, attach_clusters};
use crate::coerce::coerce_special_columns;
use crate::error::{PrepError, Result};
use crate::normalize::normalize_frame;
use crate::options::{MissingColumnPolicy, PrepareOptions};
use crate::records::{Record, frame_to_records};
use crate::registry::{TypeRegistry, default_registry};

/// Everything a matching engine needs for one run.
#[derive(Debug, Clone)]
pub struct PreparedInput {
    /// Cleaned and coerced table.
    pub table: DataFrame,
    /// Variable descriptors, aligned with the field specification.
    pub variables: Vec<VariableDescriptor>,
    /// One record per table row.
    pub records: Vec<Record>,
}

/// An entity-resolution engine fed with prepared input.
///
/// Implementations own blocking, scoring and clustering; this crate only
/// prepares what they consume.
pub trait MatchingEngine {
    type Output;

    /// Runs the engine.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures as [`PrepError::Engine`].
    fn run(&mut self, input: &PreparedInput) -> Result<Self::Output>;
}

/// Prepares a table and field specification with the shared registry.
///
/// The input frame is not modified.
pub fn prepare(
    df: &DataFrame,
    descriptors: &[ColumnDescriptor],
    options: &PrepareOptions,
) -> Result<PreparedInput> {
    prepare_with(default_registry(), df, descriptors, options)
}

/// Prepares a table and field specification against a specific registry.
pub fn prepare_with(
    registry: &TypeRegistry,
    df: &DataFrame,
    descriptors: &[ColumnDescriptor],
    options: &PrepareOptions,
) -> Result<PreparedInput> {
    let _span = info_span!("prepare", rows = df.height(), fields = descriptors.len()).entered();

    let variables = adapt_with(registry, descriptors)?;
    check_columns(df, descriptors, options.missing_columns)?;

    let mut table = if options.clean_text {
        normalize_frame(df)?
    } else {
        df.clone()
    };
    if options.coerce_types {
        coerce_special_columns(&mut table, descriptors, options.missing_columns)?;
    }
    let records = frame_to_records(&table)?;

    info!(
        rows = table.height(),
        variables = variables.len(),
        "prepared input for matching"
    );
    Ok(PreparedInput {
        table,
        variables,
        records,
    })
}

fn check_columns(
    df: &DataFrame,
    descriptors: &[ColumnDescriptor],
    policy: MissingColumnPolicy,
) -> Result<()> {
    for descriptor in descriptors {
        let column = descriptor.column_name();
        if df.column(column).is_ok() {
            continue;
        }
        match policy {
            MissingColumnPolicy::Error => {
                return Err(PrepError::ColumnNotFound {
                    column: column.to_string(),
                });
            }
            MissingColumnPolicy::Skip => warn!(column, "described column not in table"),
        }
    }
    Ok(())
}

/// Prepares input, runs the engine, and returns the engine output alongside
/// the prepared input.
pub fn prepare_and_run<E: MatchingEngine>(
    engine: &mut E,
    df: &DataFrame,
    descriptors: &[ColumnDescriptor],
    options: &PrepareOptions,
) -> Result<(PreparedInput, E::Output)> {
    prepare_and_run_with(default_registry(), engine, df, descriptors, options)
}

/// [`prepare_and_run`] against a specific registry.
pub fn prepare_and_run_with<E: MatchingEngine>(
    registry: &TypeRegistry,
    engine: &mut E,
    df: &DataFrame,
    descriptors: &[ColumnDescriptor],
    options: &PrepareOptions,
) -> Result<(PreparedInput, E::Output)> {
    let input = prepare_with(registry, df, descriptors, options)?;
    let output = {
        let _span = info_span!("matching_engine").entered();
        engine.run(&input)?
    };
    Ok((input, output))
}

/// Deduplicates a table end to end.
///
/// Returns the prepared table with `cluster id` and `confidence` columns
/// attached from the engine's clusters.
pub fn dedupe_frame<E>(
    engine: &mut E,
    df: &DataFrame,
    descriptors: &[ColumnDescriptor],
    options: &PrepareOptions,
) -> Result<DataFrame>
where
    E: MatchingEngine<Output = Vec<Cluster>>,
{
    dedupe_frame_with(default_registry(), engine, df, descriptors, options)
}

/// [`dedupe_frame`] against a specific registry, e.g. one with plugins
/// installed at run time.
pub fn dedupe_frame_with<E>(
    registry: &TypeRegistry,
    engine: &mut E,
    df: &DataFrame,
    descriptors: &[ColumnDescriptor],
    options: &PrepareOptions,
) -> Result<DataFrame>
where
    E: MatchingEngine<Output = Vec<Cluster>>,
{
    let (input, clusters) = prepare_and_run_with(registry, engine, df, descriptors, options)?;
    let mut table = input.table;
    attach_clusters(&mut table, &clusters)?;
    info!(clusters = clusters.len(), "deduplicated table");
    Ok(table)
}
