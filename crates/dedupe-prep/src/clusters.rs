//! Attaching matching-engine cluster results back onto the table.

use polars::prelude::{DataFrame, NamedFrom, Series};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PrepError, Result};

/// Column holding the cluster index of each row.
pub const CLUSTER_ID_COLUMN: &str = "cluster id";

/// Column holding the engine's confidence for each row's cluster membership.
pub const CONFIDENCE_COLUMN: &str = "confidence";

/// One group of records the engine judged to be the same entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Row positions of the member records.
    pub record_ids: Vec<usize>,
    /// Per-member confidence, aligned with `record_ids`.
    pub scores: Vec<f64>,
}

impl Cluster {
    pub fn new(record_ids: Vec<usize>, scores: Vec<f64>) -> Self {
        Self { record_ids, scores }
    }

    pub fn len(&self) -> usize {
        self.record_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_ids.is_empty()
    }
}

/// Adds `cluster id` and `confidence` columns to the table.
///
/// Clusters are numbered by position. Rows that belong to no cluster get
/// nulls, and a member without a score gets a null confidence.
///
/// # Errors
///
/// [`PrepError::LengthMismatch`] if a record id does not address a row.
pub fn attach_clusters(df: &mut DataFrame, clusters: &[Cluster]) -> Result<()> {
    let height = df.height();
    let mut cluster_ids: Vec<Option<u32>> = vec![None; height];
    let mut confidence: Vec<Option<f64>> = vec![None; height];

    for (index, cluster) in clusters.iter().enumerate() {
        let cluster_id = u32::try_from(index).map_err(|_| PrepError::DataFrame {
            message: format!("too many clusters: {}", clusters.len()),
        })?;
        for (position, &record_id) in cluster.record_ids.iter().enumerate() {
            if record_id >= height {
                return Err(PrepError::LengthMismatch { record_id, height });
            }
            if let Some(previous) = cluster_ids[record_id] {
                warn!(record_id, previous, cluster_id, "record assigned to more than one cluster");
            }
            cluster_ids[record_id] = Some(cluster_id);
            confidence[record_id] = cluster.scores.get(position).copied();
        }
    }

    let clustered = cluster_ids.iter().filter(|id| id.is_some()).count();
    debug!(clusters = clusters.len(), clustered, rows = height, "attached clusters");

    df.with_column(Series::new(CLUSTER_ID_COLUMN.into(), cluster_ids))?;
    df.with_column(Series::new(CONFIDENCE_COLUMN.into(), confidence))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;

    fn frame(rows: usize) -> DataFrame {
        let names: Vec<String> = (0..rows).map(|idx| format!("row {idx}")).collect();
        DataFrame::new(vec![Series::new("name".into(), names).into()]).expect("frame")
    }

    #[test]
    fn unclustered_rows_are_null() {
        let mut df = frame(3);
        attach_clusters(&mut df, &[Cluster::new(vec![0, 2], vec![0.9, 0.8])]).expect("attach");
        let ids = df.column(CLUSTER_ID_COLUMN).expect("cluster id");
        assert_eq!(ids.get(0).expect("row 0"), AnyValue::UInt32(0));
        assert_eq!(ids.get(1).expect("row 1"), AnyValue::Null);
        let scores = df.column(CONFIDENCE_COLUMN).expect("confidence");
        assert_eq!(scores.get(2).expect("row 2"), AnyValue::Float64(0.8));
    }

    #[test]
    fn out_of_range_record_is_rejected() {
        let mut df = frame(2);
        let err = attach_clusters(&mut df, &[Cluster::new(vec![5], vec![1.0])]).unwrap_err();
        assert!(matches!(err, PrepError::LengthMismatch { record_id: 5, height: 2 }));
    }
}
