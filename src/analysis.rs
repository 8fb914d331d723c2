//! One full analysis run: snapshot chain, measurements and derived matrices

use crate::error::{Result, ZfspaceError};
use crate::matrix::{self, query_count, Anomaly, ExclusiveMatrix, QueryMode, RawMatrix};
use crate::names::shorten_names;
use crate::oracle::{load_snapshots, Snapshot, SnapshotSource, SpaceOracle};
use crate::progress::ProgressReporter;
use serde::Serialize;

/// Everything measured and derived for one dataset
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub dataset: String,
    pub snapshots: Vec<Snapshot>,
    pub raw: RawMatrix,
    pub exclusive: ExclusiveMatrix,
    pub anomalies: Vec<Anomaly>,
}

/// Measure every contiguous snapshot range of `dataset`.
///
/// Fails without a result if the dataset is unknown or any query fails.
pub fn analyze<B>(bridge: &B, dataset: &str, mode: QueryMode, show_progress: bool) -> Result<Analysis>
where
    B: SnapshotSource + SpaceOracle + ?Sized,
{
    let snapshots = load_snapshots(bridge, dataset)?;
    let queries = query_count(snapshots.len());
    log::debug!("Measuring {} ranges of {} ({:?})", queries, dataset, mode);

    let mut progress = if show_progress && queries > 0 {
        ProgressReporter::new_for_queries(queries as u64)
    } else {
        ProgressReporter::new_minimal()
    };

    let counted = |dataset: &str, first: &str, last: &str| -> Result<u64> {
        let bytes = bridge.reclaimable(dataset, first, last);
        progress.inc();
        bytes
    };
    let (raw, exclusive) = matrix::build(dataset, &snapshots, &counted, mode)?;
    progress.finish();

    let anomalies = exclusive.anomalies();

    Ok(Analysis {
        dataset: dataset.to_string(),
        snapshots,
        raw,
        exclusive,
        anomalies,
    })
}

impl Analysis {
    /// Labels for the name row
    pub fn names(&self, shorten: bool) -> Vec<String> {
        let names: Vec<&str> = self.snapshots.iter().map(|s| s.name.as_str()).collect();
        if shorten {
            shorten_names(&names)
        } else {
            names.into_iter().map(str::to_string).collect()
        }
    }

    /// Report negative exclusive space.
    ///
    /// Every anomaly is logged; in strict mode the first one is an error.
    pub fn check_consistency(&self, strict: bool) -> Result<()> {
        for anomaly in &self.anomalies {
            log::warn!(
                "Snapshots {} show {} bytes of negative exclusive space; drawn as 0",
                self.describe(anomaly),
                anomaly.bytes
            );
        }

        match self.anomalies.first() {
            Some(first) if strict => Err(ZfspaceError::inconsistent_space(format!(
                "{} combination(s) with negative exclusive space, first at {} ({} bytes)",
                self.anomalies.len(),
                self.describe(first),
                first.bytes
            ))),
            _ => Ok(()),
        }
    }

    fn describe(&self, anomaly: &Anomaly) -> String {
        let first = &self.snapshots[anomaly.range.start].name;
        let last = &self.snapshots[anomaly.range.end()].name;
        if anomaly.range.span == 0 {
            first.clone()
        } else {
            format!("{}..{}", first, last)
        }
    }
}
