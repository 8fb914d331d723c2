//! Seams between the analysis core and the storage tool
//!
//! The core never talks to ZFS directly. It asks a [`SnapshotSource`] for the
//! ordered snapshot chain and a [`SpaceOracle`] for the space a contiguous
//! range would free. [`crate::zfs::ZfsBridge`] implements both over the `zfs`
//! command; tests implement them with synthetic data.

use crate::error::{Result, ZfspaceError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A snapshot at a fixed position of the creation-ordered chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Snapshot name without the `dataset@` part
    pub name: String,
    /// Position in creation order
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            created: None,
        }
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}

/// Enumerates datasets and their snapshots
pub trait SnapshotSource {
    /// All dataset names known to the storage tool
    fn datasets(&self) -> Result<Vec<String>>;

    /// Snapshots of `dataset`, oldest first
    fn snapshots(&self, dataset: &str) -> Result<Vec<Snapshot>>;
}

/// Answers "how many bytes would deleting snapshots `first..=last` free"
///
/// Queries must be idempotent and side-effect free; they may be issued from
/// several threads at once.
pub trait SpaceOracle: Sync {
    fn reclaimable(&self, dataset: &str, first: &str, last: &str) -> Result<u64>;
}

impl<F> SpaceOracle for F
where
    F: Fn(&str, &str, &str) -> Result<u64> + Sync,
{
    fn reclaimable(&self, dataset: &str, first: &str, last: &str) -> Result<u64> {
        self(dataset, first, last)
    }
}

/// Validate `dataset` against the source and return its snapshot chain.
pub fn load_snapshots<S: SnapshotSource + ?Sized>(source: &S, dataset: &str) -> Result<Vec<Snapshot>> {
    let datasets = source.datasets()?;
    if !datasets.iter().any(|d| d == dataset) {
        return Err(ZfspaceError::unknown_dataset(dataset, datasets));
    }

    let mut snapshots = source.snapshots(dataset)?;
    for (index, snapshot) in snapshots.iter_mut().enumerate() {
        snapshot.index = index;
    }

    log::debug!("Dataset {} has {} snapshots", dataset, snapshots.len());
    Ok(snapshots)
}
