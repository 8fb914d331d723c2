//! Exclusive space attribution for contiguous snapshot ranges
//!
//! Deleting a contiguous range of snapshots frees the blocks that no
//! remaining snapshot references. The storage tool can preview that amount
//! for any range (the *raw* space), but raw space of a range also contains
//! everything freed by each smaller range nested inside it. Subtracting those
//! nested ranges, smallest span first, leaves the bytes that are held by
//! exactly that combination of snapshots and nothing smaller.
//!
//! Both matrices are triangular and indexed `[span][start]`: row `span` holds
//! the `n - span` ranges covering `span + 1` consecutive snapshots.

use crate::error::{Result, ZfspaceError};
use crate::oracle::{Snapshot, SpaceOracle};
use rayon::prelude::*;
use serde::Serialize;

/// The contiguous snapshots `start..=start + span`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: usize,
    /// Snapshots beyond the first; `0` is a single snapshot
    pub span: usize,
}

impl Range {
    pub fn new(start: usize, span: usize) -> Self {
        Self { start, span }
    }

    /// Index of the last snapshot in the range (inclusive)
    pub fn end(&self) -> usize {
        self.start + self.span
    }

    /// Whether `other` lies entirely inside this range
    pub fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// Every valid range over `n` snapshots, in ascending span order
    pub fn all(n: usize) -> impl Iterator<Item = Range> {
        (0..n).flat_map(move |span| (0..n - span).map(move |start| Range::new(start, span)))
    }
}

/// How raw-fill queries are issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// Spread queries over the rayon thread pool
    #[default]
    Parallel,
    /// One query at a time, in span order
    Sequential,
}

/// Number of oracle queries needed for `n` snapshots
pub fn query_count(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Space freed by deleting each contiguous range, as reported by the oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawMatrix {
    rows: Vec<Vec<u64>>,
}

impl RawMatrix {
    /// Query every contiguous range over `n` snapshots.
    ///
    /// The first failing query aborts the fill; no partial matrix is returned.
    pub fn collect<F>(n: usize, mode: QueryMode, query: F) -> Result<Self>
    where
        F: Fn(Range) -> Result<u64> + Sync,
    {
        let ranges: Vec<Range> = Range::all(n).collect();

        let values: Vec<u64> = match mode {
            QueryMode::Parallel => ranges.par_iter().map(|range| query(*range)).collect::<Result<_>>()?,
            QueryMode::Sequential => ranges.iter().map(|range| query(*range)).collect::<Result<_>>()?,
        };

        let mut values = values.into_iter();
        let rows = (0..n)
            .map(|span| values.by_ref().take(n - span).collect())
            .collect();

        Ok(Self { rows })
    }

    /// Build from already measured rows; row `span` must hold `n - span` values.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self> {
        let n = rows.len();
        for (span, row) in rows.iter().enumerate() {
            if row.len() != n - span {
                return Err(ZfspaceError::invalid_input(format!(
                    "Row {} of a {}-snapshot matrix must have {} values, got {}",
                    span,
                    n,
                    n - span,
                    row.len()
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, span: usize) -> &[u64] {
        &self.rows[span]
    }

    pub fn get(&self, range: Range) -> Option<u64> {
        self.rows.get(range.span)?.get(range.start).copied()
    }

    /// Raw space of the full range, or zero without snapshots
    pub fn total(&self) -> u64 {
        self.rows.last().and_then(|row| row.first()).copied().unwrap_or(0)
    }

    /// Derive the exclusive space of every range.
    pub fn exclusive(&self) -> ExclusiveMatrix {
        let mut rows: Vec<Vec<i128>> = Vec::with_capacity(self.rows.len());

        // Each level only reads finished levels below it
        for (span, raw_row) in self.rows.iter().enumerate() {
            let row: Vec<i128> = raw_row
                .par_iter()
                .enumerate()
                .map(|(start, &raw)| {
                    let nested: i128 = rows
                        .iter()
                        .enumerate()
                        .map(|(x, smaller)| smaller[start..=start + span - x].iter().sum::<i128>())
                        .sum();
                    raw as i128 - nested
                })
                .collect();
            rows.push(row);
        }

        ExclusiveMatrix { rows }
    }
}

/// A range whose exclusive space came out negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub range: Range,
    pub bytes: i128,
}

/// Space held by exactly one combination of snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExclusiveMatrix {
    rows: Vec<Vec<i128>>,
}

impl ExclusiveMatrix {
    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, span: usize) -> &[i128] {
        &self.rows[span]
    }

    pub fn get(&self, range: Range) -> Option<i128> {
        self.rows.get(range.span)?.get(range.start).copied()
    }

    /// Sum of all cells; equals the raw space of the full range
    pub fn total(&self) -> i128 {
        self.rows.iter().flatten().sum()
    }

    /// Cells with negative exclusive space, in span order.
    ///
    /// These only appear when the oracle's measurements contradict each other.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(span, row)| {
                row.iter().enumerate().filter(|(_, bytes)| **bytes < 0).map(move |(start, &bytes)| Anomaly {
                    range: Range::new(start, span),
                    bytes,
                })
            })
            .collect()
    }
}

/// Query `oracle` for every range of `snapshots` and derive both matrices.
pub fn build<O>(dataset: &str, snapshots: &[Snapshot], oracle: &O, mode: QueryMode) -> Result<(RawMatrix, ExclusiveMatrix)>
where
    O: SpaceOracle + ?Sized,
{
    let raw = RawMatrix::collect(snapshots.len(), mode, |range| {
        oracle.reclaimable(dataset, &snapshots[range.start].name, &snapshots[range.end()].name)
    })?;
    let exclusive = raw.exclusive();
    Ok((raw, exclusive))
}
