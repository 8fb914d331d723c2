//! # zfspace
//!
//! Finds disk space hidden in ZFS snapshots. ZFS reports only the space
//! unique to each snapshot; blocks shared by two or more snapshots show up
//! nowhere. zfspace measures what deleting every contiguous range of
//! snapshots would free, attributes each byte to the exact combination of
//! snapshots holding it, and draws the result as a nested terminal diagram.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod names;
pub mod oracle;
pub mod output;
pub mod progress;
pub mod size;
pub mod zfs;

pub use error::{Result, ZfspaceError};
pub use matrix::{ExclusiveMatrix, RawMatrix, Range};
pub use oracle::{Snapshot, SnapshotSource, SpaceOracle};
pub use zfs::ZfsBridge;
