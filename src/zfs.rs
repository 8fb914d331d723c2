//! `zfs` command adapter
//!
//! All listings use the scripting flags (`-H` tab separated, no header;
//! `-p` exact numbers) so the parsers below never deal with column
//! alignment or unit suffixes.

use crate::config::ZfsConfig;
use crate::error::{Result, ZfspaceError};
use crate::oracle::{Snapshot, SnapshotSource, SpaceOracle};
use chrono::DateTime;
use std::process::Command;

/// Talks to ZFS through its command-line tool
#[derive(Debug, Clone)]
pub struct ZfsBridge {
    config: ZfsConfig,
}

impl ZfsBridge {
    pub fn new(config: ZfsConfig) -> Self {
        Self { config }
    }

    /// Run zfs with `args` and return its standard output
    fn run(&self, args: &[&str]) -> Result<String> {
        let command_line = format!("{} {}", self.config.zfs_binary.display(), args.join(" "));
        log::debug!("Running: {}", command_line);

        let output = Command::new(&self.config.zfs_binary)
            .args(args)
            .output()
            .map_err(|e| ZfspaceError::command(&command_line, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ZfspaceError::command(
                &command_line,
                format!("{} ({})", stderr.trim(), output.status),
            ));
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

impl SnapshotSource for ZfsBridge {
    fn datasets(&self) -> Result<Vec<String>> {
        let output = self.run(&["list", "-H", "-o", "name"])?;
        Ok(parse_dataset_list(&output))
    }

    fn snapshots(&self, dataset: &str) -> Result<Vec<Snapshot>> {
        let output = self.run(&[
            "list", "-H", "-p", "-r", "-t", "snapshot", "-s", "createtxg", "-o", "name,creation", dataset,
        ])?;
        parse_snapshot_list(dataset, &output)
    }
}

impl SpaceOracle for ZfsBridge {
    fn reclaimable(&self, dataset: &str, first: &str, last: &str) -> Result<u64> {
        let target = range_spec(dataset, first, last);
        let output = self.run(&["destroy", "-n", "-v", "-p", &target])?;
        parse_reclaim(&output).map_err(|e| match e {
            ZfspaceError::OracleProtocol { message } => {
                ZfspaceError::oracle_protocol(format!("{} (while previewing {})", message, target))
            }
            other => other,
        })
    }
}

/// Dataset names from `zfs list -H -o name`
pub fn parse_dataset_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split('\t').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Snapshots of `dataset` from `zfs list -H -p -t snapshot -o name,creation`.
///
/// Snapshots of child datasets (listed because of `-r`) are skipped. Order
/// is kept as listed, which is transaction group order.
pub fn parse_snapshot_list(dataset: &str, output: &str) -> Result<Vec<Snapshot>> {
    let mut snapshots = Vec::new();

    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        let mut fields = line.split('\t');
        let full_name = fields.next().unwrap_or_default().trim();

        let (owner, name) = split_snapshot_name(full_name)?;
        if owner != dataset {
            continue;
        }

        let mut snapshot = Snapshot::new(name, snapshots.len());
        if let Some(creation) = fields.next().map(str::trim).filter(|c| !c.is_empty()) {
            let seconds: i64 = creation.parse().map_err(|_| {
                ZfspaceError::oracle_protocol(format!("Invalid creation time '{}' for {}", creation, full_name))
            })?;
            let created = DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
                ZfspaceError::oracle_protocol(format!("Creation time out of range for {}", full_name))
            })?;
            snapshot = snapshot.with_created(created);
        }
        snapshots.push(snapshot);
    }

    Ok(snapshots)
}

/// Split `dataset@snapshot`; the name must contain exactly one `@`.
pub fn split_snapshot_name(full_name: &str) -> Result<(&str, &str)> {
    match full_name.split_once('@') {
        Some((dataset, snapshot)) if !snapshot.contains('@') && !dataset.is_empty() && !snapshot.is_empty() => {
            Ok((dataset, snapshot))
        }
        _ => Err(ZfspaceError::oracle_protocol(format!(
            "Expected a single '@' in snapshot name '{}'",
            full_name
        ))),
    }
}

/// Argument naming the snapshots `first` through `last` for `zfs destroy`
pub fn range_spec(dataset: &str, first: &str, last: &str) -> String {
    if first == last {
        format!("{}@{}", dataset, first)
    } else {
        format!("{}@{}%{}", dataset, first, last)
    }
}

/// Byte count of the `reclaim` line printed by `zfs destroy -n -v -p`
pub fn parse_reclaim(output: &str) -> Result<u64> {
    let value = output
        .lines()
        .find_map(|line| {
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("reclaim") => Some(fields.next().unwrap_or_default()),
                _ => None,
            }
        })
        .ok_or_else(|| ZfspaceError::oracle_protocol("No 'reclaim' line in deletion preview"))?;

    value
        .parse()
        .map_err(|_| ZfspaceError::oracle_protocol(format!("Invalid reclaim size '{}'", value)))
}
