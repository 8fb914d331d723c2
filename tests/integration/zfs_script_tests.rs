//! End-to-end tests against a scripted stand-in for the zfs command

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;
use zfspace::commands::{analyze_command, AnalyzeOptions};
use zfspace::config::ZfsConfig;
use zfspace::size::SizeFormat;
use zfspace::{SnapshotSource, SpaceOracle, ZfsBridge, ZfspaceError};

const FAKE_ZFS: &str = r#"#!/bin/sh
for arg; do last="$arg"; done
case "$1" in
  list)
    case "$*" in
      *"-t snapshot -s createtxg"*)
        printf 'tank@mon\t1700000000\n'
        printf 'tank/child@mon\t1700000001\n'
        printf 'tank@tue\t1700086400\n'
        printf 'tank@wed\t1700172800\n'
        printf 'broken@mon\t1700000000\n'
        ;;
      *snapshot*)
        echo "snapshots must be listed in txg order" >&2; exit 1
        ;;
      *)
        printf 'tank\ntank/child\nbroken\n'
        ;;
    esac
    ;;
  destroy)
    case "$last" in
      tank@mon) printf 'destroy\ttank@mon\nreclaim\t100\n' ;;
      tank@tue) printf 'destroy\ttank@tue\nreclaim\t200\n' ;;
      tank@wed) printf 'destroy\ttank@wed\nreclaim\t150\n' ;;
      tank@mon%tue) printf 'reclaim\t340\n' ;;
      tank@tue%wed) printf 'reclaim\t390\n' ;;
      tank@mon%wed) printf 'reclaim\t540\n' ;;
      broken@*) printf 'would destroy broken@mon\n' ;;
      *) echo "could not find any snapshots to destroy" >&2; exit 1 ;;
    esac
    ;;
  *)
    exit 2
    ;;
esac
"#;

struct ScriptedZfs {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl ScriptedZfs {
    /// Shared script, written once before any test executes it
    fn shared() -> &'static Self {
        static SCRIPT: OnceLock<ScriptedZfs> = OnceLock::new();
        SCRIPT.get_or_init(Self::create)
    }

    fn create() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("zfs");
        fs::write(&path, FAKE_ZFS).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    fn config(&self) -> ZfsConfig {
        ZfsConfig::with_binary(&self.path)
    }

    fn bridge(&self) -> ZfsBridge {
        ZfsBridge::new(self.config())
    }
}

fn options() -> AnalyzeOptions {
    AnalyzeOptions {
        format: SizeFormat::Short,
        width: 60,
        sequential: false,
        strict: false,
        json: false,
        shorten: true,
        progress: false,
    }
}

#[test]
fn test_bridge_lists_datasets_and_snapshots() {
    let zfs = ScriptedZfs::shared();
    let bridge = zfs.bridge();

    assert_eq!(bridge.datasets().unwrap(), vec!["tank", "tank/child", "broken"]);

    let snapshots = bridge.snapshots("tank").unwrap();
    let names: Vec<&str> = snapshots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["mon", "tue", "wed"]);
    assert_eq!(snapshots[2].created.unwrap().timestamp(), 1_700_172_800);
}

#[test]
fn test_bridge_reclaim_preview() {
    let zfs = ScriptedZfs::shared();
    let bridge = zfs.bridge();

    assert_eq!(bridge.reclaimable("tank", "tue", "tue").unwrap(), 200);
    assert_eq!(bridge.reclaimable("tank", "mon", "wed").unwrap(), 540);
}

#[test]
fn test_bridge_command_failure() {
    let zfs = ScriptedZfs::shared();
    let err = zfs.bridge().reclaimable("tank", "mon", "fri").unwrap_err();
    match err {
        ZfspaceError::Command { command, message } => {
            assert!(command.contains("destroy -n -v -p tank@mon%fri"));
            assert!(message.contains("could not find any snapshots"));
        }
        other => panic!("Expected Command error, got {:?}", other),
    }
}

#[test]
fn test_bridge_missing_binary() {
    let bridge = ZfsBridge::new(ZfsConfig::with_binary("/nonexistent/zfs"));
    assert!(matches!(bridge.datasets(), Err(ZfspaceError::Command { .. })));
}

#[test]
fn test_analyze_through_scripted_zfs() {
    let zfs = ScriptedZfs::shared();
    let mut out = Vec::new();
    analyze_command(&zfs.bridge(), &zfs.config(), "tank", &options(), &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("3 snapshots, 540B reclaimable"));
    assert!(lines[1].contains("10B"));
    assert!(lines[4].contains("mon") && lines[4].contains("wed"));
}

#[test]
fn test_malformed_preview_aborts_without_output() {
    let zfs = ScriptedZfs::shared();
    let mut out = Vec::new();
    let options = AnalyzeOptions {
        sequential: true,
        ..options()
    };
    let err = analyze_command(&zfs.bridge(), &zfs.config(), "broken", &options, &mut out).unwrap_err();

    match err {
        ZfspaceError::OracleProtocol { message } => assert!(message.contains("broken@mon")),
        other => panic!("Expected OracleProtocol, got {:?}", other),
    }
    assert!(out.is_empty());
}
