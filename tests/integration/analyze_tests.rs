//! Integration tests for the analyze and list commands

use crate::common::assertions::assert_diagram_fits;
use crate::common::{sample_data, CliTestRunner, FakePool};
use zfspace::ZfspaceError;

#[test]
fn test_analyze_draws_diagram() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let output = runner.expect_success(&[
        "analyze", "tank/home", "--width", "60", "--format", "short", "--no-progress",
    ]);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "Analyzing tank/home ZFS dataset: 3 snapshots, 540B reclaimable by removing all of them."
    );
    assert_diagram_fits(&lines[1..], 60);
    assert!(lines[1].contains("10B"));
    assert_eq!(lines[2].matches("40B").count(), 2);
    assert!(lines[3].contains("100B") && lines[3].contains("200B") && lines[3].contains("150B"));
    assert!(lines[4].contains("...1") && lines[4].contains("...3"));
    assert_eq!(runner.pool().calls(), 6);
}

#[test]
fn test_analyze_full_names() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let output = runner.expect_success(&[
        "analyze", "tank/home", "--width", "90", "--no-shorten", "--sequential", "--no-progress",
    ]);
    let names_row = output.lines().last().unwrap();

    for name in sample_data::NAMES {
        assert!(names_row.contains(name), "missing {} in {:?}", name, names_row);
    }
}

#[test]
fn test_analyze_long_format() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let output = runner.expect_success(&["analyze", "tank/home", "--width", "80", "--no-progress"]);
    assert!(output.starts_with("Analyzing tank/home ZFS dataset: 3 snapshots, 540 B reclaimable"));
    assert!(output.contains("10 B"));
}

#[test]
fn test_analyze_json() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let output = runner.expect_success(&["analyze", "tank/home", "--json"]);
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(report["dataset"], "tank/home");
    assert_eq!(report["snapshots"][0]["name"], sample_data::NAMES[0]);
    assert_eq!(report["snapshots"][2]["index"], 2);
    assert_eq!(report["raw"][1], serde_json::json!([340, 390]));
    assert_eq!(report["exclusive"][1], serde_json::json!([40, 40]));
    assert_eq!(report["exclusive"][2][0], 10);
    assert_eq!(report["anomalies"], serde_json::json!([]));
}

#[test]
fn test_analyze_unknown_dataset_lists_valid_ones() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let err = runner.expect_failure(&["analyze", "tank/missing", "--width", "80"]);

    match &err {
        ZfspaceError::UnknownDataset { name, available } => {
            assert_eq!(name, "tank/missing");
            assert_eq!(available, &vec!["tank/home".to_string(), "tank".to_string()]);
        }
        other => panic!("Expected UnknownDataset, got {:?}", other),
    }
    assert!(err.to_string().contains("tank/home, tank"));
    assert_eq!(runner.pool().calls(), 0);
}

#[test]
fn test_analyze_dataset_without_snapshots() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let output = runner.expect_success(&["analyze", "tank", "--width", "80", "--no-progress"]);
    assert_eq!(output, "Analyzing tank ZFS dataset: no snapshots.\n");
}

#[test]
fn test_analyze_inconsistent_chain_draws_zero() {
    let runner = CliTestRunner::new(sample_data::inconsistent_pool());
    let output = runner.expect_success(&[
        "analyze", "tank", "--width", "60", "--format", "short", "--no-progress",
    ]);
    let lines: Vec<&str> = output.lines().collect();

    assert!(!output.contains('-'), "negative sizes must not be drawn: {}", output);
    assert_eq!(lines[2].matches("0B").count(), 2);
    assert!(lines[1].contains("50B"));
}

#[test]
fn test_analyze_inconsistent_chain_strict() {
    let runner = CliTestRunner::new(sample_data::inconsistent_pool());
    let err = runner.expect_failure(&["analyze", "tank", "--width", "60", "--strict", "--no-progress"]);
    assert!(matches!(err, ZfspaceError::InconsistentSpace { .. }));
}

#[test]
fn test_analyze_invalid_format() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let err = runner.expect_failure(&["analyze", "tank/home", "--format", "tiny"]);
    assert!(matches!(err, ZfspaceError::InvalidFormat { .. }));
    assert_eq!(runner.pool().calls(), 0);
}

#[test]
fn test_analyze_too_narrow() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let err = runner.expect_failure(&["analyze", "tank/home", "--width", "3", "--no-progress"]);
    assert!(matches!(err, ZfspaceError::LayoutTooNarrow { .. }));
}

#[test]
fn test_list_pretty() {
    let runner = CliTestRunner::new(sample_data::consistent_pool());
    let output = runner.expect_success(&["list"]);
    assert_eq!(output, "ZFS datasets:\n├─ tank/home\n└─ tank\n");
}

#[test]
fn test_list_json() {
    let runner = CliTestRunner::new(FakePool::new().with_dataset("rpool"));
    let output = runner.expect_success(&["list", "--format", "json"]);
    let datasets: Vec<String> = serde_json::from_str(&output).unwrap();
    assert_eq!(datasets, vec!["rpool"]);
}

#[test]
fn test_list_invalid_format() {
    let runner = CliTestRunner::new(FakePool::new());
    let err = runner.expect_failure(&["list", "--format", "xml"]);
    assert!(matches!(err, ZfspaceError::InvalidInput { .. }));
}
