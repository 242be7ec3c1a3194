//! Integration tests for `pathgraph inspect`

mod support;

use predicates::prelude::*;
use support::{pathgraph, write_file, DIAMOND_TOML, ROADS_JSON};
use tempfile::tempdir;

#[test]
fn test_inspect_human() {
    let dir = tempdir().unwrap();
    let graph = write_file(dir.path(), "roads.json", ROADS_JSON);

    pathgraph()
        .args(["inspect", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes: 6\nRelationships: 6"))
        .stdout(predicate::str::contains("Relationship types:\n  RAIL (3)\n  ROAD (3)"))
        .stdout(predicate::str::contains("Labels:\n  City (3)\n  Town (1)"));
}

#[test]
fn test_inspect_records() {
    let dir = tempdir().unwrap();
    let graph = write_file(dir.path(), "diamond.toml", DIAMOND_TOML);

    pathgraph()
        .args(["--format", "records", "inspect", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "H pathgraph=1 records=1 mode=inspect nodes=4 relationships=4\nT \"LINK\" count=4\n",
        ));
}

#[test]
fn test_inspect_json() {
    let dir = tempdir().unwrap();
    let graph = write_file(dir.path(), "roads.json", ROADS_JSON);

    let output = pathgraph()
        .args(["--format", "json", "inspect", "--graph"])
        .arg(&graph)
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["nodes"], 6);
    assert_eq!(summary["relationships"], 6);
    assert_eq!(summary["relationship_types"]["ROAD"], 3);
    assert_eq!(summary["labels"]["Town"], 1);
}
