//! Integration tests for `pathgraph find`

mod support;

use predicates::prelude::*;
use support::{pathgraph, write_file, DIAMOND_TOML, ROADS_JSON};
use tempfile::{tempdir, TempDir};

fn roads() -> (TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "roads.json", ROADS_JSON);
    (dir, path)
}

// ============================================================================
// Fewest hops
// ============================================================================

#[test]
fn test_shortest_path_prefers_fewest_hops() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 path from a to b (shortest-path)"))
        .stdout(predicate::str::contains("1. a -[ROAD]-> b  (length 1)"));
}

#[test]
fn test_shortest_path_respects_max_depth() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--type", "RAIL", "--max-depth", "2"])
        .arg("--graph")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("No path found from a to b"));

    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--type", "RAIL", "--max-depth", "3"])
        .arg("--graph")
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("a -[RAIL]-> d -[RAIL]-> e -[RAIL]-> b  (length 3)"));
}

#[test]
fn test_all_shortest_paths_from_toml_document() {
    let dir = tempdir().unwrap();
    let graph = write_file(dir.path(), "diamond.toml", DIAMOND_TOML);

    let output = pathgraph()
        .args(["--format", "records", "find", "--from", "s", "--to", "t", "--all"])
        .arg("--graph")
        .arg(&graph)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[0],
        r#"H pathgraph=1 records=1 mode=path algorithm=shortest-path from="s" to="t" found=true paths=2"#
    );
    let headers: Vec<&&str> = lines.iter().filter(|l| l.starts_with("P ")).collect();
    assert_eq!(headers, vec![&"P 1 length=2", &"P 2 length=2"]);

    let middles: Vec<&str> = lines
        .iter()
        .filter(|l| l.starts_with("N 1 ") || l.starts_with("N 2 "))
        .copied()
        .collect();
    assert_eq!(middles.len(), 2);
}

#[test]
fn test_max_paths_caps_results() {
    let dir = tempdir().unwrap();
    let graph = write_file(dir.path(), "diamond.toml", DIAMOND_TOML);

    pathgraph()
        .args(["find", "--from", "s", "--to", "t", "--all", "--max-paths", "1"])
        .args(["--algorithm", "dijkstra", "--cost-property", "cost", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1 path from s to t (dijkstra)"));
}

// ============================================================================
// Dijkstra
// ============================================================================

#[test]
fn test_dijkstra_finds_cheapest_route() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--algorithm", "dijkstra"])
        .args(["--cost-property", "length", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 path from a to b (dijkstra)"))
        .stdout(predicate::str::contains("a -[ROAD]-> c -[ROAD]-> b  (length 2, weight 9)"));
}

#[test]
fn test_dijkstra_against_relationship_direction() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "b", "--to", "a", "--algorithm", "dijkstra"])
        .args(["--cost-property", "length", "--direction", "outgoing", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("No path found from b to a"));

    pathgraph()
        .args(["find", "--from", "b", "--to", "a", "--algorithm", "dijkstra"])
        .args(["--cost-property", "length", "--direction", "incoming", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("b <-[ROAD]- c <-[ROAD]- a  (length 2, weight 9)"));
}

#[test]
fn test_missing_cost_property_uses_default_cost() {
    let (_dir, graph) = roads();

    // Nothing carries `toll`, so every relationship costs the default
    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--algorithm", "dijkstra"])
        .args(["--cost-property", "toll", "--default-cost", "2.5", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("a -[ROAD]-> b  (length 1, weight 2.5)"));
}

#[test]
fn test_missing_cost_property_without_default_is_data_error() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--algorithm", "dijkstra"])
        .args(["--cost-property", "toll", "--graph"])
        .arg(&graph)
        .assert()
        .code(3);
}

// ============================================================================
// A*
// ============================================================================

#[test]
fn test_astar_with_euclidean_estimate() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--algorithm", "astar"])
        .args(["--cost-property", "length", "--estimate", "euclidean", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 path from a to b (astar)"))
        .stdout(predicate::str::contains("(length 2, weight 9)"));
}

#[test]
fn test_astar_with_custom_estimate_keys() {
    let (_dir, graph) = roads();

    // No node has `px`/`py`, so the estimate is zero everywhere
    pathgraph()
        .args(["find", "--from", "a", "--to", "b", "--algorithm", "astar"])
        .args(["--cost-property", "length", "--estimate", "euclidean"])
        .args(["--estimate-keys", "px,py", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("weight 9"));
}

// ============================================================================
// Endpoints and output
// ============================================================================

#[test]
fn test_property_and_label_selectors() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "name=Aston", "--to", "City:name=Bury", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 path from name=Aston to City:name=Bury"))
        .stdout(predicate::str::contains("a -[ROAD]-> b"));
}

#[test]
fn test_not_found_is_success() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["find", "--from", "a", "--to", "z", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("No path found from a to z"));
}

#[test]
fn test_json_output() {
    let (_dir, graph) = roads();

    let output = pathgraph()
        .args(["--format", "json", "find", "--from", "a", "--to", "b"])
        .args(["--algorithm", "dijkstra", "--cost-property", "length", "--graph"])
        .arg(&graph)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["found"], true);
    assert_eq!(report["algorithm"], "dijkstra");
    assert_eq!(report["paths"][0]["weight"], 9.0);
    assert_eq!(report["paths"][0]["length"], 2);

    let keys: Vec<&str> = report["paths"][0]["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["a", "c", "b"]);
    assert_eq!(report["paths"][0]["nodes"][1]["properties"]["name"], "Crewe");
}

#[test]
fn test_json_output_when_not_found() {
    let (_dir, graph) = roads();

    let output = pathgraph()
        .args(["--format", "json", "find", "--from", "a", "--to", "z", "--graph"])
        .arg(&graph)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["found"], false);
    assert_eq!(report["paths"].as_array().unwrap().len(), 0);
}

#[test]
fn test_records_output() {
    let (_dir, graph) = roads();

    pathgraph()
        .args(["--format", "records", "find", "--from", "a", "--to", "b"])
        .args(["--algorithm", "dijkstra", "--cost-property", "length", "--graph"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "H pathgraph=1 records=1 mode=path algorithm=dijkstra from=\"a\" to=\"b\" found=true paths=1\n\
             P 1 length=2 weight=9\n\
             N 0 \"a\" labels=City\n\
             N 2 \"c\" labels=Town\n\
             N 1 \"b\" labels=City\n\
             R 0 \"ROAD\" 0 2\n\
             R 1 \"ROAD\" 2 1\n",
        ));
}

#[test]
fn test_verbose_keeps_stdout_clean() {
    let (_dir, graph) = roads();

    let output = pathgraph()
        .args(["--verbose", "--format", "json", "find", "--from", "a", "--to", "b", "--graph"])
        .arg(&graph)
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["found"], true);
}
