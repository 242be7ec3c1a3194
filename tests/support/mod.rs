use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for pathgraph
pub fn pathgraph() -> Command {
    cargo_bin_cmd!("pathgraph")
}

/// Road network with coordinates:
///
/// ```text
///   a --3-- c --6-- b          a --12-- b directly (ROAD)
///   a --2-- d --4-- e --4-- b  (RAIL)
/// ```
///
/// Lengths never undercut the straight-line distance between coordinates.
/// `z` is isolated.
#[allow(dead_code)]
pub const ROADS_JSON: &str = r#"{
  "nodes": [
    { "key": "a", "labels": ["City"], "properties": { "name": "Aston", "x": 0.0, "y": 0.0 } },
    { "key": "b", "labels": ["City"], "properties": { "name": "Bury", "x": 7.0, "y": 0.0 } },
    { "key": "c", "labels": ["Town"], "properties": { "name": "Crewe", "x": 2.0, "y": 1.0 } },
    { "key": "d", "properties": { "x": 1.0, "y": -1.0 } },
    { "key": "e", "properties": { "x": 4.0, "y": -1.0 } },
    { "key": "z", "labels": ["City"], "properties": { "name": "Zennor" } }
  ],
  "relationships": [
    { "from": "a", "to": "c", "type": "ROAD", "properties": { "length": 3.0 } },
    { "from": "c", "to": "b", "type": "ROAD", "properties": { "length": 6.0 } },
    { "from": "a", "to": "b", "type": "ROAD", "properties": { "length": 12.0 } },
    { "from": "a", "to": "d", "type": "RAIL", "properties": { "length": 2.0 } },
    { "from": "d", "to": "e", "type": "RAIL", "properties": { "length": 4.0 } },
    { "from": "e", "to": "b", "type": "RAIL", "properties": { "length": 4.0 } }
  ]
}"#;

/// Square with two equal-length sides: s -> l -> t and s -> r -> t
#[allow(dead_code)]
pub const DIAMOND_TOML: &str = r#"
[[nodes]]
key = "s"

[[nodes]]
key = "l"

[[nodes]]
key = "r"

[[nodes]]
key = "t"

[[relationships]]
from = "s"
to = "l"
type = "LINK"
properties = { cost = 1.0 }

[[relationships]]
from = "s"
to = "r"
type = "LINK"
properties = { cost = 1.0 }

[[relationships]]
from = "l"
to = "t"
type = "LINK"
properties = { cost = 1.0 }

[[relationships]]
from = "r"
to = "t"
type = "LINK"
properties = { cost = 1.0 }
"#;

/// Write `content` into `dir` under `name` and return its path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
