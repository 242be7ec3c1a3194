//! Graph documents
//!
//! A graph document is a JSON or TOML file listing nodes (by a document-local
//! key) and the relationships between them:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "key": "A", "labels": ["City"], "properties": { "x": 0.0, "y": 0.0 } }
//!   ],
//!   "relationships": [
//!     { "from": "A", "to": "B", "type": "ROAD", "properties": { "length": 2.0 } }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::graph::model::Graph;
use crate::graph::types::{NodeId, PropertyValue};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub relationships: Vec<RelationshipEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeEntry {
    pub key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipEntry {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// A graph built from a document, with the document keys kept for lookups
#[derive(Debug, Clone, Default)]
pub struct LoadedGraph {
    pub graph: Graph,
    keys: HashMap<String, NodeId>,
    names: Vec<String>,
}

impl LoadedGraph {
    /// Node registered under a document key
    pub fn node_for_key(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Document key of a node
    pub fn key_of(&self, node: NodeId) -> Option<&str> {
        self.names.get(node.index()).map(String::as_str)
    }

    /// Resolve an endpoint selector.
    ///
    /// `key` selects by document key; `prop=value` selects the first node
    /// whose property equals the parsed literal; `Label:prop=value` also
    /// requires the label.
    pub fn resolve(&self, selector: &str) -> Result<NodeId> {
        if let Some(id) = self.node_for_key(selector) {
            return Ok(id);
        }

        let unknown = || PathError::UnknownEndpoint {
            selector: selector.to_string(),
        };

        let (lhs, raw) = selector.split_once('=').ok_or_else(unknown)?;
        let value = PropertyValue::parse_literal(raw);
        let found = match lhs.split_once(':') {
            Some((label, key)) => self.graph.find_node_by_label(label, key, &value),
            None => self.graph.find_nodes(lhs, &value).into_iter().next(),
        };
        found.ok_or_else(unknown)
    }
}

impl GraphDocument {
    /// Load a document, choosing the parser from the file extension
    /// (`.toml` is TOML, everything else JSON)
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PathError::invalid_graph(path, e))?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(&content).map_err(|e| PathError::invalid_graph(path, e))
        } else {
            serde_json::from_str(&content).map_err(|e| PathError::invalid_graph(path, e))
        }
    }

    /// Build the in-memory graph. Duplicate keys and relationships pointing at
    /// undeclared keys are rejected.
    #[tracing::instrument(skip(self, origin), fields(nodes = self.nodes.len(), relationships = self.relationships.len()))]
    pub fn build(&self, origin: &Path) -> Result<LoadedGraph> {
        let mut loaded = LoadedGraph::default();

        for entry in &self.nodes {
            if loaded.keys.contains_key(&entry.key) {
                return Err(PathError::invalid_graph(
                    origin,
                    format!("duplicate node key '{}'", entry.key),
                ));
            }
            let id = loaded
                .graph
                .create_node_with(entry.labels.iter().cloned(), entry.properties.clone());
            loaded.keys.insert(entry.key.clone(), id);
            loaded.names.push(entry.key.clone());
        }

        for (index, entry) in self.relationships.iter().enumerate() {
            let endpoint = |key: &str| {
                loaded.node_for_key(key).ok_or_else(|| {
                    PathError::invalid_graph(
                        origin,
                        format!("relationship #{} references unknown node '{}'", index, key),
                    )
                })
            };
            let from = endpoint(&entry.from)?;
            let to = endpoint(&entry.to)?;

            let rel = loaded
                .graph
                .create_relationship(from, to, entry.rel_type.as_str())?;
            for (key, value) in &entry.properties {
                loaded
                    .graph
                    .set_relationship_property(rel, key.clone(), value.clone())?;
            }
        }

        tracing::debug!(
            nodes = loaded.graph.node_count(),
            relationships = loaded.graph.relationship_count(),
            "graph_built"
        );
        Ok(loaded)
    }
}

/// Load and build a graph document in one step
pub fn load_graph(path: &Path) -> Result<LoadedGraph> {
    GraphDocument::load(path)?.build(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const JSON_DOC: &str = r#"{
        "nodes": [
            { "key": "A", "labels": ["City"], "properties": { "name": "Alpha", "x": 0.0 } },
            { "key": "B", "properties": { "name": "Beta", "x": 7.0 } }
        ],
        "relationships": [
            { "from": "A", "to": "B", "type": "ROAD", "properties": { "length": 10.0 } }
        ]
    }"#;

    fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_document() {
        let file = write_temp(".json", JSON_DOC);
        let loaded = load_graph(file.path()).unwrap();

        assert_eq!(loaded.graph.node_count(), 2);
        assert_eq!(loaded.graph.relationship_count(), 1);

        let a = loaded.node_for_key("A").unwrap();
        assert_eq!(loaded.key_of(a), Some("A"));
        assert!(loaded.graph.require_node(a).unwrap().has_label("City"));

        let rel = loaded.graph.require_node(a).unwrap().outgoing()[0];
        let rel = loaded.graph.require_relationship(rel).unwrap();
        assert_eq!(rel.property("length"), Some(&PropertyValue::Float(10.0)));
    }

    #[test]
    fn test_load_toml_document() {
        let content = r#"
            [[nodes]]
            key = "A"

            [[nodes]]
            key = "B"

            [[relationships]]
            from = "A"
            to = "B"
            type = "MY_TYPE"
            properties = { cost = 1.0 }
        "#;
        let file = write_temp(".toml", content);
        let loaded = load_graph(file.path()).unwrap();

        assert_eq!(loaded.graph.node_count(), 2);
        assert_eq!(
            loaded.graph.relationship_types().into_iter().collect::<Vec<_>>(),
            vec!["MY_TYPE"]
        );
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let doc: GraphDocument =
            serde_json::from_str(r#"{"nodes": [{"key": "A"}, {"key": "A"}]}"#).unwrap();
        let err = doc.build(Path::new("dup.json")).unwrap_err();
        assert!(err.to_string().contains("duplicate node key 'A'"));
    }

    #[test]
    fn test_dangling_relationship_rejected() {
        let doc: GraphDocument = serde_json::from_str(
            r#"{"nodes": [{"key": "A"}], "relationships": [{"from": "A", "to": "Z", "type": "T"}]}"#,
        )
        .unwrap();
        let err = doc.build(Path::new("dangling.json")).unwrap_err();
        assert!(matches!(err, PathError::InvalidGraph { .. }));
        assert!(err.to_string().contains("unknown node 'Z'"));
    }

    #[test]
    fn test_resolve_selectors() {
        let file = write_temp(".json", JSON_DOC);
        let loaded = load_graph(file.path()).unwrap();
        let a = loaded.node_for_key("A").unwrap();
        let b = loaded.node_for_key("B").unwrap();

        assert_eq!(loaded.resolve("A").unwrap(), a);
        assert_eq!(loaded.resolve("name=Beta").unwrap(), b);
        assert_eq!(loaded.resolve("x=7.0").unwrap(), b);
        assert_eq!(loaded.resolve("City:name=Alpha").unwrap(), a);
        assert!(matches!(
            loaded.resolve("City:name=Beta"),
            Err(PathError::UnknownEndpoint { .. })
        ));
        assert!(loaded.resolve("nobody").is_err());
    }

    #[test]
    fn test_missing_file_is_data_error() {
        let err = load_graph(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, PathError::InvalidGraph { .. }));
        assert_eq!(err.exit_code(), crate::error::ExitCode::Data);
    }

    #[test]
    fn test_malformed_document_names_the_file() {
        let broken = [
            (".json", "{ \"nodes\": [ { \"key\": "),
            (".toml", "[[nodes]]\nkey = "),
        ];
        for (suffix, content) in broken {
            let file = write_temp(suffix, content);
            let err = load_graph(file.path()).unwrap_err();
            match &err {
                PathError::InvalidGraph { path, .. } => assert_eq!(path, file.path()),
                other => panic!("expected InvalidGraph, got {:?}", other),
            }
            assert_eq!(err.exit_code(), crate::error::ExitCode::Data);
        }
    }
}
