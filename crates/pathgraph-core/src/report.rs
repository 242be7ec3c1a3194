//! Serializable results of the `find` and `inspect` commands, with their
//! human and records renderings

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{Algorithm, FoundPath};
use crate::error::Result;
use crate::format::OutputFormat;
use crate::graph::document::LoadedGraph;
use crate::graph::types::PropertyValue;
use crate::records::{format_header, format_node_record, format_relationship_record, quoted};

#[derive(Debug, Clone, Serialize)]
pub struct NodeEntry {
    pub id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, PropertyValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationshipEntry {
    pub id: usize,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathEntry {
    pub length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub nodes: Vec<NodeEntry>,
    pub relationships: Vec<RelationshipEntry>,
}

/// Outcome of one `find` run
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub from: String,
    pub to: String,
    pub algorithm: Algorithm,
    pub found: bool,
    pub paths: Vec<PathEntry>,
}

impl PathReport {
    /// Describe `found` in terms of the loaded document
    pub fn new(
        loaded: &LoadedGraph,
        from: &str,
        to: &str,
        algorithm: Algorithm,
        found: &[FoundPath],
    ) -> Result<Self> {
        let graph = &loaded.graph;
        let mut paths = Vec::with_capacity(found.len());

        for entry in found {
            let mut nodes = Vec::with_capacity(entry.path.nodes().len());
            for id in entry.path.nodes() {
                let node = graph.require_node(*id)?;
                nodes.push(NodeEntry {
                    id: id.index(),
                    key: loaded.key_of(*id).map(str::to_string),
                    labels: node.labels().to_vec(),
                    properties: node.properties().clone(),
                });
            }

            let mut relationships = Vec::with_capacity(entry.path.length());
            for id in entry.path.relationships() {
                let rel = graph.require_relationship(*id)?;
                relationships.push(RelationshipEntry {
                    id: id.index(),
                    rel_type: rel.rel_type().to_string(),
                    start: rel.start_node().index(),
                    end: rel.end_node().index(),
                });
            }

            paths.push(PathEntry {
                length: entry.path.length(),
                weight: entry.weight,
                nodes,
                relationships,
            });
        }

        Ok(PathReport {
            from: from.to_string(),
            to: to.to_string(),
            algorithm,
            found: !paths.is_empty(),
            paths,
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Human => Ok(self.render_human()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Records => Ok(self.render_records()),
        }
    }

    fn render_human(&self) -> String {
        if !self.found {
            return format!("No path found from {} to {}", self.from, self.to);
        }

        let mut out = format!(
            "{} path{} from {} to {} ({})",
            self.paths.len(),
            if self.paths.len() == 1 { "" } else { "s" },
            self.from,
            self.to,
            self.algorithm
        );
        for (i, path) in self.paths.iter().enumerate() {
            out.push_str(&format!("\n  {}. {}", i + 1, path.describe()));
            match path.weight {
                Some(weight) => out.push_str(&format!("  (length {}, weight {})", path.length, weight)),
                None => out.push_str(&format!("  (length {})", path.length)),
            }
        }
        out
    }

    fn render_records(&self) -> String {
        let mut lines = vec![format_header(
            "path",
            &[
                ("algorithm", self.algorithm.to_string()),
                ("from", quoted(&self.from)),
                ("to", quoted(&self.to)),
                ("found", self.found.to_string()),
                ("paths", self.paths.len().to_string()),
            ],
        )];

        for (i, path) in self.paths.iter().enumerate() {
            let weight = path
                .weight
                .map(|w| format!(" weight={}", w))
                .unwrap_or_default();
            lines.push(format!("P {} length={}{}", i + 1, path.length, weight));
            for node in &path.nodes {
                lines.push(format_node_record(node.id, node.key.as_deref(), &node.labels));
            }
            for rel in &path.relationships {
                lines.push(format_relationship_record(rel.id, &rel.rel_type, rel.start, rel.end));
            }
        }
        lines.join("\n")
    }
}

impl PathEntry {
    /// `a -[ROAD]-> c <-[ROAD]- b`, using document keys where known
    fn describe(&self) -> String {
        let label = |node: &NodeEntry| match &node.key {
            Some(key) => key.clone(),
            None => format!("#{}", node.id),
        };

        let mut out = self.nodes.first().map(label).unwrap_or_default();
        for (rel, pair) in self.relationships.iter().zip(self.nodes.windows(2)) {
            if rel.start == pair[0].id {
                out.push_str(&format!(" -[{}]-> {}", rel.rel_type, label(&pair[1])));
            } else {
                out.push_str(&format!(" <-[{}]- {}", rel.rel_type, label(&pair[1])));
            }
        }
        out
    }
}

/// Summary of a graph document for `inspect`
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub nodes: usize,
    pub relationships: usize,
    pub relationship_types: BTreeMap<String, usize>,
    pub labels: BTreeMap<String, usize>,
}

impl InspectReport {
    pub fn new(loaded: &LoadedGraph) -> Self {
        let graph = &loaded.graph;
        let mut relationship_types = BTreeMap::new();
        for rel in graph.all_relationships() {
            *relationship_types
                .entry(rel.rel_type().to_string())
                .or_insert(0) += 1;
        }
        let mut labels = BTreeMap::new();
        for node in graph.nodes() {
            for label in node.labels() {
                *labels.entry(label.clone()).or_insert(0) += 1;
            }
        }

        InspectReport {
            nodes: graph.node_count(),
            relationships: graph.relationship_count(),
            relationship_types,
            labels,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Human => Ok(self.render_human()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Records => Ok(self.render_records()),
        }
    }

    fn render_human(&self) -> String {
        let mut out = format!(
            "Nodes: {}\nRelationships: {}",
            self.nodes, self.relationships
        );
        if !self.relationship_types.is_empty() {
            out.push_str("\nRelationship types:");
            for (name, count) in &self.relationship_types {
                out.push_str(&format!("\n  {} ({})", name, count));
            }
        }
        if !self.labels.is_empty() {
            out.push_str("\nLabels:");
            for (name, count) in &self.labels {
                out.push_str(&format!("\n  {} ({})", name, count));
            }
        }
        out
    }

    fn render_records(&self) -> String {
        let mut lines = vec![format_header(
            "inspect",
            &[
                ("nodes", self.nodes.to_string()),
                ("relationships", self.relationships.to_string()),
            ],
        )];
        for (name, count) in &self.relationship_types {
            lines.push(format!("T {} count={}", quoted(name), count));
        }
        for (name, count) in &self.labels {
            lines.push(format!("L {} count={}", quoted(name), count));
        }
        lines.join("\n")
    }
}
