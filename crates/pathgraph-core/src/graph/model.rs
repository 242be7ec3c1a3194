//! In-memory property graph
//!
//! Nodes and relationships live in dense vectors indexed by their ids. Each
//! node keeps its outgoing and incoming relationship ids in creation order,
//! which is the adjacency order expanders report.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{PathError, Result};
use crate::graph::types::{Direction, NodeId, PropertyValue, RelationshipId, RelationshipType};

/// A node with labels, properties and adjacency lists
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    labels: Vec<String>,
    properties: BTreeMap<String, PropertyValue>,
    outgoing: Vec<RelationshipId>,
    incoming: Vec<RelationshipId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    pub fn outgoing(&self) -> &[RelationshipId] {
        &self.outgoing
    }

    pub fn incoming(&self) -> &[RelationshipId] {
        &self.incoming
    }
}

/// A directed, typed relationship between two nodes
#[derive(Debug, Clone)]
pub struct Relationship {
    id: RelationshipId,
    start: NodeId,
    end: NodeId,
    rel_type: RelationshipType,
    properties: BTreeMap<String, PropertyValue>,
}

impl Relationship {
    pub fn id(&self) -> RelationshipId {
        self.id
    }

    pub fn start_node(&self) -> NodeId {
        self.start
    }

    pub fn end_node(&self) -> NodeId {
        self.end
    }

    pub fn rel_type(&self) -> &RelationshipType {
        &self.rel_type
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn properties(&self) -> &BTreeMap<String, PropertyValue> {
        &self.properties
    }

    /// The node at the opposite end from `node`, if `node` is an endpoint
    pub fn other_node(&self, node: NodeId) -> Option<NodeId> {
        if node == self.start {
            Some(self.end)
        } else if node == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    /// Direction of travel when walking this relationship away from `node`
    pub fn direction_from(&self, node: NodeId) -> Direction {
        if node == self.start {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

/// Property graph owning all nodes and relationships.
///
/// Finders only ever take `&Graph`, so a graph can be shared across threads
/// and searched concurrently once it is built.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node without labels or properties
    pub fn create_node(&mut self) -> NodeId {
        self.create_node_with(Vec::<String>::new(), Vec::<(String, PropertyValue)>::new())
    }

    /// Create a node with labels and properties
    pub fn create_node_with<L, P, K, V>(&mut self, labels: L, properties: P) -> NodeId
    where
        L: IntoIterator,
        L::Item: Into<String>,
        P: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            id,
            labels: labels.into_iter().map(Into::into).collect(),
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        });
        id
    }

    /// Create a relationship from `start` to `end`
    pub fn create_relationship(
        &mut self,
        start: NodeId,
        end: NodeId,
        rel_type: impl Into<RelationshipType>,
    ) -> Result<RelationshipId> {
        self.require_node(start)?;
        self.require_node(end)?;

        let id = RelationshipId::new(self.relationships.len());
        self.relationships.push(Relationship {
            id,
            start,
            end,
            rel_type: rel_type.into(),
            properties: BTreeMap::new(),
        });
        self.nodes[start.index()].outgoing.push(id);
        self.nodes[end.index()].incoming.push(id);
        Ok(id)
    }

    pub fn set_node_property(
        &mut self,
        node: NodeId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        let node = self
            .nodes
            .get_mut(node.index())
            .ok_or(PathError::NodeNotFound { id: node })?;
        node.properties.insert(key.into(), value.into());
        Ok(())
    }

    pub fn set_relationship_property(
        &mut self,
        relationship: RelationshipId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Result<()> {
        let rel = self
            .relationships
            .get_mut(relationship.index())
            .ok_or(PathError::RelationshipNotFound { id: relationship })?;
        rel.properties.insert(key.into(), value.into());
        Ok(())
    }

    pub fn add_label(&mut self, node: NodeId, label: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .get_mut(node.index())
            .ok_or(PathError::NodeNotFound { id: node })?;
        let label = label.into();
        if !node.labels.contains(&label) {
            node.labels.push(label);
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn require_node(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(PathError::NodeNotFound { id })
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.get(id.index())
    }

    pub fn require_relationship(&self, id: RelationshipId) -> Result<&Relationship> {
        self.relationship(id)
            .ok_or(PathError::RelationshipNotFound { id })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn all_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter()
    }

    /// Relationships attached to `node` in the given direction, in adjacency
    /// order (outgoing first). A self-loop is reported once.
    pub fn relationships(&self, node: NodeId, direction: Direction) -> Result<Vec<&Relationship>> {
        let n = self.require_node(node)?;
        let mut rels = Vec::new();
        if direction.admits(Direction::Outgoing) {
            rels.extend(n.outgoing.iter().map(|id| &self.relationships[id.index()]));
        }
        if direction.admits(Direction::Incoming) {
            for id in &n.incoming {
                let rel = &self.relationships[id.index()];
                if rel.is_self_loop() && direction == Direction::Both {
                    continue;
                }
                rels.push(rel);
            }
        }
        Ok(rels)
    }

    /// The node opposite `node` on `relationship`
    pub fn other_node(&self, relationship: RelationshipId, node: NodeId) -> Result<NodeId> {
        let rel = self.require_relationship(relationship)?;
        rel.other_node(node).ok_or_else(|| {
            PathError::invalid_value(
                "endpoint",
                format!("node {} is not attached to relationship {}", node, relationship),
            )
        })
    }

    /// All nodes whose property `key` equals `value`, in id order
    pub fn find_nodes(&self, key: &str, value: &PropertyValue) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.property(key) == Some(value))
            .map(|n| n.id)
            .collect()
    }

    /// First node carrying `label` whose property `key` equals `value`
    pub fn find_node_by_label(
        &self,
        label: &str,
        key: &str,
        value: &PropertyValue,
    ) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.has_label(label) && n.property(key) == Some(value))
            .map(|n| n.id)
    }

    /// Distinct relationship type names present in the graph
    pub fn relationship_types(&self) -> BTreeSet<&str> {
        self.relationships
            .iter()
            .map(|r| r.rel_type.name())
            .collect()
    }

    /// Distinct node labels present in the graph
    pub fn labels(&self) -> BTreeSet<&str> {
        self.nodes
            .iter()
            .flat_map(|n| n.labels.iter().map(String::as_str))
            .collect()
    }
}
