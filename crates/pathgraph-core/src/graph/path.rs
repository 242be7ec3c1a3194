//! Path result objects and the finder interface

use std::fmt;
use std::ops::Deref;

use crate::error::Result;
use crate::graph::model::Graph;
use crate::graph::types::{NodeId, RelationshipId};

/// Lazy sequence of paths returned by `find_all_paths`
pub type PathIter<P> = Box<dyn Iterator<Item = P> + Send>;

/// A route through the graph: nodes and the relationships between them,
/// ordered from start to end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    nodes: Vec<NodeId>,
    relationships: Vec<RelationshipId>,
}

impl Path {
    /// Zero-length path containing a single node
    pub(crate) fn single(node: NodeId) -> Self {
        Path {
            nodes: vec![node],
            relationships: Vec::new(),
        }
    }

    /// Callers guarantee `nodes.len() == relationships.len() + 1`
    pub(crate) fn from_parts(nodes: Vec<NodeId>, relationships: Vec<RelationshipId>) -> Self {
        debug_assert_eq!(nodes.len(), relationships.len() + 1);
        Path {
            nodes,
            relationships,
        }
    }

    /// Number of relationships
    pub fn length(&self) -> usize {
        self.relationships.len()
    }

    pub fn start_node(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end_node(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[RelationshipId] {
        &self.relationships
    }

    pub fn last_relationship(&self) -> Option<RelationshipId> {
        self.relationships.last().copied()
    }

    /// Render with relationship types and arrow directions, e.g.
    /// `(0)-[MY_TYPE,0]->(1)<-[MY_TYPE,2]-(3)`
    pub fn describe(&self, graph: &Graph) -> String {
        let mut out = format!("({})", self.nodes[0]);
        for (i, rel_id) in self.relationships.iter().enumerate() {
            let from = self.nodes[i];
            let to = self.nodes[i + 1];
            match graph.relationship(*rel_id) {
                Some(rel) if rel.start_node() == from => {
                    out.push_str(&format!("-[{},{}]->({})", rel.rel_type(), rel_id, to));
                }
                Some(rel) => {
                    out.push_str(&format!("<-[{},{}]-({})", rel.rel_type(), rel_id, to));
                }
                None => out.push_str(&format!("-[{}]-({})", rel_id, to)),
            }
        }
        out
    }
}

/// Ids only, `(0)-[3]-(1)`; [`Path::describe`] adds types and directions
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.nodes[0])?;
        for (rel, node) in self.relationships.iter().zip(&self.nodes[1..]) {
            write!(f, "-[{}]-({})", rel, node)?;
        }
        Ok(())
    }
}

/// A path together with its accumulated cost
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedPath {
    path: Path,
    weight: f64,
}

impl WeightedPath {
    pub(crate) fn new(path: Path, weight: f64) -> Self {
        WeightedPath { path, weight }
    }

    /// Sum of the relationship costs along the path
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}

impl Deref for WeightedPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for WeightedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} weight={}", self.path, self.weight)
    }
}

/// Common interface of every path-finding algorithm.
///
/// Unreachable targets are not errors: `find_single_path` returns `Ok(None)`
/// and `find_all_paths` an empty iterator. Errors are reserved for unknown
/// nodes, evaluator contract violations and exceeded search limits.
pub trait PathFinder: Send + Sync {
    type Path;

    fn find_single_path(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<Option<Self::Path>>;

    /// All optimal paths, produced lazily. Each call runs a fresh search.
    fn find_all_paths(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<PathIter<Self::Path>>;
}
