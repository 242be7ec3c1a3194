//! Path expanders: which relationships a search may follow from a node

use crate::graph::model::Graph;
use crate::graph::types::{Direction, NodeId, RelationshipId, RelationshipType, Travel};

/// Policy selecting the relationships traversable from a node.
///
/// Implementations must be deterministic for a fixed graph and must not
/// mutate anything, since one expander is shared by every search that uses
/// it, possibly from several threads.
pub trait PathExpander: Send + Sync {
    /// Relationships admissible from `node` when the search travels in
    /// `travel` direction. Unknown nodes expand to nothing.
    fn expand(&self, graph: &Graph, node: NodeId, travel: Travel) -> Vec<RelationshipId>;
}

/// Expansion rules of a [`StandardExpander`]
#[derive(Debug, Clone, PartialEq)]
enum Rules {
    /// Every relationship type in the given direction
    AnyType(Direction),
    /// Only the listed types, each with its own direction
    Typed(Vec<(RelationshipType, Direction)>),
}

/// Type/direction filtering expander built by [`PathExpanders`]
#[derive(Debug, Clone, PartialEq)]
pub struct StandardExpander {
    rules: Rules,
}

impl StandardExpander {
    fn admits(&self, rel_type: &RelationshipType, actual: Direction, travel: Travel) -> bool {
        match &self.rules {
            Rules::AnyType(direction) => travel.apply(*direction).admits(actual),
            Rules::Typed(types) => types
                .iter()
                .any(|(t, direction)| t == rel_type && travel.apply(*direction).admits(actual)),
        }
    }

    /// Add another type/direction pair. An "any type" expander is left as is.
    pub fn add(mut self, rel_type: impl Into<RelationshipType>, direction: Direction) -> Self {
        if let Rules::Typed(types) = &mut self.rules {
            types.push((rel_type.into(), direction));
        }
        self
    }
}

impl PathExpander for StandardExpander {
    fn expand(&self, graph: &Graph, node: NodeId, travel: Travel) -> Vec<RelationshipId> {
        let Some(n) = graph.node(node) else {
            return Vec::new();
        };

        let mut admitted = Vec::new();
        for id in n.outgoing() {
            if let Some(rel) = graph.relationship(*id) {
                if self.admits(rel.rel_type(), Direction::Outgoing, travel) {
                    admitted.push(*id);
                }
            }
        }
        for id in n.incoming() {
            if let Some(rel) = graph.relationship(*id) {
                // Self-loops sit in both lists
                if rel.is_self_loop() && admitted.contains(id) {
                    continue;
                }
                if self.admits(rel.rel_type(), Direction::Incoming, travel) {
                    admitted.push(*id);
                }
            }
        }
        admitted
    }
}

/// Expander built from a closure
pub struct FnExpander<F>(F);

impl<F> PathExpander for FnExpander<F>
where
    F: Fn(&Graph, NodeId, Travel) -> Vec<RelationshipId> + Send + Sync,
{
    fn expand(&self, graph: &Graph, node: NodeId, travel: Travel) -> Vec<RelationshipId> {
        (self.0)(graph, node, travel)
    }
}

/// Constructors for the common expanders
pub struct PathExpanders;

impl PathExpanders {
    /// Follow every relationship in both directions
    pub fn all_types_and_directions() -> StandardExpander {
        StandardExpander {
            rules: Rules::AnyType(Direction::Both),
        }
    }

    /// Follow every relationship type in one direction
    pub fn for_direction(direction: Direction) -> StandardExpander {
        StandardExpander {
            rules: Rules::AnyType(direction),
        }
    }

    /// Follow one relationship type in one direction
    pub fn for_type_and_direction(
        rel_type: impl Into<RelationshipType>,
        direction: Direction,
    ) -> StandardExpander {
        StandardExpander {
            rules: Rules::Typed(vec![(rel_type.into(), direction)]),
        }
    }

    /// Follow several relationship types, each in its own direction
    pub fn for_types_and_directions<I, T>(pairs: I) -> StandardExpander
    where
        I: IntoIterator<Item = (T, Direction)>,
        T: Into<RelationshipType>,
    {
        StandardExpander {
            rules: Rules::Typed(
                pairs
                    .into_iter()
                    .map(|(t, direction)| (t.into(), direction))
                    .collect(),
            ),
        }
    }

    /// Wrap a closure as an expander
    pub fn from_fn<F>(f: F) -> FnExpander<F>
    where
        F: Fn(&Graph, NodeId, Travel) -> Vec<RelationshipId> + Send + Sync,
    {
        FnExpander(f)
    }
}
