//! Factory functions for the path finders
//!
//! ```rust,ignore
//! use pathgraph_core::algo;
//! use pathgraph_core::graph::{Direction, PathExpanders, PathFinder};
//!
//! let finder = algo::shortest_path(
//!     PathExpanders::for_type_and_direction("KNOWS", Direction::Outgoing),
//!     15,
//! );
//! let path = finder.find_single_path(&graph, alice, bob)?;
//! ```

use crate::graph::algos::{AStar, Dijkstra, ShortestPath};
use crate::graph::eval::{CommonEvaluators, CostEvaluator, EstimateEvaluator, PropertyCost};
use crate::graph::expander::PathExpander;

/// Fewest-hops finder; paths longer than `max_depth` relationships are not
/// searched for
pub fn shortest_path<E: PathExpander>(expander: E, max_depth: usize) -> ShortestPath<E> {
    ShortestPath::new(expander, max_depth)
}

/// Cheapest-path finder reading each relationship's cost from `property`
pub fn dijkstra<E: PathExpander>(
    expander: E,
    property: impl Into<String>,
) -> Dijkstra<E, PropertyCost> {
    Dijkstra::new(expander, CommonEvaluators::double_cost(property))
}

/// Cheapest-path finder with a custom cost evaluator
pub fn dijkstra_with<E: PathExpander, C: CostEvaluator>(expander: E, cost: C) -> Dijkstra<E, C> {
    Dijkstra::new(expander, cost)
}

pub fn a_star<E, C, H>(expander: E, cost: C, estimate: H) -> AStar<E, C, H>
where
    E: PathExpander,
    C: CostEvaluator,
    H: EstimateEvaluator,
{
    AStar::new(expander, cost, estimate)
}
