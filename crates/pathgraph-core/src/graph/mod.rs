//! Property graph model and path finding
//!
//! - `model`: nodes, relationships and the owning `Graph`
//! - `document`: JSON/TOML graph documents and endpoint selectors
//! - `expander`: which relationships a search may follow
//! - `eval`: relationship costs and remaining-cost estimates
//! - `path`: result objects and the `PathFinder` trait
//! - `algos`: the finders themselves

pub mod algos;
pub mod document;
pub mod eval;
pub mod expander;
pub mod model;
pub mod path;
pub mod types;

pub use algos::{AStar, Dijkstra, SearchLimits, ShortestPath};
pub use document::{load_graph, GraphDocument, LoadedGraph};
pub use eval::{CommonEvaluators, CostEvaluator, EstimateEvaluator};
pub use expander::{PathExpander, PathExpanders, StandardExpander};
pub use model::{Graph, Node, Relationship};
pub use path::{Path, PathFinder, PathIter, WeightedPath};
pub use types::{Direction, NodeId, PropertyValue, RelationshipId, RelationshipType, Travel};
