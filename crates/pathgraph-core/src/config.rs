//! Finder configuration for pathgraph
//!
//! Settings come from an optional `pathgraph.toml` (`[finder]` table) and are
//! overridden field by field by command-line flags.

pub mod types;

use std::fs;
use std::path::Path as FsPath;
use std::time::Duration;

use crate::bail_config;
use crate::error::{PathError, Result};
use crate::graph::algos::{AStar, Dijkstra, SearchLimits, ShortestPath};
use crate::graph::eval::{CommonEvaluators, CoordinateEstimate, PropertyCost};
use crate::graph::expander::{PathExpanders, StandardExpander};
use crate::graph::model::Graph;
use crate::graph::path::{Path, PathFinder, WeightedPath};
use crate::graph::types::NodeId;

pub use types::{Algorithm, Config, FinderConfig, DEFAULT_MAX_DEPTH};

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &FsPath) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PathError::invalid_configuration(format!("{}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            PathError::invalid_configuration(format!("{}: {}", path.display(), e.message()))
        })
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &FsPath) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PathError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl FinderConfig {
    /// Read the `[finder]` table of a configuration file
    pub fn load(path: &FsPath) -> Result<Self> {
        Config::load(path).map(|config| config.finder)
    }

    /// Expander following the configured types in the configured direction
    pub fn expander(&self) -> StandardExpander {
        if self.relationship_types.is_empty() {
            PathExpanders::for_direction(self.direction)
        } else {
            PathExpanders::for_types_and_directions(
                self.relationship_types
                    .iter()
                    .map(|t| (t.as_str(), self.direction)),
            )
        }
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_steps: self.max_steps,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }

    fn cost_evaluator(&self) -> Result<PropertyCost> {
        let Some(property) = self.cost_property.as_deref() else {
            bail_config!("{} requires a cost property", self.algorithm);
        };
        Ok(match self.default_cost {
            Some(default) => CommonEvaluators::double_cost_or(property, default),
            None => CommonEvaluators::double_cost(property),
        })
    }

    fn estimate(&self) -> Result<CoordinateEstimate> {
        match &self.estimate {
            Some(estimate) => Ok(estimate.clone()),
            None => bail_config!("{} requires an estimate", self.algorithm),
        }
    }

    /// Check the settings and build the finder they describe
    #[tracing::instrument(skip(self), fields(algorithm = %self.algorithm))]
    pub fn build(&self) -> Result<ConfiguredFinder> {
        if let Some(cost) = self.default_cost {
            if !(cost.is_finite() && cost >= 0.0) {
                bail_config!("default cost must be finite and non-negative, got {}", cost);
            }
        }
        if self.max_paths == Some(0) {
            bail_config!("max_paths must be at least 1");
        }

        if !self.algorithm.is_weighted()
            && (self.cost_property.is_some() || self.estimate.is_some())
        {
            tracing::warn!("cost and estimate settings are ignored by {}", self.algorithm);
        }

        let finder = match self.algorithm {
            Algorithm::ShortestPath => AnyFinder::ShortestPath(
                ShortestPath::new(self.expander(), self.max_depth).with_limits(self.limits()),
            ),
            Algorithm::Dijkstra => AnyFinder::Dijkstra(
                Dijkstra::new(self.expander(), self.cost_evaluator()?).with_limits(self.limits()),
            ),
            Algorithm::AStar => AnyFinder::AStar(
                AStar::new(self.expander(), self.cost_evaluator()?, self.estimate()?)
                    .with_limits(self.limits()),
            ),
        };

        Ok(ConfiguredFinder {
            algorithm: self.algorithm,
            finder,
            all_paths: self.all_paths,
            max_paths: self.max_paths,
        })
    }
}

/// A path returned by a configured finder; `weight` is set by weighted
/// algorithms only
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    pub path: Path,
    pub weight: Option<f64>,
}

impl From<WeightedPath> for FoundPath {
    fn from(p: WeightedPath) -> Self {
        FoundPath {
            weight: Some(p.weight()),
            path: p.into_path(),
        }
    }
}

enum AnyFinder {
    ShortestPath(ShortestPath<StandardExpander>),
    Dijkstra(Dijkstra<StandardExpander, PropertyCost>),
    AStar(AStar<StandardExpander, PropertyCost, CoordinateEstimate>),
}

/// Finder built from a [`FinderConfig`]
pub struct ConfiguredFinder {
    algorithm: Algorithm,
    finder: AnyFinder,
    all_paths: bool,
    max_paths: Option<usize>,
}

impl ConfiguredFinder {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Run the search. Returns one path, or every optimal path (up to
    /// `max_paths`) when `all_paths` is configured. Empty when unreachable.
    pub fn find(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<Vec<FoundPath>> {
        let found = if self.all_paths {
            self.find_all(graph, start, end, self.max_paths.unwrap_or(usize::MAX))?
        } else {
            self.find_single(graph, start, end)?.into_iter().collect()
        };

        tracing::debug!(algorithm = %self.algorithm, paths = found.len(), "find_complete");
        Ok(found)
    }

    fn find_single(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<Option<FoundPath>> {
        Ok(match &self.finder {
            AnyFinder::ShortestPath(f) => f
                .find_single_path(graph, start, end)?
                .map(|path| FoundPath { path, weight: None }),
            AnyFinder::Dijkstra(f) => f.find_single_path(graph, start, end)?.map(FoundPath::from),
            AnyFinder::AStar(f) => f.find_single_path(graph, start, end)?.map(FoundPath::from),
        })
    }

    fn find_all(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
        limit: usize,
    ) -> Result<Vec<FoundPath>> {
        Ok(match &self.finder {
            AnyFinder::ShortestPath(f) => f
                .find_all_paths(graph, start, end)?
                .take(limit)
                .map(|path| FoundPath { path, weight: None })
                .collect(),
            AnyFinder::Dijkstra(f) => f
                .find_all_paths(graph, start, end)?
                .take(limit)
                .map(FoundPath::from)
                .collect(),
            AnyFinder::AStar(f) => f
                .find_all_paths(graph, start, end)?
                .take(limit)
                .map(FoundPath::from)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::eval::EuclideanEstimate;
    use crate::graph::types::Direction;
    use tempfile::tempdir;

    fn weighted_graph() -> (Graph, Vec<NodeId>) {
        let mut graph = Graph::new();
        let n: Vec<NodeId> = (0..4)
            .map(|i| graph.create_node_with(["Place"], [("x", i as f64), ("y", 0.0)]))
            .collect();
        for (from, to, cost) in [(0, 1, 1.0), (1, 3, 1.0), (0, 2, 1.0), (2, 3, 1.0), (0, 3, 5.0)] {
            let rel = graph.create_relationship(n[from], n[to], "ROAD").unwrap();
            graph.set_relationship_property(rel, "cost", cost).unwrap();
        }
        (graph, n)
    }

    #[test]
    fn test_default_config() {
        let config = FinderConfig::default();
        assert_eq!(config.algorithm, Algorithm::ShortestPath);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.direction, Direction::Both);
        assert!(!config.all_paths);
        assert_eq!(config.limits(), SearchLimits::unbounded());
    }

    #[test]
    fn test_parse_finder_table() {
        let config: Config = toml::from_str(
            r#"
            [finder]
            algorithm = "astar"
            relationship_types = ["ROAD"]
            direction = "outgoing"
            cost_property = "cost"
            default_cost = 1.5
            max_steps = 100
            timeout_ms = 250

            [finder.estimate]
            kind = "euclidean"
            x = "x"
            y = "y"
            "#,
        )
        .unwrap();

        let finder = config.finder;
        assert_eq!(finder.algorithm, Algorithm::AStar);
        assert_eq!(finder.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(finder.direction, Direction::Outgoing);
        assert_eq!(finder.default_cost, Some(1.5));
        assert_eq!(
            finder.estimate,
            Some(CoordinateEstimate::Euclidean(EuclideanEstimate {
                x: "x".into(),
                y: "y".into()
            }))
        );
        assert_eq!(
            finder.limits(),
            SearchLimits::unbounded()
                .with_max_steps(100)
                .with_timeout(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_algorithm_from_str() {
        assert_eq!("dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("bfs".parse::<Algorithm>().unwrap(), Algorithm::ShortestPath);
        assert!("greedy".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::AStar.to_string(), "astar");
        assert!(Algorithm::Dijkstra.is_weighted());
        assert!(!Algorithm::ShortestPath.is_weighted());
    }

    #[test]
    fn test_weighted_algorithms_require_cost_property() {
        for algorithm in [Algorithm::Dijkstra, Algorithm::AStar] {
            let config = FinderConfig {
                algorithm,
                ..Default::default()
            };
            let err = config.build().err().unwrap();
            assert!(matches!(err, PathError::InvalidConfiguration { .. }));
        }
    }

    #[test]
    fn test_astar_requires_estimate() {
        let config = FinderConfig {
            algorithm: Algorithm::AStar,
            cost_property: Some("cost".into()),
            ..Default::default()
        };
        let err = config.build().err().unwrap();
        assert!(err.to_string().contains("requires an estimate"));
    }

    #[test]
    fn test_negative_default_cost_rejected() {
        let config = FinderConfig {
            algorithm: Algorithm::Dijkstra,
            cost_property: Some("cost".into()),
            default_cost: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(
            config.build().err().unwrap(),
            PathError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_zero_max_paths_rejected() {
        let config = FinderConfig {
            all_paths: true,
            max_paths: Some(0),
            ..Default::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn test_configured_shortest_path_finds_all() {
        let (graph, n) = weighted_graph();
        let config = FinderConfig {
            all_paths: true,
            ..Default::default()
        };
        let found = config.build().unwrap().find(&graph, n[0], n[3]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path.length(), 1);
        assert_eq!(found[0].weight, None);
    }

    #[test]
    fn test_configured_dijkstra_respects_max_paths() {
        let (graph, n) = weighted_graph();
        let mut config = FinderConfig {
            algorithm: Algorithm::Dijkstra,
            cost_property: Some("cost".into()),
            all_paths: true,
            ..Default::default()
        };
        let finder = config.build().unwrap();
        assert_eq!(finder.algorithm(), Algorithm::Dijkstra);
        let found = finder.find(&graph, n[0], n[3]).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.weight == Some(2.0)));

        config.max_paths = Some(1);
        assert_eq!(config.build().unwrap().find(&graph, n[0], n[3]).unwrap().len(), 1);
    }

    #[test]
    fn test_configured_astar() {
        let (graph, n) = weighted_graph();
        let config = FinderConfig {
            algorithm: Algorithm::AStar,
            cost_property: Some("cost".into()),
            estimate: Some(CoordinateEstimate::Euclidean(
                CommonEvaluators::euclidean_estimate("x", "y"),
            )),
            ..Default::default()
        };
        let found = config.build().unwrap().find(&graph, n[0], n[3]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, Some(2.0));
    }

    #[test]
    fn test_typed_expander_from_config() {
        let mut graph = Graph::new();
        let a = graph.create_node();
        let b = graph.create_node();
        graph.create_relationship(a, b, "OTHER").unwrap();

        let config = FinderConfig {
            relationship_types: vec!["ROAD".into()],
            ..Default::default()
        };
        assert!(config.build().unwrap().find(&graph, a, b).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pathgraph.toml");

        let config = Config {
            finder: FinderConfig {
                algorithm: Algorithm::Dijkstra,
                cost_property: Some("weight".into()),
                max_depth: 4,
                ..Default::default()
            },
        };
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
        assert_eq!(FinderConfig::load(&path).unwrap(), config.finder);
    }

    #[test]
    fn test_malformed_config_is_configuration_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pathgraph.toml");
        fs::write(&path, "[finder]\nalgorithm = \"greedy\"\n").unwrap();

        assert!(matches!(
            Config::load(&path).unwrap_err(),
            PathError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_missing_config_is_configuration_error() {
        let dir = tempdir().unwrap();
        let err = FinderConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::ExitCode::Usage);
    }

    #[test]
    fn test_single_path_mode_ignores_routes_past_the_end() {
        // c -> d lacks the cost property but lies beyond the end node's cost
        let mut graph = Graph::new();
        let a = graph.create_node();
        let b = graph.create_node();
        let c = graph.create_node();
        let d = graph.create_node();
        let ab = graph.create_relationship(a, b, "LINK").unwrap();
        let ac = graph.create_relationship(a, c, "LINK").unwrap();
        graph.create_relationship(c, d, "LINK").unwrap();
        graph.set_relationship_property(ab, "cost", 1.0).unwrap();
        graph.set_relationship_property(ac, "cost", 1.0).unwrap();

        let config = FinderConfig {
            algorithm: Algorithm::Dijkstra,
            cost_property: Some("cost".into()),
            direction: Direction::Outgoing,
            ..Default::default()
        };
        let found = config.build().unwrap().find(&graph, a, b).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].weight, Some(1.0));
        assert_eq!(found[0].path.nodes(), &[a, b]);
    }
}
