use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;

use crate::error::Result;
use crate::graph::algos::shared::{
    add_predecessor, check_cost, path_from_chain, replace_predecessor, require_endpoints, Chains,
    HeapEntry, Link, PredecessorMap, SearchLimits, StepBudget, COST_EPSILON,
};
use crate::graph::eval::CostEvaluator;
use crate::graph::expander::PathExpander;
use crate::graph::model::Graph;
use crate::graph::path::{PathFinder, PathIter, WeightedPath};
use crate::graph::types::{NodeId, Travel};

/// Cheapest-path finder over non-negative relationship costs.
///
/// Nodes are settled in order of accumulated cost; among equal costs the
/// node discovered first is settled first. When two routes to a node cost
/// the same, the one discovered first is kept for single-path results.
#[derive(Debug, Clone)]
pub struct Dijkstra<E, C> {
    expander: E,
    cost: C,
    limits: SearchLimits,
    max_cost: Option<f64>,
}

impl<E: PathExpander, C: CostEvaluator> Dijkstra<E, C> {
    pub fn new(expander: E, cost: C) -> Self {
        Dijkstra {
            expander,
            cost,
            limits: SearchLimits::unbounded(),
            max_cost: None,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Ignore routes whose accumulated cost exceeds `max_cost`
    pub fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = Some(max_cost);
        self
    }

    /// Every path whose total cost equals the minimum
    #[tracing::instrument(skip(self, graph), fields(start = %start, end = %end))]
    pub fn all_paths(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<CheapestPaths> {
        self.run(graph, start, end, true)
    }

    fn run(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
        collect_all: bool,
    ) -> Result<CheapestPaths> {
        require_endpoints(graph, start, end)?;
        if start == end {
            return Ok(CheapestPaths::found(start, end, 0.0, PredecessorMap::new()));
        }

        let mut search = Search::new(start, self.limits.start());
        let Some(weight) = search.run(self, graph, end, collect_all)? else {
            tracing::debug!(steps = search.budget.steps(), "end_unreachable");
            return Ok(CheapestPaths::empty(start));
        };

        tracing::debug!(weight, steps = search.budget.steps(), "end_settled");
        Ok(CheapestPaths::found(start, end, weight, search.preds))
    }
}

/// Mutable state of one Dijkstra run
struct Search {
    dist: HashMap<NodeId, f64>,
    settled: HashSet<NodeId>,
    preds: PredecessorMap,
    heap: BinaryHeap<Reverse<HeapEntry>>,
    seq: u64,
    budget: StepBudget,
}

impl Search {
    fn new(start: NodeId, budget: StepBudget) -> Self {
        let mut search = Search {
            dist: HashMap::from([(start, 0.0)]),
            settled: HashSet::new(),
            preds: PredecessorMap::new(),
            heap: BinaryHeap::new(),
            seq: 0,
            budget,
        };
        search.push(start, 0.0);
        search
    }

    fn push(&mut self, node: NodeId, cost: f64) {
        self.heap.push(Reverse(HeapEntry {
            node,
            cost,
            priority: cost,
            seq: self.seq,
        }));
        self.seq += 1;
    }

    /// Settle nodes until `end` is settled. With `collect_all`, keep settling
    /// nodes as cheap as `end` so that every equal-cost predecessor of it is
    /// recorded. Returns the cost of `end`.
    fn run<E: PathExpander, C: CostEvaluator>(
        &mut self,
        finder: &Dijkstra<E, C>,
        graph: &Graph,
        end: NodeId,
        collect_all: bool,
    ) -> Result<Option<f64>> {
        let mut end_cost = None;

        while let Some(Reverse(entry)) = self.heap.pop() {
            if let Some(limit) = end_cost {
                if entry.cost > limit + COST_EPSILON {
                    break;
                }
            }
            if !self.settled.insert(entry.node) {
                continue;
            }
            self.budget.tick()?;

            if entry.node == end {
                end_cost = Some(entry.cost);
                if !collect_all {
                    break;
                }
                continue;
            }

            self.relax(finder, graph, entry, end, collect_all)?;
        }

        Ok(end_cost)
    }

    fn relax<E: PathExpander, C: CostEvaluator>(
        &mut self,
        finder: &Dijkstra<E, C>,
        graph: &Graph,
        entry: HeapEntry,
        end: NodeId,
        collect_all: bool,
    ) -> Result<()> {
        let node = entry.node;

        for rel_id in finder.expander.expand(graph, node, Travel::Forward) {
            let rel = graph.require_relationship(rel_id)?;
            let neighbor = graph.other_node(rel_id, node)?;
            // Evaluated before any skip so bad costs always surface
            let cost = check_cost(finder.cost.cost(rel, rel.direction_from(node))?, rel_id)?;
            let candidate = entry.cost + cost;

            if finder.max_cost.is_some_and(|max| candidate > max + COST_EPSILON) {
                continue;
            }

            let link = Link {
                node: neighbor,
                relationship: rel_id,
                previous: node,
            };
            let open = !self.settled.contains(&neighbor);

            match self.dist.get(&neighbor).copied() {
                None => {
                    self.dist.insert(neighbor, candidate);
                    replace_predecessor(&mut self.preds, link);
                    self.push(neighbor, candidate);
                }
                Some(known) if open && candidate < known - COST_EPSILON => {
                    self.dist.insert(neighbor, candidate);
                    replace_predecessor(&mut self.preds, link);
                    self.push(neighbor, candidate);
                }
                Some(known)
                    if collect_all
                        && (open || neighbor == end)
                        && (candidate - known).abs() <= COST_EPSILON =>
                {
                    add_predecessor(&mut self.preds, link);
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// Lazy iterator over the cheapest paths found by [`Dijkstra::all_paths`]
pub struct CheapestPaths {
    start: NodeId,
    weight: f64,
    chains: Option<Chains>,
}

impl CheapestPaths {
    fn found(start: NodeId, end: NodeId, weight: f64, preds: PredecessorMap) -> Self {
        CheapestPaths {
            start,
            weight,
            chains: Some(Chains::new(Arc::new(preds), end, start)),
        }
    }

    fn empty(start: NodeId) -> Self {
        CheapestPaths {
            start,
            weight: 0.0,
            chains: None,
        }
    }

    /// Total cost shared by every path, `None` when nothing was found
    pub fn weight(&self) -> Option<f64> {
        self.chains.as_ref().map(|_| self.weight)
    }
}

impl Iterator for CheapestPaths {
    type Item = WeightedPath;

    fn next(&mut self) -> Option<WeightedPath> {
        let chain = self.chains.as_mut()?.next()?;
        Some(WeightedPath::new(
            path_from_chain(self.start, &chain),
            self.weight,
        ))
    }
}

impl<E: PathExpander, C: CostEvaluator> PathFinder for Dijkstra<E, C> {
    type Path = WeightedPath;

    #[tracing::instrument(skip(self, graph), fields(start = %start, end = %end))]
    fn find_single_path(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<Option<WeightedPath>> {
        Ok(self.run(graph, start, end, false)?.next())
    }

    fn find_all_paths(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<PathIter<WeightedPath>> {
        Ok(Box::new(self.all_paths(graph, start, end)?))
    }
}
