use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

use crate::error::Result;
use crate::graph::algos::shared::{
    check_cost, check_estimate, path_from_chain, replace_predecessor, require_endpoints, Chains,
    HeapEntry, Link, PredecessorMap, SearchLimits, COST_EPSILON,
};
use crate::graph::eval::{CostEvaluator, EstimateEvaluator};
use crate::graph::expander::PathExpander;
use crate::graph::model::{Graph, Node};
use crate::graph::path::{Path, PathFinder, PathIter, WeightedPath};
use crate::graph::types::{NodeId, Travel};

/// Goal-directed cheapest-path finder.
///
/// Orders the frontier by accumulated cost plus the estimated remaining cost.
/// The result is optimal only when the estimate is admissible; a node is
/// reopened whenever a cheaper route to it turns up, so consistency is not
/// required. `find_all_paths` yields at most one path.
#[derive(Debug, Clone)]
pub struct AStar<E, C, H> {
    expander: E,
    cost: C,
    estimate: H,
    limits: SearchLimits,
}

impl<E, C, H> AStar<E, C, H>
where
    E: PathExpander,
    C: CostEvaluator,
    H: EstimateEvaluator,
{
    pub fn new(expander: E, cost: C, estimate: H) -> Self {
        AStar {
            expander,
            cost,
            estimate,
            limits: SearchLimits::unbounded(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Estimate for `node`, computed once per search
    fn estimate_for(
        &self,
        cache: &mut HashMap<NodeId, f64>,
        graph: &Graph,
        node: NodeId,
        goal: &Node,
    ) -> Result<f64> {
        match cache.entry(node) {
            Entry::Occupied(e) => Ok(*e.get()),
            Entry::Vacant(e) => {
                let raw = self.estimate.estimate(graph.require_node(node)?, goal);
                Ok(*e.insert(check_estimate(raw, node)?))
            }
        }
    }

    fn search(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<Option<WeightedPath>> {
        let goal = graph.require_node(end)?;
        let mut budget = self.limits.start();
        let mut estimates = HashMap::new();
        let mut best: HashMap<NodeId, f64> = HashMap::from([(start, 0.0)]);
        let mut preds = PredecessorMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        let h = self.estimate_for(&mut estimates, graph, start, goal)?;
        heap.push(Reverse(HeapEntry {
            node: start,
            cost: 0.0,
            priority: h,
            seq,
        }));

        while let Some(Reverse(entry)) = heap.pop() {
            // Superseded by a cheaper route pushed later
            if best.get(&entry.node).is_some_and(|&g| entry.cost > g + COST_EPSILON) {
                continue;
            }
            budget.tick()?;

            if entry.node == end {
                tracing::debug!(weight = entry.cost, steps = budget.steps(), "goal_reached");
                let chain = Chains::new(preds.into(), end, start).next();
                return Ok(chain.map(|c| WeightedPath::new(path_from_chain(start, &c), entry.cost)));
            }

            for rel_id in self.expander.expand(graph, entry.node, Travel::Forward) {
                let rel = graph.require_relationship(rel_id)?;
                let neighbor = graph.other_node(rel_id, entry.node)?;
                let cost = check_cost(self.cost.cost(rel, rel.direction_from(entry.node))?, rel_id)?;
                let candidate = entry.cost + cost;

                if best.get(&neighbor).is_some_and(|&g| candidate >= g - COST_EPSILON) {
                    continue;
                }

                best.insert(neighbor, candidate);
                replace_predecessor(
                    &mut preds,
                    Link {
                        node: neighbor,
                        relationship: rel_id,
                        previous: entry.node,
                    },
                );
                let h = self.estimate_for(&mut estimates, graph, neighbor, goal)?;
                seq += 1;
                heap.push(Reverse(HeapEntry {
                    node: neighbor,
                    cost: candidate,
                    priority: candidate + h,
                    seq,
                }));
            }
        }

        tracing::debug!(steps = budget.steps(), "goal_unreachable");
        Ok(None)
    }
}

impl<E, C, H> PathFinder for AStar<E, C, H>
where
    E: PathExpander,
    C: CostEvaluator,
    H: EstimateEvaluator,
{
    type Path = WeightedPath;

    #[tracing::instrument(skip(self, graph), fields(start = %start, end = %end))]
    fn find_single_path(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<Option<WeightedPath>> {
        require_endpoints(graph, start, end)?;
        if start == end {
            return Ok(Some(WeightedPath::new(Path::single(start), 0.0)));
        }
        self.search(graph, start, end)
    }

    fn find_all_paths(
        &self,
        graph: &Graph,
        start: NodeId,
        end: NodeId,
    ) -> Result<PathIter<WeightedPath>> {
        Ok(Box::new(self.find_single_path(graph, start, end)?.into_iter()))
    }
}
