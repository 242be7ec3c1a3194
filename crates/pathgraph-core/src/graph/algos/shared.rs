//! Machinery shared by the path-finding algorithms: search limits, the
//! priority-queue entry, cost checks and lazy predecessor enumeration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{PathError, Result};
use crate::graph::model::Graph;
use crate::graph::path::Path;
use crate::graph::types::{NodeId, RelationshipId};

/// Costs closer than this are considered equal
pub const COST_EPSILON: f64 = 1e-9;

/// Deadline checks call `Instant::now`, so only every Nth step looks at it
const DEADLINE_CHECK_INTERVAL: usize = 64;

/// Bounds on the work a single find call may do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of node expansions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
    /// Wall-clock budget measured from the start of the find call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn start(&self) -> StepBudget {
        StepBudget {
            steps: 0,
            max_steps: self.max_steps,
            deadline: self.timeout.map(|t| Instant::now() + t),
        }
    }
}

/// Running step counter for one find call
#[derive(Debug)]
pub(crate) struct StepBudget {
    steps: usize,
    max_steps: Option<usize>,
    deadline: Option<Instant>,
}

impl StepBudget {
    /// Account for one node expansion
    pub(crate) fn tick(&mut self) -> Result<()> {
        self.steps += 1;

        if let Some(max) = self.max_steps {
            if self.steps > max {
                return Err(PathError::LimitExceeded {
                    limit: "max_steps".to_string(),
                    steps: self.steps - 1,
                });
            }
        }

        if let Some(deadline) = self.deadline {
            if self.steps % DEADLINE_CHECK_INTERVAL == 1 && Instant::now() >= deadline {
                return Err(PathError::LimitExceeded {
                    limit: "timeout".to_string(),
                    steps: self.steps - 1,
                });
            }
        }

        Ok(())
    }

    pub(crate) fn steps(&self) -> usize {
        self.steps
    }
}

/// Min-heap entry for Dijkstra and A*, wrapped in `Reverse` on a
/// `BinaryHeap`. Ordered by priority, then by insertion sequence so equal
/// priorities pop in discovery order.
#[derive(Debug, Clone, Copy)]
pub struct HeapEntry {
    pub node: NodeId,
    /// Accumulated cost from the start node
    pub cost: f64,
    /// Cost plus heuristic estimate (equals `cost` for Dijkstra)
    pub priority: f64,
    pub seq: u64,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Reject costs that would break Dijkstra/A* correctness
pub(crate) fn check_cost(cost: f64, relationship: RelationshipId) -> Result<f64> {
    if cost.is_finite() && cost >= 0.0 {
        Ok(cost)
    } else {
        Err(PathError::contract_violation(format!(
            "cost {} on relationship {} (costs must be finite and non-negative)",
            cost, relationship
        )))
    }
}

/// Reject estimates that are negative or not a number
pub(crate) fn check_estimate(estimate: f64, node: NodeId) -> Result<f64> {
    if estimate >= 0.0 {
        Ok(estimate)
    } else {
        Err(PathError::contract_violation(format!(
            "estimate {} for node {} (estimates must be non-negative)",
            estimate, node
        )))
    }
}

/// One recorded way of reaching `node`: over `relationship` from `previous`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub node: NodeId,
    pub relationship: RelationshipId,
    pub previous: NodeId,
}

/// Predecessor links per node, in discovery order. Following `previous`
/// pointers from any recorded node always ends at the search root.
pub type PredecessorMap = HashMap<NodeId, Vec<Link>>;

/// Record `link` as an additional predecessor of `link.node`
pub(crate) fn add_predecessor(preds: &mut PredecessorMap, link: Link) {
    preds.entry(link.node).or_default().push(link);
}

/// Make `link` the only predecessor of `link.node`
pub(crate) fn replace_predecessor(preds: &mut PredecessorMap, link: Link) {
    preds.insert(link.node, vec![link]);
}

/// Lazily enumerates every predecessor chain from a node back to the root.
///
/// Each chain is yielded as links ordered from `from` towards the root. The
/// walk is an odometer over predecessor indices, so memory stays
/// proportional to the chain length however many chains exist.
#[derive(Debug, Clone)]
pub struct Chains {
    preds: Arc<PredecessorMap>,
    from: NodeId,
    root: NodeId,
    /// (node, index of the predecessor taken at that node)
    stack: Vec<(NodeId, usize)>,
    started: bool,
    done: bool,
}

impl Chains {
    pub fn new(preds: Arc<PredecessorMap>, from: NodeId, root: NodeId) -> Self {
        Chains {
            preds,
            from,
            root,
            stack: Vec::new(),
            started: false,
            done: false,
        }
    }

    /// Push first-choice predecessors from `node` down to the root
    fn descend(&mut self, mut node: NodeId) -> bool {
        while node != self.root {
            let Some(first) = self.preds.get(&node).and_then(|links| links.first()) else {
                return false;
            };
            let previous = first.previous;
            self.stack.push((node, 0));
            node = previous;
        }
        true
    }

    /// Move to the next combination of predecessor choices
    fn advance(&mut self) -> bool {
        while let Some((node, index)) = self.stack.pop() {
            let next = self
                .preds
                .get(&node)
                .and_then(|links| links.get(index + 1))
                .map(|link| link.previous);
            if let Some(previous) = next {
                self.stack.push((node, index + 1));
                return self.descend(previous);
            }
        }
        false
    }

    fn current(&self) -> Vec<Link> {
        self.stack
            .iter()
            .map(|(node, index)| self.preds[node][*index])
            .collect()
    }
}

impl Iterator for Chains {
    type Item = Vec<Link>;

    fn next(&mut self) -> Option<Vec<Link>> {
        if self.done {
            return None;
        }

        let found = if self.started {
            self.advance()
        } else {
            self.started = true;
            self.descend(self.from)
        };

        if found {
            Some(self.current())
        } else {
            self.done = true;
            None
        }
    }
}

/// Build a start-to-end path from a chain running from `end` back to `start`
pub(crate) fn path_from_chain(start: NodeId, chain: &[Link]) -> Path {
    let mut nodes = Vec::with_capacity(chain.len() + 1);
    let mut relationships = Vec::with_capacity(chain.len());
    nodes.push(start);
    for link in chain.iter().rev() {
        relationships.push(link.relationship);
        nodes.push(link.node);
    }
    Path::from_parts(nodes, relationships)
}

/// Validate both endpoints before searching
pub(crate) fn require_endpoints(graph: &Graph, start: NodeId, end: NodeId) -> Result<()> {
    graph.require_node(start)?;
    graph.require_node(end)?;
    Ok(())
}
