use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;
use crate::graph::algos::shared::{
    add_predecessor, require_endpoints, Chains, Link, PredecessorMap, SearchLimits, StepBudget,
};
use crate::graph::expander::PathExpander;
use crate::graph::model::Graph;
use crate::graph::path::{Path, PathFinder, PathIter};
use crate::graph::types::{NodeId, Travel};

/// Fewest-hops path finder using bidirectional breadth-first search.
///
/// The start and end frontiers are expanded alternately, one whole level at a
/// time, recording every same-depth predecessor. The first level in which the
/// two visited sets meet fixes the minimum hop count, and the nodes where they
/// met are exactly the middle nodes of all minimal paths.
#[derive(Debug, Clone)]
pub struct ShortestPath<E> {
    expander: E,
    max_depth: usize,
    limits: SearchLimits,
}

impl<E: PathExpander> ShortestPath<E> {
    pub fn new(expander: E, max_depth: usize) -> Self {
        ShortestPath {
            expander,
            max_depth,
            limits: SearchLimits::unbounded(),
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Run the search; `None` when the nodes are not connected within
    /// `max_depth` hops
    fn search(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<Option<Meeting>> {
        require_endpoints(graph, start, end)?;

        let mut budget = self.limits.start();
        let mut forward = Side::new(start, Travel::Forward);
        let mut backward = Side::new(end, Travel::Backward);
        let mut expand_forward = true;

        while forward.radius + backward.radius < self.max_depth {
            if forward.frontier.is_empty() || backward.frontier.is_empty() {
                break;
            }

            let meetings = if expand_forward {
                forward.expand_level(graph, &self.expander, &backward, &mut budget)?
            } else {
                backward.expand_level(graph, &self.expander, &forward, &mut budget)?
            };

            if !meetings.is_empty() {
                tracing::debug!(
                    length = forward.radius + backward.radius,
                    meetings = meetings.len(),
                    steps = budget.steps(),
                    "frontiers_met"
                );
                return Ok(Some(Meeting {
                    start,
                    end,
                    nodes: meetings,
                    forward: Arc::new(forward.preds),
                    backward: Arc::new(backward.preds),
                }));
            }

            expand_forward = !expand_forward;
        }

        tracing::debug!(steps = budget.steps(), "no_path_within_depth");
        Ok(None)
    }
}

/// Per-direction BFS state
struct Side {
    travel: Travel,
    depth: HashMap<NodeId, usize>,
    preds: PredecessorMap,
    frontier: Vec<NodeId>,
    radius: usize,
}

impl Side {
    fn new(root: NodeId, travel: Travel) -> Self {
        Side {
            travel,
            depth: HashMap::from([(root, 0)]),
            preds: PredecessorMap::new(),
            frontier: vec![root],
            radius: 0,
        }
    }

    /// Expand the whole current frontier by one hop. Returns the newly
    /// discovered nodes already visited by `other`, in discovery order.
    fn expand_level<E: PathExpander>(
        &mut self,
        graph: &Graph,
        expander: &E,
        other: &Side,
        budget: &mut StepBudget,
    ) -> Result<Vec<NodeId>> {
        let next_depth = self.radius + 1;
        let mut next_frontier = Vec::new();
        let mut meetings = Vec::new();

        for node in std::mem::take(&mut self.frontier) {
            budget.tick()?;

            for rel_id in expander.expand(graph, node, self.travel) {
                let neighbor = graph.other_node(rel_id, node)?;
                let link = Link {
                    node: neighbor,
                    relationship: rel_id,
                    previous: node,
                };

                match self.depth.get(&neighbor) {
                    None => {
                        self.depth.insert(neighbor, next_depth);
                        add_predecessor(&mut self.preds, link);
                        next_frontier.push(neighbor);
                        if other.depth.contains_key(&neighbor) {
                            meetings.push(neighbor);
                        }
                    }
                    Some(&d) if d == next_depth => add_predecessor(&mut self.preds, link),
                    Some(_) => {}
                }
            }
        }

        self.frontier = next_frontier;
        self.radius = next_depth;
        Ok(meetings)
    }
}

/// Outcome of a successful search: where the frontiers met plus both
/// predecessor maps
struct Meeting {
    start: NodeId,
    end: NodeId,
    nodes: Vec<NodeId>,
    forward: Arc<PredecessorMap>,
    backward: Arc<PredecessorMap>,
}

/// Lazy iterator over every minimal path through the meeting nodes.
///
/// For each meeting node, every start-side half is combined with every
/// end-side half. Each minimal path crosses the meeting level at exactly one
/// node, so no path is produced twice.
pub struct AllShortestPaths {
    meeting: Meeting,
    next_meeting: usize,
    current_node: Option<NodeId>,
    heads: Option<Chains>,
    head: Option<Vec<Link>>,
    tails: Option<Chains>,
}

impl AllShortestPaths {
    fn new(meeting: Meeting) -> Self {
        AllShortestPaths {
            meeting,
            next_meeting: 0,
            current_node: None,
            heads: None,
            head: None,
            tails: None,
        }
    }

    fn assemble(&self, head: &[Link], tail: &[Link]) -> Path {
        let mut nodes = Vec::with_capacity(head.len() + tail.len() + 1);
        let mut relationships = Vec::with_capacity(head.len() + tail.len());

        nodes.push(self.meeting.start);
        for link in head.iter().rev() {
            relationships.push(link.relationship);
            nodes.push(link.node);
        }
        // Tail links run from the meeting node towards the end node
        for link in tail {
            relationships.push(link.relationship);
            nodes.push(link.previous);
        }
        Path::from_parts(nodes, relationships)
    }
}

impl Iterator for AllShortestPaths {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            if let (Some(head), Some(tails)) = (&self.head, &mut self.tails) {
                if let Some(tail) = tails.next() {
                    return Some(self.assemble(head, &tail));
                }
                self.head = None;
            }

            if let (Some(node), Some(heads)) = (self.current_node, &mut self.heads) {
                if let Some(head) = heads.next() {
                    self.head = Some(head);
                    self.tails = Some(Chains::new(
                        self.meeting.backward.clone(),
                        node,
                        self.meeting.end,
                    ));
                    continue;
                }
            }

            let node = *self.meeting.nodes.get(self.next_meeting)?;
            self.next_meeting += 1;
            self.current_node = Some(node);
            self.heads = Some(Chains::new(
                self.meeting.forward.clone(),
                node,
                self.meeting.start,
            ));
        }
    }
}

impl<E: PathExpander> ShortestPath<E> {
    /// Every minimal-length path from `start` to `end`
    #[tracing::instrument(skip(self, graph), fields(start = %start, end = %end, max_depth = self.max_depth))]
    pub fn all_paths(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<AllShortestPaths> {
        if start == end {
            graph.require_node(start)?;
            return Ok(AllShortestPaths::new(Meeting {
                start,
                end,
                nodes: vec![start],
                forward: Arc::default(),
                backward: Arc::default(),
            }));
        }

        let meeting = self.search(graph, start, end)?.unwrap_or(Meeting {
            start,
            end,
            nodes: Vec::new(),
            forward: Arc::default(),
            backward: Arc::default(),
        });
        Ok(AllShortestPaths::new(meeting))
    }
}

impl<E: PathExpander> PathFinder for ShortestPath<E> {
    type Path = Path;

    fn find_single_path(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<Option<Path>> {
        Ok(self.all_paths(graph, start, end)?.next())
    }

    fn find_all_paths(&self, graph: &Graph, start: NodeId, end: NodeId) -> Result<PathIter<Path>> {
        Ok(Box::new(self.all_paths(graph, start, end)?))
    }
}
