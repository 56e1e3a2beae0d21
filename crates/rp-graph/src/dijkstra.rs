//! Unified one-to-one / one-to-all Dijkstra engine.
//!
//! # State model
//!
//! During a run every node is in one of three states, encoded rather than
//! stored: UNVISITED (`dist == u32::MAX`, never queued), OPEN (queued,
//! tentative distance may still improve), CLOSED (popped, distance final).
//! With non-negative weights a CLOSED node can never receive a strictly
//! better candidate, so it is never re-queued — and because the frontier
//! queue holds at most one entry per node, `pop` never yields stale
//! distances.
//!
//! # Scratch state
//!
//! Each call allocates its own `dist`/`prev_edge` arrays and queue.  Nothing
//! is shared across calls, so concurrent queries against the same immutable
//! [`RoadGraph`] are safe.

use rp_core::{EdgeId, NodeId};

use crate::error::{GraphError, GraphResult};
use crate::heap::FrontierQueue;
use crate::network::RoadGraph;

// ── Results ───────────────────────────────────────────────────────────────────

/// A concrete one-to-one path: edge ids in travel order plus the total cost.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Edges to traverse in order, from source to target.
    pub edges: Vec<EdgeId>,
    /// Sum of the edge weights along `edges`.
    pub distance: u32,
}

impl Route {
    /// `true` if source and target were the same node.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Shortest-path tree of a full one-to-all run.
///
/// Immutable once produced; may be queried repeatedly for different targets
/// without recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneToAll {
    source: NodeId,
    /// Final distance per node; `u32::MAX` = unreachable.
    dist: Vec<u32>,
    /// Last edge on the shortest path to each node; `EdgeId::INVALID` for
    /// the source itself and for unreachable nodes.
    prev_edge: Vec<EdgeId>,
}

impl OneToAll {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Shortest distance from the source to `node`, or `None` when `node`
    /// is unreachable or out of range.
    pub fn distance_to(&self, node: NodeId) -> Option<u32> {
        match self.dist.get(node.index()) {
            Some(&d) if d != u32::MAX => Some(d),
            _ => None,
        }
    }

    /// Edge ids of the shortest path source → `target`, in travel order.
    ///
    /// O(path length): walks `prev_edge` backward from `target` and
    /// reverses.  `Unreachable` if no path exists; `NodeNotFound` for
    /// out-of-range targets.
    pub fn path_to(&self, graph: &RoadGraph, target: NodeId) -> GraphResult<Vec<EdgeId>> {
        graph.check_node(target)?;
        walk_back(graph, &self.prev_edge, self.source, target)
    }
}

/// Outcome of [`shortest_path`], tagged by query kind.
///
/// Callers match explicitly; there is no shared dynamic interface between
/// the two variants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShortestPathResult {
    /// Shortest-path tree to every reachable node.
    OneToAll(OneToAll),
    /// Single-target query.  `route == None` means the target is not
    /// reachable from the source — a valid result, not an error.
    OneToOne {
        source: NodeId,
        target: NodeId,
        route: Option<Route>,
    },
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Compute shortest paths over `graph` from `source`.
///
/// With `target == None` the run drains the whole reachable component and
/// returns [`ShortestPathResult::OneToAll`].  With a target it terminates as
/// soon as the target is popped — sound because edge weights are
/// non-negative, so the popped distance is final — and returns
/// [`ShortestPathResult::OneToOne`].
///
/// `source == target` is the valid trivial case: an empty route of
/// distance 0.
pub fn shortest_path(
    graph: &RoadGraph,
    source: NodeId,
    target: Option<NodeId>,
) -> GraphResult<ShortestPathResult> {
    graph.check_node(source)?;
    if let Some(t) = target {
        graph.check_node(t)?;
    }

    if target == Some(source) {
        return Ok(ShortestPathResult::OneToOne {
            source,
            target: source,
            route: Some(Route { edges: Vec::new(), distance: 0 }),
        });
    }

    let n = graph.node_count();
    // Per-call scratch: tentative distances and the shortest-path tree.
    let mut dist      = vec![u32::MAX; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    let mut queue     = FrontierQueue::new(n);

    dist[source.index()] = 0;
    queue.push(source, 0);

    while let Some((node, node_dist)) = queue.pop() {
        // Popping the target closes it; its distance is final.
        if target == Some(node) {
            break;
        }

        for edge in graph.out_edges(node) {
            let next = graph.edge_target[edge.index()];
            let candidate = node_dist.saturating_add(graph.edge_weight[edge.index()]);

            if candidate < dist[next.index()] {
                if dist[next.index()] == u32::MAX {
                    queue.push(next, candidate);
                } else {
                    // Strictly better candidate ⇒ `next` is still OPEN
                    // (a CLOSED node's distance cannot be beaten).
                    queue.decrease(next, candidate);
                }
                dist[next.index()] = candidate;
                prev_edge[next.index()] = edge;
            }
        }
    }

    match target {
        None => Ok(ShortestPathResult::OneToAll(OneToAll { source, dist, prev_edge })),
        Some(t) => {
            let route = if dist[t.index()] == u32::MAX {
                None
            } else {
                Some(Route {
                    edges: walk_back(graph, &prev_edge, source, t)?,
                    distance: dist[t.index()],
                })
            };
            Ok(ShortestPathResult::OneToOne { source, target: t, route })
        }
    }
}

/// One-to-all convenience wrapper around [`shortest_path`].
pub fn one_to_all(graph: &RoadGraph, source: NodeId) -> GraphResult<OneToAll> {
    match shortest_path(graph, source, None)? {
        ShortestPathResult::OneToAll(tree) => Ok(tree),
        ShortestPathResult::OneToOne { .. } => unreachable!("no target was given"),
    }
}

/// One-to-one convenience wrapper around [`shortest_path`].
///
/// `Ok(None)` means `target` is not reachable from `source`.
pub fn one_to_one(
    graph: &RoadGraph,
    source: NodeId,
    target: NodeId,
) -> GraphResult<Option<Route>> {
    match shortest_path(graph, source, Some(target))? {
        ShortestPathResult::OneToOne { route, .. } => Ok(route),
        ShortestPathResult::OneToAll(_) => unreachable!("a target was given"),
    }
}

// ── Path reconstruction ───────────────────────────────────────────────────────

/// Walk `prev_edge` backward from `target` until `source`, returning the
/// edge ids in travel order.
fn walk_back(
    graph: &RoadGraph,
    prev_edge: &[EdgeId],
    source: NodeId,
    target: NodeId,
) -> GraphResult<Vec<EdgeId>> {
    let mut edges = Vec::new();
    let mut node = target;
    while node != source {
        let edge = prev_edge[node.index()];
        if edge == EdgeId::INVALID {
            return Err(GraphError::Unreachable { from: source, target });
        }
        edges.push(edge);
        node = graph.edge_source[edge.index()];
    }
    edges.reverse();
    Ok(edges)
}
