//! Road graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_target[ edge_offset[n] .. edge_offset[n+1] ]
//! ```
//!
//! All edge arrays (`edge_source`, `edge_target`, `edge_weight`) are sorted
//! by source node and indexed by `EdgeId`.  Iteration over a node's outgoing
//! edges is therefore a contiguous memory scan — ideal for Dijkstra's inner
//! loop.
//!
//! # Construction
//!
//! The canonical graph files already list edges in non-decreasing source
//! order, so [`GraphBuilder`] builds the row pointer in a single O(n+m) pass
//! with no sorting step: whenever the incoming edge's source jumps past
//! nodes with no outgoing edges, the start of the empty range is propagated
//! forward, then the current source's range is extended by one.

use rp_core::{EdgeId, GeoPoint, NodeId};

use crate::error::{GraphError, GraphResult};

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Immutable directed road graph in CSR format.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`GraphBuilder`].  Once built, the graph is never
/// mutated and may be shared read-only across threads.
#[derive(Debug)]
pub struct RoadGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `edge_offset[n] .. edge_offset[n+1]`.
    /// Length = `node_count + 1`; `edge_offset[0] == 0`,
    /// `edge_offset[node_count] == edge_count`, non-decreasing.
    pub edge_offset: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in source-sorted order) ───
    /// Source node of each edge.  Redundant with CSR but required for
    /// O(path) backward walks along `prev_edge` trees.
    pub edge_source: Vec<NodeId>,

    /// Target node of each edge.
    pub edge_target: Vec<NodeId>,

    /// Non-negative travel cost of each edge.  Dijkstra's edge weight.
    pub edge_weight: Vec<u32>,
}

impl RoadGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Position of `node`.  Panics on out-of-range ids (ids produced by this
    /// graph are always in range).
    #[inline]
    pub fn position(&self, node: NodeId) -> GeoPoint {
        self.node_pos[node.index()]
    }

    /// `Ok(())` iff `node` is a valid id for this graph.
    #[inline]
    pub fn check_node(&self, node: NodeId) -> GraphResult<()> {
        if node.index() < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(node))
        }
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.edge_offset[node.index()] as usize;
        let end   = self.edge_offset[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.edge_offset[node.index()] as usize;
        let end   = self.edge_offset[node.index() + 1] as usize;
        end - start
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] from ordered node and edge streams, then call
/// [`finalize`](Self::finalize).
///
/// All arrays are pre-sized from the declared counts, so `add_node` and
/// `add_edge` are O(1) writes.  Nodes may arrive in any order; edges must
/// arrive with dense ids `0, 1, 2, …` in **non-decreasing source order**
/// (the canonical on-disk format already sorts this way).  A violation is
/// rejected with [`GraphError::UnsortedEdge`] rather than silently producing
/// wrong adjacency ranges.
///
/// `finalize` consumes the builder — immutability after construction is
/// enforced by ownership transfer, not a runtime flag.
///
/// # Example
///
/// ```
/// use rp_core::{EdgeId, GeoPoint, NodeId};
/// use rp_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new(2, 1);
/// b.add_node(NodeId(0), GeoPoint::new(9.10, 48.74)).unwrap();
/// b.add_node(NodeId(1), GeoPoint::new(9.11, 48.75)).unwrap();
/// b.add_edge(EdgeId(0), NodeId(0), NodeId(1), 120).unwrap();
/// let graph = b.finalize();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.out_degree(NodeId(0)), 1);
/// ```
pub struct GraphBuilder {
    node_pos:    Vec<GeoPoint>,
    edge_offset: Vec<u32>,
    edge_source: Vec<NodeId>,
    edge_target: Vec<NodeId>,
    edge_weight: Vec<u32>,

    /// Declared number of edges; ids must stay below this.
    declared_edges: usize,
    /// Highest source node whose offset range has been started so far.
    /// Advancing it past gap nodes propagates their (empty) range starts.
    cached_source: u32,
    /// Next expected dense edge id.
    next_edge: u32,
}

impl GraphBuilder {
    /// Pre-size all arrays for exactly `node_count` nodes and `edge_count`
    /// edges.
    pub fn new(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_pos:    vec![GeoPoint::new(0.0, 0.0); node_count],
            edge_offset: vec![0; node_count + 1],
            edge_source: Vec::with_capacity(edge_count),
            edge_target: Vec::with_capacity(edge_count),
            edge_weight: Vec::with_capacity(edge_count),
            declared_edges: edge_count,
            cached_source: 0,
            next_edge: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Declared edge capacity (not the number of edges added so far).
    pub fn edge_count(&self) -> usize {
        self.declared_edges
    }

    /// Record the position of node `id`.  O(1); any order.
    pub fn add_node(&mut self, id: NodeId, pos: GeoPoint) -> GraphResult<()> {
        if id.index() >= self.node_pos.len() {
            return Err(GraphError::NodeNotFound(id));
        }
        self.node_pos[id.index()] = pos;
        Ok(())
    }

    /// Record directed edge `id: source → target` with travel cost `weight`.
    ///
    /// Edge ids must be dense and in order; sources must be non-decreasing.
    pub fn add_edge(
        &mut self,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        weight: u32,
    ) -> GraphResult<()> {
        if id.index() >= self.declared_edges {
            return Err(GraphError::EdgeNotFound(id));
        }
        if id.0 != self.next_edge {
            return Err(GraphError::EdgeIdGap { edge: id, expected: EdgeId(self.next_edge) });
        }
        if source.index() >= self.node_pos.len() {
            return Err(GraphError::NodeNotFound(source));
        }
        if target.index() >= self.node_pos.len() {
            return Err(GraphError::NodeNotFound(target));
        }
        if source.0 < self.cached_source {
            return Err(GraphError::UnsortedEdge {
                edge: id,
                from: source,
                last: NodeId(self.cached_source),
            });
        }

        // Propagate the start of the empty range over gap nodes with no
        // outgoing edges, then extend the current source's range.
        while self.cached_source < source.0 {
            self.cached_source += 1;
            self.edge_offset[self.cached_source as usize + 1] =
                self.edge_offset[self.cached_source as usize];
        }
        self.edge_offset[source.index() + 1] += 1;

        self.edge_source.push(source);
        self.edge_target.push(target);
        self.edge_weight.push(weight);
        self.next_edge += 1;
        Ok(())
    }

    /// Consume the builder and produce the immutable [`RoadGraph`].
    ///
    /// Completes the row pointer for trailing sink nodes (nodes past the
    /// last edge source have empty ranges).
    pub fn finalize(mut self) -> RoadGraph {
        let node_count = self.node_pos.len();
        while (self.cached_source as usize) + 1 < node_count {
            self.cached_source += 1;
            self.edge_offset[self.cached_source as usize + 1] =
                self.edge_offset[self.cached_source as usize];
        }
        debug_assert_eq!(self.edge_offset[node_count] as usize, self.edge_target.len());

        RoadGraph {
            node_pos:    self.node_pos,
            edge_offset: self.edge_offset,
            edge_source: self.edge_source,
            edge_target: self.edge_target,
            edge_weight: self.edge_weight,
        }
    }
}
