//! Shared server state.

use std::sync::Arc;

use parking_lot::RwLock;

use rp_graph::{OneToAll, RoadGraph, SpatialIndex};

/// The immutable query structures, published together once the graph file
/// has been read.
pub struct GraphResources {
    pub graph: RoadGraph,
    pub index: SpatialIndex,
}

/// State shared across all request handlers.
///
/// `resources` is written exactly once (by the startup load task) and read
/// by every handler; `tree` holds the most recent one-to-all result, written
/// by `POST /tree` and read by `GET /tree/path`.
#[derive(Default)]
pub struct AppState {
    resources: RwLock<Option<Arc<GraphResources>>>,
    tree: RwLock<Option<Arc<OneToAll>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the finished graph.  Builds the spatial index first so both
    /// structures become visible atomically.
    pub fn install_graph(&self, graph: RoadGraph) {
        let index = SpatialIndex::build(&graph);
        *self.resources.write() = Some(Arc::new(GraphResources { graph, index }));
    }

    /// `true` once the graph resources are ready to answer queries.
    pub fn ready(&self) -> bool {
        self.resources.read().is_some()
    }

    pub fn resources(&self) -> Option<Arc<GraphResources>> {
        self.resources.read().clone()
    }

    pub fn cache_tree(&self, tree: OneToAll) {
        *self.tree.write() = Some(Arc::new(tree));
    }

    pub fn cached_tree(&self) -> Option<Arc<OneToAll>> {
        self.tree.read().clone()
    }
}
