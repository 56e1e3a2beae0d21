//! Graph-subsystem error type.

use thiserror::Error;

use rp_core::{EdgeId, NodeId};

/// Errors produced by `rp-graph`.
///
/// `Unreachable` is the only variant a healthy caller is expected to handle
/// routinely; the rest signal out-of-contract arguments and fail fast at the
/// call that detects them, before any state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node {0} out of range")]
    NodeNotFound(NodeId),

    #[error("edge {0} out of range")]
    EdgeNotFound(EdgeId),

    #[error("edge {edge} breaks the dense id sequence (expected {expected})")]
    EdgeIdGap { edge: EdgeId, expected: EdgeId },

    // Field named `source` would be claimed by thiserror as the error source.
    #[error("edge {edge} has source {from}, after edges from {last} (input must be source-sorted)")]
    UnsortedEdge {
        edge: EdgeId,
        from: NodeId,
        last: NodeId,
    },

    #[error("no path from {from} to {target}")]
    Unreachable { from: NodeId, target: NodeId },
}

pub type GraphResult<T> = Result<T, GraphError>;
