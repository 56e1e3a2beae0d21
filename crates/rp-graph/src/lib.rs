//! `rp-graph` — road graph, shortest paths, and nearest-node lookup.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`network`]  | `RoadGraph` (CSR adjacency), `GraphBuilder`             |
//! | [`dijkstra`] | `shortest_path`, `ShortestPathResult`, `OneToAll`       |
//! | [`spatial`]  | `SpatialIndex` (latitude-sorted nearest-node search)    |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                          |
//!
//! `heap` is crate-private: the decrease-key frontier queue is an
//! implementation detail of the Dijkstra engine.
//!
//! # Lifecycle
//!
//! Build once, query many: a [`GraphBuilder`] consumes the node/edge streams
//! and is itself consumed by [`GraphBuilder::finalize`], after which the
//! [`RoadGraph`] (and any [`SpatialIndex`] built from it) is immutable and
//! safe to share read-only across threads.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                             |
//! |---------|----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types. |

pub mod dijkstra;
pub mod error;
pub mod network;
pub mod spatial;

mod heap;

#[cfg(test)]
mod tests;

pub use dijkstra::{one_to_all, one_to_one, shortest_path, OneToAll, Route, ShortestPathResult};
pub use error::{GraphError, GraphResult};
pub use network::{GraphBuilder, RoadGraph};
pub use spatial::SpatialIndex;
