//! `rp-core` — foundational types for the `rust_rp` route planner.
//!
//! This crate is a dependency of every other `rp-*` crate.  It intentionally
//! has no `rp-*` dependencies and no mandatory external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                              |
//! |----------|---------------------------------------|
//! | [`ids`]  | `NodeId`, `EdgeId`                    |
//! | [`geo`]  | `GeoPoint`, Euclidean distance        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
