//! `rp-server` — JSON/GeoJSON routing service over the `rust_rp` engine.
//!
//! # Crate layout
//!
//! | Module    | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | [`api`]   | Router, request/response DTOs, handlers          |
//! | [`state`] | `AppState`: graph resources + cached tree        |
//!
//! The graph loads on a background task at startup; until it finishes, every
//! routing endpoint answers `503 Service Unavailable` and `GET /status`
//! reports `ready: false`.  Once installed, the graph and spatial index are
//! immutable and shared read-only across request handlers; the only mutable
//! server state is the cached one-to-all tree behind an `RwLock`.

pub mod api;
pub mod state;
