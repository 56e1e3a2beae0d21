//! REST API for the routing service.
//!
//! Endpoints:
//! - `GET  /health` — liveness probe.
//! - `GET  /status` — `200` once the graph is loaded, `503` while loading.
//! - `GET  /nearest?lat=..&lon=..` — snap a coordinate to the closest node.
//! - `POST /route` — one-to-one shortest path between two coordinates.
//! - `POST /tree` — compute and cache a one-to-all tree from a coordinate.
//! - `GET  /tree/path?lat=..&lon=..` — path out of the cached tree.
//!
//! Paths are returned as GeoJSON `LineString` geometry (`[lon, lat]` pairs).
//! An unreachable target is a normal `200` response with
//! `"unreachable": true` — only malformed requests and missing server state
//! map to error statuses.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use rp_core::{EdgeId, GeoPoint, NodeId};
use rp_graph::{one_to_all, one_to_one, RoadGraph};

use crate::state::{AppState, GraphResources};

/// Build the service router with CORS enabled.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/nearest", get(nearest))
        .route("/route", post(route))
        .route("/tree", post(tree))
        .route("/tree/path", get(tree_path))
        .layer(cors)
        .with_state(state)
}

// ── Error mapping ─────────────────────────────────────────────────────────────

/// Handler-level failures with their HTTP statuses.
enum ApiError {
    /// Graph resources are still loading.
    NotReady,
    /// The loaded graph has no nodes to snap to.
    NoNodes,
    /// `GET /tree/path` before any `POST /tree`.
    NoTree,
    /// Engine or task failure that should not happen with snapped inputs.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "graph resources are still being set up".to_string(),
            ),
            ApiError::NoNodes => (StatusCode::NOT_FOUND, "graph has no nodes".to_string()),
            ApiError::NoTree => (
                StatusCode::CONFLICT,
                "no one-to-all tree cached; POST /tree first".to_string(),
            ),
            ApiError::Internal(message) => {
                tracing::error!(%message, "internal routing failure");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ── DTOs ──────────────────────────────────────────────────────────────────────

/// A `{ "lat": .., "lon": .. }` coordinate, also usable as query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coord> for GeoPoint {
    fn from(c: Coord) -> GeoPoint {
        GeoPoint::new(c.lon, c.lat)
    }
}

#[derive(Deserialize)]
pub struct RouteRequest {
    pub start: Coord,
    pub target: Coord,
}

#[derive(Deserialize)]
pub struct TreeRequest {
    pub start: Coord,
}

/// GeoJSON `LineString` geometry: `[lon, lat]` coordinate pairs.
#[derive(Serialize)]
struct LineString {
    r#type: &'static str,
    coordinates: Vec<[f64; 2]>,
}

impl LineString {
    /// Geometry of an edge path starting at `source`.
    fn from_path(graph: &RoadGraph, source: NodeId, edges: &[EdgeId]) -> Self {
        let mut coordinates = Vec::with_capacity(edges.len() + 1);
        let start = graph.position(source);
        coordinates.push([start.lon, start.lat]);
        for &edge in edges {
            let pos = graph.position(graph.edge_target[edge.index()]);
            coordinates.push([pos.lon, pos.lat]);
        }
        LineString { r#type: "LineString", coordinates }
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "UP" }))
}

async fn status(State(state): State<Arc<AppState>>) -> Response {
    if state.ready() {
        (StatusCode::OK, Json(json!({ "ready": true }))).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "ready": false }))).into_response()
    }
}

async fn nearest(
    State(state): State<Arc<AppState>>,
    Query(coord): Query<Coord>,
) -> ApiResult<Json<serde_json::Value>> {
    let resources = state.resources().ok_or(ApiError::NotReady)?;
    let node = snap(&resources, coord)?;
    Ok(Json(json!({ "node": node.0, "position": resources.graph.position(node) })))
}

async fn route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RouteRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let resources = state.resources().ok_or(ApiError::NotReady)?;
    let start = snap(&resources, request.start)?;
    let target = snap(&resources, request.target)?;

    // Dijkstra is CPU-bound; keep it off the async workers.
    let run = resources.clone();
    let route = tokio::task::spawn_blocking(move || one_to_one(&run.graph, start, target))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let body = match route {
        None => json!({ "unreachable": true }),
        Some(route) => {
            tracing::info!(%start, %target, distance = route.distance, edges = route.edges.len(), "route computed");
            json!({
                "unreachable": false,
                "distance": route.distance,
                "node_count": route.edges.len() + 1,
                "geometry": LineString::from_path(&resources.graph, start, &route.edges),
            })
        }
    };
    Ok(Json(body))
}

async fn tree(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TreeRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let resources = state.resources().ok_or(ApiError::NotReady)?;
    let source = snap(&resources, request.start)?;

    let run = resources.clone();
    let tree = tokio::task::spawn_blocking(move || one_to_all(&run.graph, source))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(%source, "one-to-all tree cached");
    state.cache_tree(tree);
    Ok(Json(json!({ "source": source.0 })))
}

async fn tree_path(
    State(state): State<Arc<AppState>>,
    Query(coord): Query<Coord>,
) -> ApiResult<Json<serde_json::Value>> {
    let resources = state.resources().ok_or(ApiError::NotReady)?;
    let tree = state.cached_tree().ok_or(ApiError::NoTree)?;
    let target = snap(&resources, coord)?;

    let body = match tree.path_to(&resources.graph, target) {
        Err(rp_graph::GraphError::Unreachable { .. }) => json!({ "unreachable": true }),
        Err(e) => return Err(ApiError::Internal(e.to_string())),
        Ok(edges) => json!({
            "unreachable": false,
            "source": tree.source().0,
            "target": target.0,
            "distance": tree.distance_to(target),
            "geometry": LineString::from_path(&resources.graph, tree.source(), &edges),
        }),
    };
    Ok(Json(body))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn snap(resources: &GraphResources, coord: Coord) -> ApiResult<NodeId> {
    resources.index.nearest(coord.into()).ok_or(ApiError::NoNodes)
}
