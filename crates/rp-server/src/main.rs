//! Routing service binary.
//!
//! Binds immediately and loads the graph on a background blocking task, so
//! clients can poll `GET /status` while a large file is still being read.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rp_server::api::create_router;
use rp_server::state::AppState;

#[derive(Parser)]
#[command(about = "JSON/GeoJSON shortest-path routing over an FMI graph file")]
struct Args {
    /// FMI plain-text graph file to serve.
    graph: PathBuf,

    /// Listen address.
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rp_server=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();
    let state = Arc::new(AppState::new());

    // Background load (file read + index build are CPU/IO-bound);
    // endpoints answer 503 until it completes.
    let load_state = state.clone();
    let path = args.graph.clone();
    tokio::task::spawn_blocking(move || {
        let started = Instant::now();
        match rp_fmi::read_graph(&path) {
            Ok(graph) => {
                let (nodes, edges) = (graph.node_count(), graph.edge_count());
                load_state.install_graph(graph);
                tracing::info!(nodes, edges, elapsed = ?started.elapsed(), "graph resources ready");
            }
            Err(e) => {
                tracing::error!(graph = %path.display(), error = %e, "failed to read graph file");
                std::process::exit(1);
            }
        }
    });

    let app = create_router(state);
    tracing::info!(addr = %args.addr, "server listening");

    let listener = tokio::net::TcpListener::bind(args.addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
