//! bench — file-driven timing harness for the rust_rp engine.
//!
//! Reads an FMI graph file, then times construction, nearest-node queries
//! (checked against a linear scan), a one-to-all run, and a sweep of random
//! one-to-one queries — first sequentially, then across all cores via rayon
//! to exercise the read-only sharing guarantee.  Appends a summary line to
//! `<graph>-benchmark.log` next to the graph file.
//!
//! Usage: `bench <graph.fmi> [query-count]` (default 100 queries).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use rp_core::{GeoPoint, NodeId};
use rp_graph::{one_to_all, one_to_one, RoadGraph, SpatialIndex};

const SEED: u64 = 42;
const NEAREST_QUERIES: usize = 1_000;

#[derive(Parser)]
#[command(about = "Timing harness: graph construction, nearest-node, and Dijkstra sweeps")]
struct Args {
    /// FMI plain-text graph file to benchmark.
    graph: PathBuf,

    /// Number of random one-to-one queries per sweep.
    #[arg(default_value_t = 100)]
    query_count: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let graph_path = args.graph;
    let query_count = args.query_count;

    // ── Graph construction ────────────────────────────────────────────────
    println!("Reading graph file {} ...", graph_path.display());
    let started = Instant::now();
    let graph = rp_fmi::read_graph(&graph_path)?;
    let read_secs = started.elapsed().as_secs_f64();
    println!(
        "  {} nodes, {} edges in {read_secs:.3}s",
        graph.node_count(),
        graph.edge_count()
    );
    if graph.is_empty() {
        bail!("graph has no nodes; nothing to benchmark");
    }

    // ── Spatial index ─────────────────────────────────────────────────────
    let started = Instant::now();
    let index = SpatialIndex::build(&graph);
    let index_secs = started.elapsed().as_secs_f64();
    println!("Built spatial index in {index_secs:.3}s");

    let mut rng = SmallRng::seed_from_u64(SEED);
    let nearest_points: Vec<GeoPoint> = (0..NEAREST_QUERIES)
        .map(|_| random_point_near(&graph, &mut rng))
        .collect();

    let started = Instant::now();
    let snapped: Vec<NodeId> = nearest_points
        .iter()
        .map(|&p| index.nearest(p).expect("graph is non-empty"))
        .collect();
    let nearest_secs = started.elapsed().as_secs_f64();

    let started = Instant::now();
    let mismatches = nearest_points
        .iter()
        .zip(&snapped)
        .filter(|&(&p, &found)| {
            let best = graph
                .node_pos
                .iter()
                .map(|&q| q.distance_to(p))
                .fold(f64::INFINITY, f64::min);
            graph.position(found).distance_to(p) > best
        })
        .count();
    let scan_secs = started.elapsed().as_secs_f64();
    println!(
        "{NEAREST_QUERIES} nearest-node queries in {nearest_secs:.3}s \
         (linear-scan check: {scan_secs:.3}s, {mismatches} mismatches)"
    );
    if mismatches > 0 {
        bail!("{mismatches} nearest-node results disagree with the linear scan");
    }

    // ── One-to-all ────────────────────────────────────────────────────────
    let source = NodeId(rng.gen_range(0..graph.node_count() as u32));
    let started = Instant::now();
    let tree = one_to_all(&graph, source)?;
    let one_to_all_secs = started.elapsed().as_secs_f64();
    let reachable = (0..graph.node_count() as u32)
        .filter(|&v| tree.distance_to(NodeId(v)).is_some())
        .count();
    println!(
        "One-to-all from {source}: {reachable}/{} reachable in {one_to_all_secs:.3}s",
        graph.node_count()
    );

    // ── One-to-one sweep, sequential then parallel ────────────────────────
    let pairs: Vec<(NodeId, NodeId)> = (0..query_count)
        .map(|_| {
            (
                NodeId(rng.gen_range(0..graph.node_count() as u32)),
                NodeId(rng.gen_range(0..graph.node_count() as u32)),
            )
        })
        .collect();

    let started = Instant::now();
    let sequential: Vec<Option<u32>> = pairs
        .iter()
        .map(|&(s, t)| distance_of(&graph, s, t))
        .collect::<Result<_, _>>()?;
    let sequential_secs = started.elapsed().as_secs_f64();

    let started = Instant::now();
    let parallel: Vec<Option<u32>> = pairs
        .par_iter()
        .map(|&(s, t)| distance_of(&graph, s, t))
        .collect::<Result<_, _>>()?;
    let parallel_secs = started.elapsed().as_secs_f64();

    if sequential != parallel {
        bail!("parallel one-to-one results diverge from the sequential run");
    }
    println!(
        "{query_count} one-to-one queries: {sequential_secs:.3}s sequential, \
         {parallel_secs:.3}s parallel"
    );

    append_log(
        &graph_path,
        read_secs,
        one_to_all_secs,
        query_count,
        sequential_secs,
        parallel_secs,
    )?;
    Ok(())
}

fn distance_of(graph: &RoadGraph, s: NodeId, t: NodeId) -> rp_graph::GraphResult<Option<u32>> {
    Ok(one_to_one(graph, s, t)?.map(|route| route.distance))
}

/// A query point inside (and slightly beyond) the graph's bounding box.
fn random_point_near(graph: &RoadGraph, rng: &mut SmallRng) -> GeoPoint {
    let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in &graph.node_pos {
        min_lon = min_lon.min(p.lon);
        max_lon = max_lon.max(p.lon);
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
    }
    let pad = 0.05 * (max_lat - min_lat).max(1e-9);
    GeoPoint::new(
        rng.gen_range(min_lon - pad..=max_lon + pad),
        rng.gen_range(min_lat - pad..=max_lat + pad),
    )
}

/// Append a `user@os` timestamped summary to `<graph>-benchmark.log`.
fn append_log(
    graph_path: &Path,
    read_secs: f64,
    one_to_all_secs: f64,
    query_count: usize,
    sequential_secs: f64,
    parallel_secs: f64,
) -> Result<()> {
    let log_path = format!("{}-benchmark.log", graph_path.display());
    let user = std::env::var("USER").unwrap_or_else(|_| "unknown".into());
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("cannot open {log_path}"))?;
    writeln!(
        file,
        "{user}@{} - {stamp}\n\
         \tgraph read:\t{read_secs:.3} secs\n\
         \tone-to-all:\t{one_to_all_secs:.3} secs\n\
         \t{query_count} one-to-one:\t{sequential_secs:.3} secs ({parallel_secs:.3} parallel)\n",
        std::env::consts::OS
    )?;
    println!("Appended results to {log_path}");
    Ok(())
}
