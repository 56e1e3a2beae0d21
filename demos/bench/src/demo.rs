//! demo — synthetic-network walk-through for the rust_rp engine.
//!
//! Builds a small fixed road network inline, prints its adjacency structure,
//! then runs one nearest-node lookup, one one-to-one route, and one
//! one-to-all tree — the whole public surface in miniature.

use anyhow::Result;

use rp_core::{EdgeId, GeoPoint, NodeId};
use rp_graph::{one_to_all, one_to_one, GraphBuilder, RoadGraph, SpatialIndex};

/// Six nodes around a city block; weights are travel seconds.
///
/// ```text
///   5 ←──── 4 ←──── 3
///   │       ↑       ↑
///   ↓       │       │
///   0 ────→ 1 ────→ 2
/// ```
fn build_network() -> Result<RoadGraph> {
    let positions = [
        (0.0, 0.0), // 0
        (1.0, 0.0), // 1
        (2.0, 0.0), // 2
        (2.0, 1.0), // 3
        (1.0, 1.0), // 4
        (0.0, 1.0), // 5
    ];
    // (source, target, weight), already source-sorted.
    let edges = [
        (0, 1, 30),
        (1, 2, 30),
        (1, 4, 50),
        (2, 3, 20),
        (3, 4, 20),
        (4, 5, 30),
        (5, 0, 30),
    ];

    let mut builder = GraphBuilder::new(positions.len(), edges.len());
    for (i, &(lon, lat)) in positions.iter().enumerate() {
        builder.add_node(NodeId(i as u32), GeoPoint::new(lon, lat))?;
    }
    for (i, &(s, t, w)) in edges.iter().enumerate() {
        builder.add_edge(EdgeId(i as u32), NodeId(s), NodeId(t), w)?;
    }
    Ok(builder.finalize())
}

fn main() -> Result<()> {
    let graph = build_network()?;

    println!(" Node\t| Lon\t| Lat\t| Out-edges (target, weight)");
    for v in 0..graph.node_count() as u32 {
        let node = NodeId(v);
        let pos = graph.position(node);
        let targets: Vec<String> = graph
            .out_edges(node)
            .map(|e| format!("({}, {})", graph.edge_target[e.index()].0, graph.edge_weight[e.index()]))
            .collect();
        println!("  {v}\t| {:.1}\t| {:.1}\t| {}", pos.lon, pos.lat, targets.join(" "));
    }

    let index = SpatialIndex::build(&graph);
    let query = GeoPoint::new(1.8, 0.2);
    let snapped = index.nearest(query).expect("network is non-empty");
    println!("\nNearest node to {query}: {snapped}");

    // 0 → 5 directly via edge 5→0 does not exist; the route goes around.
    let route = one_to_one(&graph, NodeId(0), NodeId(5))?.expect("5 is reachable from 0");
    println!("\nRoute 0 → 5: distance {}", route.distance);
    for edge in &route.edges {
        println!(
            "  edge {}: {} → {} ({}s)",
            edge.0,
            graph.edge_source[edge.index()].0,
            graph.edge_target[edge.index()].0,
            graph.edge_weight[edge.index()]
        );
    }

    let tree = one_to_all(&graph, NodeId(0))?;
    println!("\nOne-to-all from node 0:");
    for v in 0..graph.node_count() as u32 {
        match tree.distance_to(NodeId(v)) {
            Some(d) => println!("  node {v}: {d}s"),
            None => println!("  node {v}: unreachable"),
        }
    }
    Ok(())
}
