//! Unit tests for rp-graph.
//!
//! All tests use hand-crafted or seeded synthetic graphs so they run without
//! any graph file.

#[cfg(test)]
mod helpers {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rp_core::{EdgeId, GeoPoint, NodeId};

    use crate::{GraphBuilder, RoadGraph};

    /// The unit-square graph:
    ///
    /// ```text
    /// nodes  A=(0,0)  B=(1,0)  C=(1,1)  D=(0,1)
    /// edges  e0 A→B(1)  e1 A→D(5)  e2 B→C(1)  e3 C→D(1)
    /// ```
    ///
    /// Shortest A→D is 3 via [e0, e2, e3], beating the direct weight-5 edge.
    pub fn square_graph() -> (RoadGraph, [NodeId; 4]) {
        let [a, b, c, d] = [NodeId(0), NodeId(1), NodeId(2), NodeId(3)];
        let mut builder = GraphBuilder::new(4, 4);
        builder.add_node(a, GeoPoint::new(0.0, 0.0)).unwrap();
        builder.add_node(b, GeoPoint::new(1.0, 0.0)).unwrap();
        builder.add_node(c, GeoPoint::new(1.0, 1.0)).unwrap();
        builder.add_node(d, GeoPoint::new(0.0, 1.0)).unwrap();
        builder.add_edge(EdgeId(0), a, b, 1).unwrap();
        builder.add_edge(EdgeId(1), a, d, 5).unwrap();
        builder.add_edge(EdgeId(2), b, c, 1).unwrap();
        builder.add_edge(EdgeId(3), c, d, 1).unwrap();
        (builder.finalize(), [a, b, c, d])
    }

    /// Six nodes where 1, 2 and 4 have no outgoing edges and 5 is isolated:
    /// exercises gap propagation in the middle and tail completion at the end.
    ///
    /// ```text
    /// e0 0→1(2)  e1 0→2(7)  e2 3→4(1)
    /// ```
    pub fn gap_graph() -> RoadGraph {
        let mut builder = GraphBuilder::new(6, 3);
        for i in 0..6 {
            builder
                .add_node(NodeId(i), GeoPoint::new(i as f64, 0.0))
                .unwrap();
        }
        builder.add_edge(EdgeId(0), NodeId(0), NodeId(1), 2).unwrap();
        builder.add_edge(EdgeId(1), NodeId(0), NodeId(2), 7).unwrap();
        builder.add_edge(EdgeId(2), NodeId(3), NodeId(4), 1).unwrap();
        builder.finalize()
    }

    /// Seeded random graph: `n` nodes scattered over a unit square, each
    /// with 0–3 outgoing edges of weight 1–99.
    pub fn random_graph(seed: u64, n: u32) -> RoadGraph {
        let mut rng = SmallRng::seed_from_u64(seed);

        // Sources must be non-decreasing, so draw per-node degrees first.
        let degrees: Vec<u32> = (0..n).map(|_| rng.gen_range(0..4)).collect();
        let m: u32 = degrees.iter().sum();

        let mut builder = GraphBuilder::new(n as usize, m as usize);
        for i in 0..n {
            let pos = GeoPoint::new(rng.r#gen::<f64>(), rng.r#gen::<f64>());
            builder.add_node(NodeId(i), pos).unwrap();
        }
        let mut edge = 0;
        for source in 0..n {
            for _ in 0..degrees[source as usize] {
                let target = rng.gen_range(0..n);
                let weight = rng.gen_range(1..100);
                builder
                    .add_edge(EdgeId(edge), NodeId(source), NodeId(target), weight)
                    .unwrap();
                edge += 1;
            }
        }
        builder.finalize()
    }

    /// Independent shortest-distance baseline: Bellman-Ford relaxation over
    /// the raw edge arrays.  `None` = unreachable.
    pub fn bellman_ford(graph: &RoadGraph, source: NodeId) -> Vec<Option<u32>> {
        let n = graph.node_count();
        let mut dist = vec![u32::MAX; n];
        dist[source.index()] = 0;
        for _ in 0..n {
            let mut changed = false;
            for e in 0..graph.edge_count() {
                let s = graph.edge_source[e].index();
                let t = graph.edge_target[e].index();
                let candidate = dist[s].saturating_add(graph.edge_weight[e]);
                if candidate < dist[t] {
                    dist[t] = candidate;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        dist.into_iter()
            .map(|d| (d != u32::MAX).then_some(d))
            .collect()
    }
}

// ── Builder & CSR invariants ──────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use rp_core::{EdgeId, GeoPoint, NodeId};

    use crate::{GraphBuilder, GraphError, RoadGraph};

    /// The CSR invariants every finalized graph must satisfy.
    fn assert_csr_invariants(graph: &RoadGraph) {
        let n = graph.node_count();
        let m = graph.edge_count();
        assert_eq!(graph.edge_offset.len(), n + 1);
        assert_eq!(graph.edge_offset[0], 0);
        assert_eq!(graph.edge_offset[n] as usize, m);
        for v in 0..n {
            assert!(graph.edge_offset[v] <= graph.edge_offset[v + 1]);
            for e in graph.out_edges(NodeId(v as u32)) {
                assert_eq!(graph.edge_source[e.index()], NodeId(v as u32));
            }
        }
    }

    #[test]
    fn empty_graph() {
        let graph = GraphBuilder::new(0, 0).finalize();
        assert!(graph.is_empty());
        assert_csr_invariants(&graph);
    }

    #[test]
    fn square_invariants() {
        let (graph, [a, b, c, d]) = super::helpers::square_graph();
        assert_csr_invariants(&graph);
        assert_eq!(graph.out_degree(a), 2);
        assert_eq!(graph.out_degree(b), 1);
        assert_eq!(graph.out_degree(c), 1);
        assert_eq!(graph.out_degree(d), 0);
    }

    #[test]
    fn gap_nodes_get_empty_ranges() {
        let graph = super::helpers::gap_graph();
        assert_csr_invariants(&graph);
        assert_eq!(graph.out_degree(NodeId(0)), 2);
        assert_eq!(graph.out_degree(NodeId(1)), 0);
        assert_eq!(graph.out_degree(NodeId(2)), 0);
        assert_eq!(graph.out_degree(NodeId(3)), 1);
        // Tail nodes past the last edge source.
        assert_eq!(graph.out_degree(NodeId(4)), 0);
        assert_eq!(graph.out_degree(NodeId(5)), 0);
    }

    #[test]
    fn random_graph_invariants() {
        for seed in 0..4 {
            assert_csr_invariants(&super::helpers::random_graph(seed, 40));
        }
    }

    #[test]
    fn node_out_of_range_rejected() {
        let mut builder = GraphBuilder::new(2, 1);
        assert_eq!(
            builder.add_node(NodeId(2), GeoPoint::new(0.0, 0.0)),
            Err(GraphError::NodeNotFound(NodeId(2)))
        );
    }

    #[test]
    fn edge_endpoint_out_of_range_rejected() {
        let mut builder = GraphBuilder::new(2, 2);
        assert_eq!(
            builder.add_edge(EdgeId(0), NodeId(0), NodeId(9), 1),
            Err(GraphError::NodeNotFound(NodeId(9)))
        );
        assert_eq!(
            builder.add_edge(EdgeId(0), NodeId(9), NodeId(0), 1),
            Err(GraphError::NodeNotFound(NodeId(9)))
        );
    }

    #[test]
    fn edge_id_out_of_range_rejected() {
        let mut builder = GraphBuilder::new(2, 1);
        assert_eq!(
            builder.add_edge(EdgeId(1), NodeId(0), NodeId(1), 1),
            Err(GraphError::EdgeNotFound(EdgeId(1)))
        );
    }

    #[test]
    fn edge_id_gap_rejected() {
        let mut builder = GraphBuilder::new(3, 3);
        builder.add_edge(EdgeId(0), NodeId(0), NodeId(1), 1).unwrap();
        assert_eq!(
            builder.add_edge(EdgeId(2), NodeId(1), NodeId(2), 1),
            Err(GraphError::EdgeIdGap { edge: EdgeId(2), expected: EdgeId(1) })
        );
    }

    #[test]
    fn unsorted_source_rejected() {
        let mut builder = GraphBuilder::new(3, 3);
        builder.add_edge(EdgeId(0), NodeId(2), NodeId(0), 1).unwrap();
        assert_eq!(
            builder.add_edge(EdgeId(1), NodeId(1), NodeId(2), 1),
            Err(GraphError::UnsortedEdge {
                edge: EdgeId(1),
                from: NodeId(1),
                last: NodeId(2),
            })
        );
    }

    #[test]
    fn graphs_are_debug_printable() {
        // `{:?}` on load results is how callers report failures.
        let (graph, _) = super::helpers::square_graph();
        let dump = format!("{graph:?}");
        assert!(dump.contains("edge_offset"));
        assert!(dump.contains("edge_weight"));
    }
}

// ── Frontier queue ────────────────────────────────────────────────────────────

#[cfg(test)]
mod heap {
    use rp_core::NodeId;

    use crate::heap::FrontierQueue;

    #[test]
    fn pops_in_distance_order() {
        let mut q = FrontierQueue::new(5);
        q.push(NodeId(0), 30);
        q.push(NodeId(1), 10);
        q.push(NodeId(2), 20);
        assert_eq!(q.pop(), Some((NodeId(1), 10)));
        assert_eq!(q.pop(), Some((NodeId(2), 20)));
        assert_eq!(q.pop(), Some((NodeId(0), 30)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn decrease_reorders() {
        let mut q = FrontierQueue::new(4);
        q.push(NodeId(0), 10);
        q.push(NodeId(1), 20);
        q.push(NodeId(2), 30);
        q.decrease(NodeId(2), 5);
        assert_eq!(q.pop(), Some((NodeId(2), 5)));
        assert_eq!(q.pop(), Some((NodeId(0), 10)));
    }

    #[test]
    fn never_pops_a_node_twice() {
        let mut q = FrontierQueue::new(8);
        for i in 0..8 {
            q.push(NodeId(i), 100 - i);
        }
        q.decrease(NodeId(0), 1);
        q.decrease(NodeId(0), 0);
        let mut seen = [false; 8];
        while let Some((node, _)) = q.pop() {
            assert!(!seen[node.index()], "{node} popped twice");
            seen[node.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn contains_tracks_membership() {
        let mut q = FrontierQueue::new(3);
        assert!(!q.contains(NodeId(1)));
        q.push(NodeId(1), 7);
        assert!(q.contains(NodeId(1)));
        q.pop();
        assert!(!q.contains(NodeId(1)));
        assert!(q.is_empty());
    }

    #[test]
    fn interleaved_operations_stay_ordered() {
        let mut q = FrontierQueue::new(16);
        q.push(NodeId(3), 40);
        q.push(NodeId(7), 25);
        assert_eq!(q.pop(), Some((NodeId(7), 25)));
        q.push(NodeId(1), 50);
        q.push(NodeId(2), 35);
        q.decrease(NodeId(1), 30);
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some((NodeId(1), 30)));
        assert_eq!(q.pop(), Some((NodeId(2), 35)));
        assert_eq!(q.pop(), Some((NodeId(3), 40)));
    }
}

// ── Dijkstra engine ───────────────────────────────────────────────────────────

#[cfg(test)]
mod dijkstra {
    use rp_core::{EdgeId, NodeId};

    use crate::{one_to_all, one_to_one, shortest_path, GraphError, ShortestPathResult};

    #[test]
    fn square_takes_the_long_way_round() {
        let (graph, [a, _, _, d]) = super::helpers::square_graph();
        let route = one_to_one(&graph, a, d).unwrap().unwrap();
        assert_eq!(route.distance, 3);
        assert_eq!(route.edges, vec![EdgeId(0), EdgeId(2), EdgeId(3)]);
    }

    #[test]
    fn route_edges_sum_to_distance() {
        let (graph, [a, _, _, d]) = super::helpers::square_graph();
        let route = one_to_one(&graph, a, d).unwrap().unwrap();
        let sum: u32 = route.edges.iter().map(|e| graph.edge_weight[e.index()]).sum();
        assert_eq!(sum, route.distance);
        // ...and the edges chain source → target.
        assert_eq!(graph.edge_source[route.edges[0].index()], a);
        assert_eq!(graph.edge_target[route.edges.last().unwrap().index()], d);
        for pair in route.edges.windows(2) {
            assert_eq!(
                graph.edge_target[pair[0].index()],
                graph.edge_source[pair[1].index()]
            );
        }
    }

    #[test]
    fn one_to_all_matches_baseline() {
        for seed in 0..6 {
            let graph = super::helpers::random_graph(seed, 30);
            let tree = one_to_all(&graph, NodeId(0)).unwrap();
            let baseline = super::helpers::bellman_ford(&graph, NodeId(0));
            for v in 0..graph.node_count() {
                assert_eq!(
                    tree.distance_to(NodeId(v as u32)),
                    baseline[v],
                    "seed {seed}, node {v}"
                );
            }
        }
    }

    #[test]
    fn one_to_one_agrees_with_one_to_all() {
        let graph = super::helpers::random_graph(99, 30);
        let tree = one_to_all(&graph, NodeId(0)).unwrap();
        for v in 0..graph.node_count() as u32 {
            let route = one_to_one(&graph, NodeId(0), NodeId(v)).unwrap();
            assert_eq!(route.map(|r| r.distance), tree.distance_to(NodeId(v)));
        }
    }

    #[test]
    fn one_to_all_path_matches_its_distance() {
        let (graph, [a, _, _, d]) = super::helpers::square_graph();
        let tree = one_to_all(&graph, a).unwrap();
        assert_eq!(tree.source(), a);
        assert_eq!(tree.distance_to(a), Some(0));
        let path = tree.path_to(&graph, d).unwrap();
        let sum: u32 = path.iter().map(|e| graph.edge_weight[e.index()]).sum();
        assert_eq!(Some(sum), tree.distance_to(d));
    }

    #[test]
    fn unreachable_is_a_result_not_an_error() {
        let graph = super::helpers::gap_graph();
        // Node 5 is isolated.
        match shortest_path(&graph, NodeId(0), Some(NodeId(5))).unwrap() {
            ShortestPathResult::OneToOne { route, .. } => assert!(route.is_none()),
            ShortestPathResult::OneToAll(_) => panic!("expected a one-to-one result"),
        }
    }

    #[test]
    fn unreachable_path_to_is_an_error() {
        let graph = super::helpers::gap_graph();
        let tree = one_to_all(&graph, NodeId(0)).unwrap();
        assert_eq!(tree.distance_to(NodeId(5)), None);
        assert_eq!(
            tree.path_to(&graph, NodeId(5)),
            Err(GraphError::Unreachable { from: NodeId(0), target: NodeId(5) })
        );
    }

    #[test]
    fn trivial_source_equals_target() {
        let (graph, [a, ..]) = super::helpers::square_graph();
        let route = one_to_one(&graph, a, a).unwrap().unwrap();
        assert!(route.is_trivial());
        assert_eq!(route.distance, 0);
    }

    #[test]
    fn out_of_range_ids_rejected() {
        let (graph, [a, ..]) = super::helpers::square_graph();
        assert!(matches!(
            shortest_path(&graph, NodeId(4), None),
            Err(GraphError::NodeNotFound(NodeId(4)))
        ));
        assert!(matches!(
            shortest_path(&graph, a, Some(NodeId(99))),
            Err(GraphError::NodeNotFound(NodeId(99)))
        ));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let graph = super::helpers::random_graph(7, 25);
        let first = one_to_all(&graph, NodeId(3)).unwrap();
        let second = one_to_all(&graph, NodeId(3)).unwrap();
        assert_eq!(first, second);
        let r1 = one_to_one(&graph, NodeId(3), NodeId(20)).unwrap();
        let r2 = one_to_one(&graph, NodeId(3), NodeId(20)).unwrap();
        assert_eq!(r1, r2);
    }
}

// ── Spatial index ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use rp_core::{GeoPoint, NodeId};

    use crate::{GraphBuilder, SpatialIndex};

    #[test]
    fn empty_index_has_no_nearest() {
        let graph = GraphBuilder::new(0, 0).finalize();
        let index = SpatialIndex::build(&graph);
        assert!(index.is_empty());
        assert_eq!(index.nearest(GeoPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn origin_snaps_to_corner_node() {
        let (graph, [a, ..]) = super::helpers::square_graph();
        let index = SpatialIndex::build(&graph);
        assert_eq!(index.nearest(GeoPoint::new(0.0, 0.0)), Some(a));
    }

    #[test]
    fn queries_beyond_the_latitude_range_clamp() {
        let (graph, [a, _, c, d]) = super::helpers::square_graph();
        let index = SpatialIndex::build(&graph);
        // Below every node latitude → pivot at the bottom of the array.
        assert_eq!(index.nearest(GeoPoint::new(0.0, -10.0)), Some(a));
        // Above every node latitude.
        let high = index.nearest(GeoPoint::new(0.9, 10.0));
        assert!(high == Some(c) || high == Some(d));
    }

    #[test]
    fn matches_linear_scan_on_random_points() {
        for seed in 0..4 {
            let graph = super::helpers::random_graph(seed, 60);
            let index = SpatialIndex::build(&graph);
            let mut rng = SmallRng::seed_from_u64(seed ^ 0xbeef);

            for _ in 0..200 {
                let query = GeoPoint::new(rng.gen_range(-0.5..1.5), rng.gen_range(-0.5..1.5));
                let found = index.nearest(query).unwrap();
                let best_dist = graph
                    .node_pos
                    .iter()
                    .map(|&p| p.distance_to(query))
                    .fold(f64::INFINITY, f64::min);
                // Compare distances, not ids: equidistant ties may resolve
                // to either node.
                let found_dist = graph.position(found).distance_to(query);
                assert_eq!(found_dist, best_dist, "seed {seed}, query {query}");
            }
        }
    }

    #[test]
    fn duplicate_latitudes_still_find_the_best_longitude() {
        // Ten nodes on one parallel: the latitude bound never cuts the scan,
        // so this exercises the full-width worst case.
        let mut builder = GraphBuilder::new(10, 0);
        for i in 0..10 {
            builder
                .add_node(NodeId(i), GeoPoint::new(i as f64, 48.0))
                .unwrap();
        }
        let index = SpatialIndex::build(&builder.finalize());
        assert_eq!(index.nearest(GeoPoint::new(6.2, 48.1)), Some(NodeId(6)));
        assert_eq!(index.nearest(GeoPoint::new(-3.0, 48.0)), Some(NodeId(0)));
    }

    #[test]
    fn repeated_queries_are_identical() {
        let graph = super::helpers::random_graph(11, 40);
        let index = SpatialIndex::build(&graph);
        let query = GeoPoint::new(0.33, 0.77);
        assert_eq!(index.nearest(query), index.nearest(query));
    }
}

#[cfg(test)]
mod errors {
    use std::error::Error;

    use rp_core::{EdgeId, NodeId};

    use crate::GraphError;

    #[test]
    fn messages_name_the_offending_ids() {
        let err = GraphError::UnsortedEdge {
            edge: EdgeId(7),
            from: NodeId(2),
            last: NodeId(4),
        };
        assert_eq!(
            err.to_string(),
            "edge 7 has source 2, after edges from 4 (input must be source-sorted)"
        );
        let err = GraphError::Unreachable { from: NodeId(0), target: NodeId(9) };
        assert_eq!(err.to_string(), "no path from 0 to 9");
    }

    #[test]
    fn no_variant_carries_a_nested_source() {
        // Ids are plain data, not wrapped errors.
        let all = [
            GraphError::NodeNotFound(NodeId(1)),
            GraphError::EdgeNotFound(EdgeId(1)),
            GraphError::EdgeIdGap { edge: EdgeId(3), expected: EdgeId(2) },
            GraphError::UnsortedEdge { edge: EdgeId(1), from: NodeId(0), last: NodeId(2) },
            GraphError::Unreachable { from: NodeId(0), target: NodeId(1) },
        ];
        for err in &all {
            assert!(err.source().is_none(), "{err}");
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serialization {
    use rp_core::EdgeId;

    use crate::Route;

    #[test]
    fn routes_round_trip_through_json() {
        let route = Route { edges: vec![EdgeId(0), EdgeId(2), EdgeId(3)], distance: 3 };
        let json = serde_json::to_string(&route).unwrap();
        let back: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(back, route);
    }
}
