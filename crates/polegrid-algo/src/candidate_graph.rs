//! Directed candidate graph over the node arena.
//!
//! | Edge | Window (meters) | Voltage |
//! |------|-----------------|---------|
//! | pole -> destination | `(min_span, max_pole_to_destination]` | Low |
//! | pole -> pole (both directions) | `(min_span, max_pole_to_pole]` | High |
//! | source -> pole | `(min_span, max_pole_to_pole]` | High |
//!
//! Destinations never feed anything and nothing enters the source. With no
//! poles at all, the source connects straight to each destination under the
//! pole-to-pole window as low-voltage service drops.

use polegrid_core::{
    CandidateGraph, CostConfig, DistanceMatrix, EdgeWeighting, NodeArena, NodeId, PlannerConfig,
    Span, VoltageClass,
};
use tracing::debug;

/// Build every admissible span. Insertion order is fixed by node id:
/// source edges first, then each pole's outgoing edges.
pub fn build_candidate_graph(
    arena: &NodeArena,
    distances: &DistanceMatrix,
    config: &PlannerConfig,
    costs: &CostConfig,
) -> CandidateGraph {
    let thresholds = &config.thresholds;
    let mut graph = CandidateGraph::with_nodes(arena.len());
    let source = arena.source();

    let mut add = |from: NodeId, to: NodeId, max_m: f64, voltage: VoltageClass| {
        let length = distances.get(from.value(), to.value());
        if thresholds.admits(length, max_m) {
            let span = Span::new(from, to, length, voltage);
            let weight = match config.weighting {
                EdgeWeighting::Length => span.weight,
                EdgeWeighting::WireCost => wire_cost(&span, costs),
            };
            graph.add_span(span.with_weight(weight));
        }
    };

    if arena.pole_count() == 0 {
        for destination in arena.destinations() {
            add(
                source,
                destination,
                thresholds.max_pole_to_pole_m,
                VoltageClass::Low,
            );
        }
    } else {
        for pole in arena.poles() {
            add(source, pole, thresholds.max_pole_to_pole_m, VoltageClass::High);
        }
        for pole in arena.poles() {
            for other in arena.poles() {
                add(pole, other, thresholds.max_pole_to_pole_m, VoltageClass::High);
            }
            for destination in arena.destinations() {
                add(
                    pole,
                    destination,
                    thresholds.max_pole_to_destination_m,
                    VoltageClass::Low,
                );
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        poles = arena.pole_count(),
        "candidate graph built"
    );
    graph
}

fn wire_cost(span: &Span, costs: &CostConfig) -> f64 {
    let per_meter = match span.voltage {
        VoltageClass::Low => costs.low_voltage_cost_per_meter,
        VoltageClass::High => costs.high_voltage_cost_per_meter,
    };
    span.length.priced_at(per_meter).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polegrid_core::{GeoPoint, NodeRole};

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    fn build(arena: &NodeArena, config: &PlannerConfig, costs: &CostConfig) -> CandidateGraph {
        let distances = DistanceMatrix::from_points(&arena.positions());
        build_candidate_graph(arena, &distances, config, costs)
    }

    #[test]
    fn test_edge_roles_and_windows() {
        // source, two destinations, two poles ~55 m apart
        let arena = NodeArena::new(
            pt(0.0, 0.0),
            vec![(pt(0.0, 0.0015), None), (pt(0.0, 0.005), None)],
            vec![pt(0.0, 0.0005), pt(0.0, 0.001)],
        );
        let graph = build(&arena, &PlannerConfig::default(), &CostConfig::default());

        for span in graph.spans() {
            let from = arena.role(span.from);
            let to = arena.role(span.to);
            assert_ne!(to, NodeRole::Source);
            assert_ne!(from, NodeRole::Destination);
            match (from, to) {
                (NodeRole::Pole, NodeRole::Destination) => {
                    assert_eq!(span.voltage, VoltageClass::Low);
                    assert!(span.length.value() <= 100.0);
                }
                _ => {
                    assert_eq!(span.voltage, VoltageClass::High);
                    assert!(span.length.value() <= 150.0);
                }
            }
        }

        // Far destination (~556 m away from everything) gets no edge
        assert_eq!(graph.incoming(NodeId::new(2)).count(), 0);
        // Pole-to-pole spans exist in both directions
        assert!(graph.span(NodeId::new(3), NodeId::new(4)).is_some());
        assert!(graph.span(NodeId::new(4), NodeId::new(3)).is_some());
        // Source reaches the near pole (~55 m) and the far one (~111 m)
        assert!(graph.span(NodeId::new(0), NodeId::new(3)).is_some());
        assert!(graph.span(NodeId::new(0), NodeId::new(4)).is_some());
        // Source never connects straight to a destination when poles exist
        assert!(graph.span(NodeId::new(0), NodeId::new(1)).is_none());
    }

    #[test]
    fn test_zero_pole_fallback_connects_source_directly() {
        let arena = NodeArena::new(pt(0.0, 0.0), vec![(pt(0.0, 0.001), None)], vec![]);
        let graph = build(&arena, &PlannerConfig::default(), &CostConfig::default());

        assert_eq!(graph.edge_count(), 1);
        let span = graph.span(NodeId::new(0), NodeId::new(1)).unwrap();
        assert_eq!(span.voltage, VoltageClass::Low);
        assert!((span.length.value() - 111.19).abs() < 0.01);
    }

    #[test]
    fn test_coincident_nodes_are_not_linked() {
        let arena = NodeArena::new(
            pt(0.0, 0.0),
            vec![(pt(0.0, 0.0005), None)],
            vec![pt(0.0, 0.0005)],
        );
        let graph = build(&arena, &PlannerConfig::default(), &CostConfig::default());
        // Pole sits on the destination: zero-length span is outside the window
        assert!(graph.span(NodeId::new(2), NodeId::new(1)).is_none());
    }

    #[test]
    fn test_wire_cost_weighting() {
        let arena = NodeArena::new(
            pt(0.0, 0.0),
            vec![(pt(0.0, 0.001), None)],
            vec![pt(0.0, 0.0005)],
        );
        let costs = CostConfig::new(0.0, 1.0, 3.0);
        let config = PlannerConfig::default().with_weighting(EdgeWeighting::WireCost);
        let graph = build(&arena, &config, &costs);

        let high = graph.span(NodeId::new(0), NodeId::new(2)).unwrap();
        let low = graph.span(NodeId::new(2), NodeId::new(1)).unwrap();
        assert!((high.weight - 3.0 * high.length.value()).abs() < 1e-9);
        assert!((low.weight - low.length.value()).abs() < 1e-9);
    }
}
