//! Turns a pruned network into the caller-facing [`NetworkPlan`].

use polegrid_core::units::round2;
use polegrid_core::{
    CostConfig, DebugInfo, EdgeReport, Endpoint, NetworkPlan, NodeArena, NodeId, NodeReport,
    NodeRole, PrunedNetwork, VoltageClass,
};
use std::collections::BTreeMap;

/// Run facts the tree itself does not carry, echoed in the debug block.
#[derive(Debug, Clone, Default)]
pub struct SummaryContext {
    pub source_index: usize,
    pub source_name: String,
    pub original_points: usize,
    pub candidates_generated: usize,
    pub prune_passes: usize,
    pub warnings: Vec<String>,
}

pub fn summarize(
    arena: &NodeArena,
    network: &PrunedNetwork,
    costs: &CostConfig,
    context: SummaryContext,
) -> NetworkPlan {
    let names = display_names(arena, network);
    let name_of = |id: NodeId| names[&id].clone();

    let nodes: Vec<NodeReport> = network
        .members()
        .iter()
        .map(|&id| {
            let node = arena.get(id);
            NodeReport {
                index: id.value(),
                lat: node.position.latitude(),
                lng: node.position.longitude(),
                name: name_of(id),
                role: node.role,
            }
        })
        .collect();

    let endpoint = |id: NodeId| {
        let node = arena.get(id);
        Endpoint {
            lat: node.position.latitude(),
            lng: node.position.longitude(),
            name: name_of(id),
        }
    };
    let edges: Vec<EdgeReport> = network
        .breadth_first_edges()
        .into_iter()
        .map(|span| EdgeReport {
            start: endpoint(span.from),
            end: endpoint(span.to),
            length_meters: span.length.rounded().value(),
            voltage: span.voltage,
        })
        .collect();

    // Totals come from the reported (rounded) values so they add up exactly
    // as shown.
    let total_for = |voltage: VoltageClass| {
        round2(
            edges
                .iter()
                .filter(|e| e.voltage == voltage)
                .map(|e| e.length_meters)
                .sum(),
        )
    };
    let total_low = total_for(VoltageClass::Low);
    let total_high = total_for(VoltageClass::High);

    let num_poles_used = nodes.iter().filter(|n| n.role == NodeRole::Pole).count();
    let pole_cost = round2(num_poles_used as f64 * costs.pole_cost);
    let low_cost = round2(total_low * costs.low_voltage_cost_per_meter);
    let high_cost = round2(total_high * costs.high_voltage_cost_per_meter);
    let wire_cost = round2(low_cost + high_cost);

    NetworkPlan {
        edges,
        nodes,
        total_low_voltage_meters: total_low,
        total_high_voltage_meters: total_high,
        num_poles_used,
        pole_cost_estimate: pole_cost,
        low_wire_cost_estimate: low_cost,
        high_wire_cost_estimate: high_cost,
        total_wire_cost_estimate: wire_cost,
        total_cost_estimate: round2(pole_cost + wire_cost),
        used_costs: *costs,
        debug: DebugInfo {
            source_index: context.source_index,
            source_name: context.source_name,
            original_points: context.original_points,
            candidates_generated: context.candidates_generated,
            candidates_used: num_poles_used,
            prune_passes: context.prune_passes,
            warnings: context.warnings,
        },
    }
}

/// Arena names, except used poles become `Pole 1..n` in ascending id order.
fn display_names(arena: &NodeArena, network: &PrunedNetwork) -> BTreeMap<NodeId, String> {
    let mut pole_number = 0;
    network
        .members()
        .iter()
        .map(|&id| {
            let node = arena.get(id);
            let name = match node.role {
                NodeRole::Pole => {
                    pole_number += 1;
                    format!("Pole {pole_number}")
                }
                _ => node.name.clone(),
            };
            (id, name)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polegrid_core::{haversine_distance, Arborescence, GeoPoint, Span};

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    /// Source, two houses, three poles; pole 4 is unused.
    fn fixture() -> (NodeArena, PrunedNetwork) {
        let arena = NodeArena::new(
            pt(0.0, 0.0),
            vec![
                (pt(0.0, 0.0015), Some("House A".into())),
                (pt(0.0005, 0.001), None),
            ],
            vec![pt(0.0, 0.0005), pt(0.0005, 0.0), pt(0.0, 0.001)],
        );
        let positions = arena.positions();
        let span = |from: usize, to: usize, voltage| {
            Span::new(
                NodeId::new(from),
                NodeId::new(to),
                haversine_distance(&positions[from], &positions[to]),
                voltage,
            )
        };
        let network = Arborescence::from_edges(
            NodeId::new(0),
            vec![
                span(5, 1, VoltageClass::Low),
                span(0, 3, VoltageClass::High),
                span(3, 5, VoltageClass::High),
                span(5, 2, VoltageClass::Low),
            ],
        );
        (arena, network)
    }

    #[test]
    fn test_pole_numbering_and_roles() {
        let (arena, network) = fixture();
        let plan = summarize(&arena, &network, &CostConfig::default(), SummaryContext::default());

        let names: Vec<&str> = plan.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Power Source", "House A", "Destination 2", "Pole 1", "Pole 2"]
        );
        assert_eq!(plan.num_poles_used, 2);
        assert_eq!(plan.debug.candidates_used, 2);
        assert_eq!(plan.nodes[4].index, 5);
        assert_eq!(plan.nodes[4].role, NodeRole::Pole);
    }

    #[test]
    fn test_edges_parent_before_child() {
        let (arena, network) = fixture();
        let plan = summarize(&arena, &network, &CostConfig::default(), SummaryContext::default());

        let order: Vec<(&str, &str)> = plan
            .edges
            .iter()
            .map(|e| (e.start.name.as_str(), e.end.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Power Source", "Pole 1"),
                ("Pole 1", "Pole 2"),
                ("Pole 2", "House A"),
                ("Pole 2", "Destination 2"),
            ]
        );
    }

    #[test]
    fn test_totals_and_cost_identity() {
        let (arena, network) = fixture();
        let costs = CostConfig::new(100.0, 1.5, 3.25);
        let plan = summarize(&arena, &network, &costs, SummaryContext::default());

        let edge_sum: f64 = plan.edges.iter().map(|e| e.length_meters).sum();
        assert!(
            (plan.total_low_voltage_meters + plan.total_high_voltage_meters - edge_sum).abs()
                < 1e-9
        );
        assert_eq!(plan.pole_cost_estimate, 200.0);
        assert!(
            (plan.total_cost_estimate
                - (plan.pole_cost_estimate + plan.low_wire_cost_estimate + plan.high_wire_cost_estimate))
                .abs()
                < 1e-9
        );
        assert_eq!(plan.used_costs, costs);
        // 0 -> 3 and 3 -> 5 are ~55.6 m each
        assert!((plan.total_high_voltage_meters - 111.19).abs() < 0.02);
    }

    #[test]
    fn test_debug_block_carries_context() {
        let (arena, network) = fixture();
        let context = SummaryContext {
            source_index: 3,
            source_name: "Main Substation".into(),
            original_points: 3,
            candidates_generated: 3,
            prune_passes: 1,
            warnings: vec!["duplicate source".into()],
        };
        let plan = summarize(&arena, &network, &CostConfig::default(), context);
        assert_eq!(plan.debug.source_index, 3);
        assert_eq!(plan.debug.source_name, "Main Substation");
        assert_eq!(plan.debug.prune_passes, 1);
        assert_eq!(plan.debug.warnings.len(), 1);
    }
}
