//! Tree checks, shape statistics and Graphviz export of planned networks.

use crate::report::NetworkPlan;
use crate::tree::Arborescence;
use crate::units::Meters;
use crate::{NodeId, NodeRole, VoltageClass};
use anyhow::{anyhow, bail, Result};
use std::collections::{BTreeMap, VecDeque};

/// Shape statistics of a planned tree, logged at debug level by the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub leaf_count: usize,
    pub max_depth: usize,
    pub max_fanout: usize,
    pub total_length: Meters,
}

/// Depth, fan-out and size of a rooted tree.
pub fn tree_stats(tree: &Arborescence) -> TreeStats {
    let mut fanout: BTreeMap<NodeId, usize> = BTreeMap::new();
    for edge in tree.edges() {
        *fanout.entry(edge.from).or_default() += 1;
    }

    let mut max_depth = 0;
    let mut queue = VecDeque::from([(tree.root(), 0usize)]);
    let mut seen = 0;
    while let Some((node, depth)) = queue.pop_front() {
        seen += 1;
        if seen > tree.node_count() {
            break;
        }
        max_depth = max_depth.max(depth);
        for child in tree.children(node) {
            queue.push_back((child, depth + 1));
        }
    }

    TreeStats {
        node_count: tree.node_count(),
        edge_count: tree.edge_count(),
        leaf_count: tree.leaves().len(),
        max_depth,
        max_fanout: fanout.values().copied().max().unwrap_or(0),
        total_length: tree.total_length(),
    }
}

/// Check the arborescence invariants: the root has no parent, every other
/// member has exactly one, and every member is reachable from the root.
pub fn verify_tree(tree: &Arborescence) -> Result<()> {
    let mut in_degree: BTreeMap<NodeId, usize> = BTreeMap::new();
    for edge in tree.edges() {
        if !tree.contains(edge.from) || !tree.contains(edge.to) {
            bail!("edge {} -> {} touches a non-member", edge.from, edge.to);
        }
        *in_degree.entry(edge.to).or_default() += 1;
    }

    for &member in tree.members() {
        let degree = in_degree.get(&member).copied().unwrap_or(0);
        if member == tree.root() {
            if degree != 0 {
                bail!("root {member} has {degree} incoming edge(s)");
            }
        } else if degree != 1 {
            bail!("node {member} has {degree} incoming edges, expected 1");
        }
    }

    let reached = tree.descendants(tree.root()).len() + 1;
    if reached != tree.node_count() {
        return Err(anyhow!(
            "only {reached} of {} nodes are reachable from the root (cycle present)",
            tree.node_count()
        ));
    }
    Ok(())
}

/// Export a plan to a DOT string (Graphviz) so external tools can draw it.
pub fn export_plan(plan: &NetworkPlan, format: &str) -> Result<String> {
    match format.to_ascii_lowercase().as_str() {
        "graphviz" | "dot" => Ok(render_dot(plan)),
        other => Err(anyhow!("unsupported graph export format '{other}'")),
    }
}

fn render_dot(plan: &NetworkPlan) -> String {
    let mut buffer = String::new();
    buffer.push_str("digraph polegrid_network {\n");
    let mut ids: BTreeMap<String, usize> = BTreeMap::new();
    for node in &plan.nodes {
        ids.insert(endpoint_key(&node.name, node.lat, node.lng), node.index);
        let shape = match node.role {
            NodeRole::Source => "doublecircle",
            NodeRole::Destination => "box",
            NodeRole::Pole => "point",
        };
        buffer.push_str(&format!(
            "  n{} [label=\"{}\", shape={}, pos=\"{},{}!\"];\n",
            node.index,
            sanitize_label(&node.name),
            shape,
            node.lng,
            node.lat
        ));
    }
    for edge in &plan.edges {
        let (Some(from), Some(to)) = (
            ids.get(&endpoint_key(&edge.start.name, edge.start.lat, edge.start.lng)),
            ids.get(&endpoint_key(&edge.end.name, edge.end.lat, edge.end.lng)),
        ) else {
            continue;
        };
        let style = match edge.voltage {
            VoltageClass::High => "bold",
            VoltageClass::Low => "dashed",
        };
        buffer.push_str(&format!(
            "  n{from} -> n{to} [label=\"{:.2} m\", style={style}];\n",
            edge.length_meters
        ));
    }
    buffer.push('}');
    buffer
}

// Names alone may repeat across destinations.
fn endpoint_key(name: &str, lat: f64, lng: f64) -> String {
    format!("{name}|{lat}|{lng}")
}

fn sanitize_label(label: &str) -> String {
    label.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    fn span(from: usize, to: usize) -> Span {
        Span::new(NodeId::new(from), NodeId::new(to), Meters(1.0), VoltageClass::High)
    }

    #[test]
    fn test_verify_accepts_tree() {
        let tree = Arborescence::from_edges(NodeId::new(0), vec![span(0, 1), span(1, 2), span(1, 3)]);
        assert!(verify_tree(&tree).is_ok());
        let stats = tree_stats(&tree);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.max_fanout, 2);
        assert_eq!(stats.leaf_count, 2);
    }

    #[test]
    fn test_verify_rejects_two_parents() {
        let tree = Arborescence::from_edges(NodeId::new(0), vec![span(0, 1), span(0, 2), span(1, 2)]);
        assert!(verify_tree(&tree).is_err());
    }

    #[test]
    fn test_verify_rejects_detached_cycle() {
        let tree = Arborescence::from_edges(NodeId::new(0), vec![span(0, 1), span(2, 3), span(3, 2)]);
        assert!(verify_tree(&tree).is_err());
    }

    #[test]
    fn test_unknown_export_format() {
        let plan: NetworkPlan = serde_json::from_value(serde_json::json!({
            "edges": [], "nodes": [],
            "totalLowVoltageMeters": 0.0, "totalHighVoltageMeters": 0.0,
            "numPolesUsed": 0, "poleCostEstimate": 0.0, "lowWireCostEstimate": 0.0,
            "highWireCostEstimate": 0.0, "totalWireCostEstimate": 0.0,
            "totalCostEstimate": 0.0, "usedCosts": {}, "debug": {
                "sourceIndex": 0, "sourceName": "Power Source", "originalPoints": 0,
                "candidatesGenerated": 0, "candidatesUsed": 0, "prunePasses": 0
            }
        }))
        .unwrap();
        assert!(export_plan(&plan, "svg").is_err());
        assert_eq!(
            export_plan(&plan, "dot").unwrap(),
            "digraph polegrid_network {\n}"
        );
    }
}
