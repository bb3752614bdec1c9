//! Serializable plan result handed back to callers.
//!
//! Field names follow the camelCase wire format; every length and cost is
//! already rounded to two decimals when a [`NetworkPlan`] is built.

use crate::config::CostConfig;
use crate::{NodeRole, VoltageClass};
use serde::{Deserialize, Serialize};

/// One end of a reported edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeReport {
    pub start: Endpoint,
    pub end: Endpoint,
    pub length_meters: f64,
    pub voltage: VoltageClass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReport {
    pub index: usize,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(rename = "type")]
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    /// Position of the source in the caller's point list
    pub source_index: usize,
    pub source_name: String,
    pub original_points: usize,
    pub candidates_generated: usize,
    pub candidates_used: usize,
    pub prune_passes: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkPlan {
    pub edges: Vec<EdgeReport>,
    pub nodes: Vec<NodeReport>,
    pub total_low_voltage_meters: f64,
    pub total_high_voltage_meters: f64,
    pub num_poles_used: usize,
    pub pole_cost_estimate: f64,
    pub low_wire_cost_estimate: f64,
    pub high_wire_cost_estimate: f64,
    pub total_wire_cost_estimate: f64,
    pub total_cost_estimate: f64,
    pub used_costs: CostConfig,
    pub debug: DebugInfo,
}

impl NetworkPlan {
    pub fn nodes_with_role(&self, role: NodeRole) -> impl Iterator<Item = &NodeReport> {
        self.nodes.iter().filter(move |n| n.role == role)
    }

    pub fn edges_with_voltage(&self, voltage: VoltageClass) -> impl Iterator<Item = &EdgeReport> {
        self.edges.iter().filter(move |e| e.voltage == voltage)
    }

    /// Human-readable summary for terminal output.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Network Plan Summary\n{}\n", "=".repeat(40)));
        s.push_str(&format!(
            "Source: {} (point #{})\n",
            self.debug.source_name, self.debug.source_index
        ));
        s.push_str(&format!(
            "Destinations: {}\n",
            self.nodes_with_role(NodeRole::Destination).count()
        ));
        s.push_str(&format!(
            "Poles: {} used of {} candidates\n",
            self.num_poles_used, self.debug.candidates_generated
        ));
        s.push_str(&format!(
            "Wire: {:.2} m low voltage, {:.2} m high voltage\n",
            self.total_low_voltage_meters, self.total_high_voltage_meters
        ));
        s.push_str(&format!("Total Cost: ${:.2}\n", self.total_cost_estimate));
        s.push_str(&format!("  Poles: ${:.2}\n", self.pole_cost_estimate));
        s.push_str(&format!("  Wire: ${:.2}\n", self.total_wire_cost_estimate));
        for warning in &self.debug.warnings {
            s.push_str(&format!("Warning: {warning}\n"));
        }
        s
    }
}
