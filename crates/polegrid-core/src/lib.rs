//! # polegrid-core: distribution network data model
//!
//! Shared types for planning a pole-and-wire distribution tree from a power
//! source to a set of destination points.
//!
//! ## Design
//!
//! Nodes live in a [`NodeArena`] and are addressed by [`NodeId`] (an index
//! into the arena). The layout is fixed per run:
//!
//! ```text
//! index 0          source
//! 1 ..= D          destinations, in input order
//! D+1 ..           candidate poles, in generator order
//! ```
//!
//! so a node's role follows from its index range. Edges are [`Span`] values
//! held in plain lists (arborescence, pruned tree) or in a petgraph `DiGraph`
//! (the [`CandidateGraph`]). Pruning builds a new
//! [`Arborescence`] instead of editing one in place, so before/after states
//! can be compared directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use polegrid_core::*;
//!
//! let source = GeoPoint::new(0.0, 0.0).unwrap();
//! let house = GeoPoint::new(0.0, 0.0005).unwrap();
//! let pole = GeoPoint::new(0.0, 0.00025).unwrap();
//!
//! let arena = NodeArena::new(
//!     source,
//!     vec![(house, Some("House".to_string()))],
//!     vec![pole],
//! );
//!
//! assert_eq!(arena.role(NodeId::new(0)), NodeRole::Source);
//! assert_eq!(arena.role(NodeId::new(1)), NodeRole::Destination);
//! assert_eq!(arena.role(NodeId::new(2)), NodeRole::Pole);
//! assert_eq!(arena.get(NodeId::new(1)).name, "House");
//! ```
//!
//! ## Modules
//!
//! - [`geo`] - validated coordinates and haversine distances
//! - [`config`] - span windows, candidate filters, unit costs
//! - [`request`] - strongly typed planning request
//! - [`report`] - serializable plan result
//! - [`network`] - directed candidate graph (petgraph)
//! - [`tree`] - rooted tree structure shared by solver and pruner
//! - [`graph_utils`] - tree checks, statistics and Graphviz export

use serde::{Deserialize, Serialize};
use std::ops::Range;

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geo;
pub mod graph_utils;
pub mod network;
pub mod report;
pub mod request;
pub mod tree;
pub mod units;

pub use config::{CostConfig, DistanceThresholds, EdgeWeighting, PlannerConfig};
pub use diagnostics::{DiagnosticIssue, Diagnostics, IssueLocation};
pub use error::{PlanError, PlanOutcome, UnreachedDestination};
pub use geo::{haversine_distance, DistanceMatrix, GeoPoint};
pub use network::CandidateGraph;
pub use report::{DebugInfo, EdgeReport, Endpoint, NetworkPlan, NodeReport};
pub use request::{PlanRequest, RawPoint, TerminalPoint};
pub use tree::{Arborescence, PrunedNetwork};
pub use units::{Dollars, Meters};

/// Canonical display name of the source node.
pub const SOURCE_NAME: &str = "Power Source";

/// Index of a node in the [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn new(value: usize) -> Self {
        NodeId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// What a node is in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// The single electrical origin
    Source,
    /// A building or load to be connected
    Destination,
    /// A generated intermediate support point
    Pole,
}

/// Structural voltage label of a span.
///
/// Service drops into buildings are `Low`; distribution spans between poles
/// and out of the source are `High`. Load is not considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoltageClass {
    Low,
    High,
}

/// A node of the network. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub role: NodeRole,
    pub position: GeoPoint,
    /// Input name for terminals, provisional `Candidate k` for poles
    pub name: String,
}

/// A directed span from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub from: NodeId,
    pub to: NodeId,
    pub length: Meters,
    pub voltage: VoltageClass,
    /// Optimization weight; equals `length` under [`EdgeWeighting::Length`]
    pub weight: f64,
}

impl Span {
    /// Span weighted by its own length.
    pub fn new(from: NodeId, to: NodeId, length: Meters, voltage: VoltageClass) -> Self {
        Self {
            from,
            to,
            length,
            voltage,
            weight: length.value(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// Owner of every node in a run, laid out source, destinations, poles.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeArena {
    nodes: Vec<Node>,
    destination_count: usize,
}

impl NodeArena {
    /// Build the arena. Unnamed destinations get `Destination k`
    /// placeholders (k counts destinations from 1); poles get `Candidate k`.
    pub fn new(
        source: GeoPoint,
        destinations: Vec<(GeoPoint, Option<String>)>,
        poles: Vec<GeoPoint>,
    ) -> Self {
        let destination_count = destinations.len();
        let mut nodes = Vec::with_capacity(1 + destination_count + poles.len());
        nodes.push(Node {
            id: NodeId(0),
            role: NodeRole::Source,
            position: source,
            name: SOURCE_NAME.to_string(),
        });
        for (k, (position, name)) in destinations.into_iter().enumerate() {
            let name = name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("Destination {}", k + 1));
            nodes.push(Node {
                id: NodeId(nodes.len()),
                role: NodeRole::Destination,
                position,
                name,
            });
        }
        for (k, position) in poles.into_iter().enumerate() {
            nodes.push(Node {
                id: NodeId(nodes.len()),
                role: NodeRole::Pole,
                position,
                name: format!("Candidate {}", k + 1),
            });
        }
        Self {
            nodes,
            destination_count,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn source(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn destination_range(&self) -> Range<usize> {
        1..1 + self.destination_count
    }

    pub fn pole_range(&self) -> Range<usize> {
        1 + self.destination_count..self.nodes.len()
    }

    pub fn destinations(&self) -> impl Iterator<Item = NodeId> {
        self.destination_range().map(NodeId)
    }

    pub fn poles(&self) -> impl Iterator<Item = NodeId> {
        self.pole_range().map(NodeId)
    }

    pub fn pole_count(&self) -> usize {
        self.pole_range().len()
    }

    /// Role derived from the index range.
    pub fn role(&self, id: NodeId) -> NodeRole {
        if id.0 == 0 {
            NodeRole::Source
        } else if self.destination_range().contains(&id.0) {
            NodeRole::Destination
        } else {
            NodeRole::Pole
        }
    }

    pub fn positions(&self) -> Vec<GeoPoint> {
        self.nodes.iter().map(|n| n.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn test_arena_layout() {
        let arena = NodeArena::new(
            pt(0.0, 0.0),
            vec![(pt(0.0, 0.001), None), (pt(0.001, 0.0), Some("Clinic".into()))],
            vec![pt(0.0005, 0.0005)],
        );

        assert_eq!(arena.len(), 4);
        assert_eq!(arena.destination_range(), 1..3);
        assert_eq!(arena.pole_range(), 3..4);
        assert_eq!(arena.get(arena.source()).name, SOURCE_NAME);
        assert_eq!(arena.get(NodeId::new(1)).name, "Destination 1");
        assert_eq!(arena.get(NodeId::new(2)).name, "Clinic");
        assert_eq!(arena.get(NodeId::new(3)).name, "Candidate 1");
        assert_eq!(arena.role(NodeId::new(3)), NodeRole::Pole);
        assert_eq!(arena.pole_count(), 1);
    }

    #[test]
    fn test_blank_destination_name_gets_placeholder() {
        let arena = NodeArena::new(pt(0.0, 0.0), vec![(pt(0.0, 0.001), Some("  ".into()))], vec![]);
        assert_eq!(arena.get(NodeId::new(1)).name, "Destination 1");
        assert_eq!(arena.pole_count(), 0);
    }

    #[test]
    fn test_span_weight_defaults_to_length() {
        let span = Span::new(NodeId::new(0), NodeId::new(1), Meters(12.5), VoltageClass::High);
        assert_eq!(span.weight, 12.5);
        assert_eq!(span.with_weight(3.0).weight, 3.0);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&NodeRole::Destination).unwrap(), "\"destination\"");
        assert_eq!(serde_json::to_string(&VoltageClass::High).unwrap(), "\"high\"");
    }
}
