//! Directed candidate graph over arena nodes.
//!
//! Built once per run by `polegrid_algo::candidate_graph` and discarded after
//! the arborescence is solved. Graph node `i` is arena node `i`; the node
//! weight repeats the [`NodeId`] so petgraph traversals can hand it back.

use crate::{NodeId, Span};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, EdgeRef};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default)]
pub struct CandidateGraph {
    pub graph: DiGraph<NodeId, Span>,
}

impl CandidateGraph {
    /// A graph with `count` isolated nodes.
    pub fn with_nodes(count: usize) -> Self {
        let mut graph = DiGraph::with_capacity(count, count * 4);
        for i in 0..count {
            graph.add_node(NodeId::new(i));
        }
        Self { graph }
    }

    /// Insert a span unless it is a self loop or the ordered pair already
    /// has an edge. Returns whether the span was added.
    pub fn add_span(&mut self, span: Span) -> bool {
        if span.from == span.to {
            return false;
        }
        let from = NodeIndex::new(span.from.value());
        let to = NodeIndex::new(span.to.value());
        if self.graph.find_edge(from, to).is_some() {
            return false;
        }
        self.graph.add_edge(from, to, span);
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All spans in insertion order.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.graph.edge_weights()
    }

    pub fn span(&self, from: NodeId, to: NodeId) -> Option<&Span> {
        self.graph
            .find_edge(NodeIndex::new(from.value()), NodeIndex::new(to.value()))
            .map(|e| &self.graph[e])
    }

    /// Spans entering `id`.
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &Span> {
        self.graph
            .edges_directed(NodeIndex::new(id.value()), petgraph::Direction::Incoming)
            .map(|e| e.weight())
    }

    /// Nodes reachable from `root` by directed paths, root included.
    pub fn reachable_from(&self, root: NodeId) -> BTreeSet<NodeId> {
        let mut reached = BTreeSet::new();
        let mut bfs = Bfs::new(&self.graph, NodeIndex::new(root.value()));
        while let Some(node) = bfs.next(&self.graph) {
            reached.insert(self.graph[node]);
        }
        reached
    }
}
