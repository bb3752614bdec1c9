//! Rooted directed tree over arena node ids.
//!
//! Produced by the arborescence solver and consumed by the pruner and the
//! summarizer. The value is immutable from the outside: derived trees are
//! built with [`Arborescence::without`].

use crate::units::Meters;
use crate::{NodeId, Span};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

#[derive(Debug, Clone, PartialEq)]
pub struct Arborescence {
    root: NodeId,
    members: BTreeSet<NodeId>,
    edges: Vec<Span>,
}

/// The arborescence after dead branches have been removed.
pub type PrunedNetwork = Arborescence;

impl Arborescence {
    /// Tree spanned by `edges`; members are the root plus every endpoint.
    pub fn from_edges(root: NodeId, edges: Vec<Span>) -> Self {
        let mut members = BTreeSet::from([root]);
        for edge in &edges {
            members.insert(edge.from);
            members.insert(edge.to);
        }
        Self {
            root,
            members,
            edges,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn members(&self) -> &BTreeSet<NodeId> {
        &self.members
    }

    pub fn edges(&self) -> &[Span] {
        &self.edges
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    pub fn node_count(&self) -> usize {
        self.members.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The edge entering `id`, if any.
    pub fn incoming(&self, id: NodeId) -> Option<&Span> {
        self.edges.iter().find(|e| e.to == id)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().filter(move |e| e.from == id).map(|e| e.to)
    }

    /// Members with no outgoing edge, in ascending id order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let parents: BTreeSet<NodeId> = self.edges.iter().map(|e| e.from).collect();
        self.members
            .iter()
            .copied()
            .filter(|id| !parents.contains(id))
            .collect()
    }

    /// Every node below `id` (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> BTreeSet<NodeId> {
        let adjacency = self.adjacency();
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([id]);
        while let Some(node) = queue.pop_front() {
            if let Some(children) = adjacency.get(&node) {
                for &child in children {
                    if seen.insert(child) {
                        queue.push_back(child);
                    }
                }
            }
        }
        seen
    }

    /// A new tree without `removed` nodes and every edge touching them.
    pub fn without(&self, removed: &BTreeSet<NodeId>) -> Self {
        Self {
            root: self.root,
            members: self.members.difference(removed).copied().collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| !removed.contains(&e.from) && !removed.contains(&e.to))
                .copied()
                .collect(),
        }
    }

    pub fn total_length(&self) -> Meters {
        self.edges.iter().map(|e| e.length).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Edges in breadth-first order from the root, children by ascending id,
    /// so every parent edge precedes its children's.
    pub fn breadth_first_edges(&self) -> Vec<Span> {
        let mut by_parent: BTreeMap<NodeId, Vec<&Span>> = BTreeMap::new();
        for edge in &self.edges {
            by_parent.entry(edge.from).or_default().push(edge);
        }
        for children in by_parent.values_mut() {
            children.sort_by_key(|e| e.to);
        }

        let mut ordered = Vec::with_capacity(self.edges.len());
        let mut queue = VecDeque::from([self.root]);
        let mut visited = BTreeSet::from([self.root]);
        while let Some(node) = queue.pop_front() {
            if let Some(children) = by_parent.get(&node) {
                for edge in children {
                    if visited.insert(edge.to) {
                        ordered.push(**edge);
                        queue.push_back(edge.to);
                    }
                }
            }
        }
        ordered
    }

    fn adjacency(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for edge in &self.edges {
            adjacency.entry(edge.from).or_default().push(edge.to);
        }
        adjacency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VoltageClass;

    fn span(from: usize, to: usize, len: f64) -> Span {
        Span::new(NodeId::new(from), NodeId::new(to), Meters(len), VoltageClass::High)
    }

    fn sample() -> Arborescence {
        // 0 -> 3 -> 1, 3 -> 4 -> 2, 0 -> 5
        Arborescence::from_edges(
            NodeId::new(0),
            vec![
                span(3, 1, 10.0),
                span(0, 3, 20.0),
                span(4, 2, 5.0),
                span(3, 4, 7.5),
                span(0, 5, 1.0),
            ],
        )
    }

    #[test]
    fn test_membership_and_leaves() {
        let tree = sample();
        assert_eq!(tree.node_count(), 6);
        assert_eq!(
            tree.leaves(),
            vec![NodeId::new(1), NodeId::new(2), NodeId::new(5)]
        );
        assert_eq!(tree.incoming(NodeId::new(4)).unwrap().from, NodeId::new(3));
        assert!(tree.incoming(NodeId::new(0)).is_none());
    }

    #[test]
    fn test_descendants() {
        let tree = sample();
        let below: Vec<usize> = tree
            .descendants(NodeId::new(3))
            .into_iter()
            .map(|n| n.value())
            .collect();
        assert_eq!(below, vec![1, 2, 4]);
        assert!(tree.descendants(NodeId::new(2)).is_empty());
    }

    #[test]
    fn test_without_builds_new_tree() {
        let tree = sample();
        let trimmed = tree.without(&BTreeSet::from([NodeId::new(5)]));
        assert_eq!(trimmed.node_count(), 5);
        assert_eq!(trimmed.edge_count(), 4);
        // original untouched
        assert_eq!(tree.edge_count(), 5);
    }

    #[test]
    fn test_breadth_first_parent_before_child() {
        let ordered = sample().breadth_first_edges();
        let pairs: Vec<(usize, usize)> = ordered
            .iter()
            .map(|e| (e.from.value(), e.to.value()))
            .collect();
        assert_eq!(pairs, vec![(0, 3), (0, 5), (3, 1), (3, 4), (4, 2)]);
    }

    #[test]
    fn test_totals() {
        let tree = sample();
        assert_eq!(tree.total_length(), Meters(43.5));
        assert_eq!(tree.total_weight(), 43.5);
    }
}
