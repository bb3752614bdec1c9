//! Dead-branch removal.
//!
//! A pole leaf serves no destination, so it can go. Removing it may turn its
//! parent into a pole leaf, so passes repeat until one removes nothing. The
//! source and destinations are never removed.

use polegrid_core::{Arborescence, NodeId, PrunedNetwork};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct PruneOutcome {
    pub network: PrunedNetwork,
    /// Passes that removed at least one pole
    pub passes: usize,
    /// Removed poles in removal order
    pub removed: Vec<NodeId>,
}

/// Prune `tree` down to the poles that lead to a destination. Returns a new
/// value; `tree` is left untouched.
pub fn prune_dead_branches(
    tree: &Arborescence,
    poles: &BTreeSet<NodeId>,
    destinations: &BTreeSet<NodeId>,
) -> PruneOutcome {
    let mut network = tree.clone();
    let mut passes = 0;
    let mut removed = Vec::new();

    loop {
        let dead: BTreeSet<NodeId> = network
            .leaves()
            .into_iter()
            // A leaf's subtree is itself
            .filter(|id| poles.contains(id) && !destinations.contains(id))
            .filter(|id| *id != network.root())
            .collect();
        if dead.is_empty() {
            break;
        }
        passes += 1;
        removed.extend(dead.iter().copied());
        network = network.without(&dead);
    }

    debug!(
        passes,
        removed = removed.len(),
        remaining = network.node_count(),
        "pruned dead branches"
    );
    PruneOutcome {
        network,
        passes,
        removed,
    }
}

/// True when every pole in `network` has a destination below it.
pub fn all_poles_serve_destinations(
    network: &PrunedNetwork,
    poles: &BTreeSet<NodeId>,
    destinations: &BTreeSet<NodeId>,
) -> bool {
    network
        .members()
        .iter()
        .filter(|id| poles.contains(id))
        .all(|&pole| {
            network
                .descendants(pole)
                .iter()
                .any(|d| destinations.contains(d))
        })
}
