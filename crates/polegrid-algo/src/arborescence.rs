//! Minimum-weight spanning arborescence.
//!
//! [`ChuLiuEdmonds`] restricts the candidate graph to the nodes reachable from
//! the root, then runs the classic contraction algorithm:
//!
//! 1. Every non-root node picks its cheapest incoming edge (first inserted wins
//!    ties).
//! 2. If those choices form no cycle they are the answer.
//! 3. Otherwise each cycle is contracted into a single node. An edge entering
//!    cycle node `v` is reweighted to `w - w(best[v])`, the cost of swapping
//!    it in for `v`'s current choice. Solve the smaller graph recursively.
//! 4. Expand: the edge chosen into a contracted cycle replaces the choice of
//!    the cycle node it enters; every other cycle node keeps its pick.
//!
//! Runs in `O(V * E)`.

use polegrid_core::{Arborescence, CandidateGraph, NodeId, PlanError, PlanOutcome, Span};
use tracing::debug;

/// Solver result: the tree over reachable nodes, plus every graph node that
/// could not be reached from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct ArborescenceOutcome {
    pub tree: Arborescence,
    pub unreached: Vec<NodeId>,
}

impl ArborescenceOutcome {
    pub fn is_spanning(&self) -> bool {
        self.unreached.is_empty()
    }
}

/// Computes a minimum-weight arborescence of a candidate graph.
pub trait ArborescenceSolver: Send + Sync {
    /// Unique identifier (e.g. "chu-liu-edmonds")
    fn id(&self) -> &str;

    fn solve(&self, graph: &CandidateGraph, root: NodeId) -> PlanOutcome<ArborescenceOutcome>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChuLiuEdmonds;

impl ArborescenceSolver for ChuLiuEdmonds {
    fn id(&self) -> &str {
        "chu-liu-edmonds"
    }

    fn solve(&self, graph: &CandidateGraph, root: NodeId) -> PlanOutcome<ArborescenceOutcome> {
        if root.value() >= graph.node_count() {
            return Err(PlanError::Solver(format!(
                "root {root} is not in a graph of {} nodes",
                graph.node_count()
            )));
        }

        let reachable = graph.reachable_from(root);
        let unreached: Vec<NodeId> = (0..graph.node_count())
            .map(NodeId::new)
            .filter(|id| !reachable.contains(id))
            .collect();

        // Compact indices over the reachable set
        let mut local = vec![usize::MAX; graph.node_count()];
        for (i, id) in reachable.iter().enumerate() {
            local[id.value()] = i;
        }

        let spans: Vec<Span> = graph
            .spans()
            .filter(|s| reachable.contains(&s.from) && reachable.contains(&s.to))
            .copied()
            .collect();
        let edges: Vec<WeightedEdge> = spans
            .iter()
            .map(|s| WeightedEdge {
                from: local[s.from.value()],
                to: local[s.to.value()],
                weight: s.weight,
            })
            .collect();

        let chosen = min_arborescence(reachable.len(), local[root.value()], &edges)
            .ok_or_else(|| {
                PlanError::Solver("a reachable node has no incoming edge".to_string())
            })?;

        let mut tree_edges: Vec<Span> = chosen.into_iter().map(|i| spans[i]).collect();
        tree_edges.sort_by_key(|s| (s.to, s.from));
        let tree = Arborescence::from_edges(root, tree_edges);

        debug!(
            solver = self.id(),
            reachable = reachable.len(),
            unreached = unreached.len(),
            weight = tree.total_weight(),
            "arborescence solved"
        );
        Ok(ArborescenceOutcome { tree, unreached })
    }
}

#[derive(Debug, Clone, Copy)]
struct WeightedEdge {
    from: usize,
    to: usize,
    weight: f64,
}

/// Indices into `edges` forming a minimum arborescence of nodes `0..n`
/// rooted at `root`, or `None` if some non-root node has no incoming edge.
fn min_arborescence(n: usize, root: usize, edges: &[WeightedEdge]) -> Option<Vec<usize>> {
    let mut best: Vec<Option<usize>> = vec![None; n];
    for (i, edge) in edges.iter().enumerate() {
        if edge.to == root || edge.from == edge.to {
            continue;
        }
        match best[edge.to] {
            Some(current) if edges[current].weight <= edge.weight => {}
            _ => best[edge.to] = Some(i),
        }
    }

    let mut parent = vec![usize::MAX; n];
    for v in (0..n).filter(|&v| v != root) {
        parent[v] = edges[best[v]?].from;
    }

    // Walk parent pointers from every node; revisiting a node stamped in the
    // same walk closes a cycle.
    let mut cycle_of: Vec<Option<usize>> = vec![None; n];
    let mut stamp = vec![usize::MAX; n];
    let mut cycles = 0;
    for start in 0..n {
        let mut v = start;
        while v != root && stamp[v] != start && cycle_of[v].is_none() {
            stamp[v] = start;
            v = parent[v];
        }
        if v != root && cycle_of[v].is_none() && stamp[v] == start {
            let mut u = v;
            loop {
                cycle_of[u] = Some(cycles);
                u = parent[u];
                if u == v {
                    break;
                }
            }
            cycles += 1;
        }
    }

    if cycles == 0 {
        return Some(
            (0..n)
                .filter(|&v| v != root)
                .filter_map(|v| best[v])
                .collect(),
        );
    }

    // Contract: cycles become nodes 0..cycles, everything else follows
    let mut component = vec![0; n];
    let mut next = cycles;
    for v in 0..n {
        component[v] = match cycle_of[v] {
            Some(c) => c,
            None => {
                next += 1;
                next - 1
            }
        };
    }

    let mut contracted = Vec::with_capacity(edges.len());
    let mut origin = Vec::with_capacity(edges.len());
    for (i, edge) in edges.iter().enumerate() {
        let (from, to) = (component[edge.from], component[edge.to]);
        if from == to || edge.to == root {
            continue;
        }
        let weight = match (cycle_of[edge.to], best[edge.to]) {
            (Some(_), Some(b)) => edge.weight - edges[b].weight,
            _ => edge.weight,
        };
        contracted.push(WeightedEdge { from, to, weight });
        origin.push(i);
    }

    let inner = min_arborescence(next, component[root], &contracted)?;

    let mut entered = vec![false; n];
    let mut chosen = Vec::with_capacity(n.saturating_sub(1));
    for i in inner {
        let original = origin[i];
        entered[edges[original].to] = true;
        chosen.push(original);
    }
    for v in 0..n {
        if cycle_of[v].is_some() && !entered[v] {
            chosen.extend(best[v]);
        }
    }
    Some(chosen)
}
