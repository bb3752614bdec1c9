//! End-to-end planning pipeline.
//!
//! ```text
//! request -> validate -> detect source -> candidates -> arena
//!         -> distance matrix -> candidate graph -> arborescence
//!         -> reachability check -> prune -> summarize
//! ```
//!
//! A [`Planner`] holds only configuration and the two swappable algorithm
//! backends; every run builds its own arena and graphs, so one planner can
//! serve concurrent requests.

use crate::arborescence::{ArborescenceSolver, ChuLiuEdmonds};
use crate::candidate_graph::build_candidate_graph;
use crate::candidates::{generate_candidates, CandidateReport};
use crate::exclusion::BuildingFootprints;
use crate::prune::{prune_dead_branches, PruneOutcome};
use crate::source::detect_source;
use crate::summary::{summarize, SummaryContext};
use crate::voronoi::{SpadeVoronoi, VoronoiBackend};
use polegrid_core::graph_utils::{tree_stats, verify_tree};
use polegrid_core::{
    Arborescence, Diagnostics, DistanceMatrix, GeoPoint, NetworkPlan, NodeArena, NodeId,
    NodeRole, PlanError, PlanOutcome, PlanRequest, PlannerConfig, TerminalPoint,
    UnreachedDestination, SOURCE_NAME,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Every intermediate result of one run, for inspection and tests.
#[derive(Debug, Clone)]
pub struct PlanRun {
    pub arena: NodeArena,
    pub candidates: CandidateReport,
    pub candidate_edges: usize,
    pub arborescence: Arborescence,
    pub pruned: PruneOutcome,
    pub plan: NetworkPlan,
}

/// Candidate poles for a request, before any graph is built.
#[derive(Debug, Clone)]
pub struct CandidateRun {
    pub source: TerminalPoint,
    /// Every other point, in input order
    pub destinations: Vec<TerminalPoint>,
    pub report: CandidateReport,
    pub diagnostics: Diagnostics,
}

pub struct Planner {
    config: PlannerConfig,
    footprints: BuildingFootprints,
    voronoi: Box<dyn VoronoiBackend>,
    solver: Box<dyn ArborescenceSolver>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

impl Planner {
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
            footprints: BuildingFootprints::new(),
            voronoi: Box::new(SpadeVoronoi),
            solver: Box::new(ChuLiuEdmonds),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Footprints applied to every request, in addition to any the request
    /// carries itself.
    pub fn with_footprints(mut self, footprints: BuildingFootprints) -> Self {
        self.footprints = footprints;
        self
    }

    pub fn with_voronoi(mut self, backend: impl VoronoiBackend + 'static) -> Self {
        self.voronoi = Box::new(backend);
        self
    }

    pub fn with_solver(mut self, solver: impl ArborescenceSolver + 'static) -> Self {
        self.solver = Box::new(solver);
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self, request: &PlanRequest) -> PlanOutcome<NetworkPlan> {
        self.plan_detailed(request).map(|run| run.plan)
    }

    /// Validate the request, pick the source and generate candidate poles.
    pub fn candidates(&self, request: &PlanRequest) -> PlanOutcome<CandidateRun> {
        self.config.validate()?;
        let terminals = request.validate()?;

        let mut diagnostics = Diagnostics::new();
        let source_pos = detect_source(&terminals, &mut diagnostics);
        let (source, destinations) = split_source(terminals, source_pos);

        let mut footprints = self.footprints.clone();
        footprints.extend(BuildingFootprints::from_rings(&request.buildings)?);

        let positions: Vec<GeoPoint> = std::iter::once(source.position)
            .chain(destinations.iter().map(|d| d.position))
            .collect();
        let report = generate_candidates(
            &positions,
            &self.config.thresholds,
            self.voronoi.as_ref(),
            &footprints,
        )?;

        Ok(CandidateRun {
            source,
            destinations,
            report,
            diagnostics,
        })
    }

    pub fn plan_detailed(&self, request: &PlanRequest) -> PlanOutcome<PlanRun> {
        let CandidateRun {
            source,
            destinations,
            report: candidates,
            diagnostics,
        } = self.candidates(request)?;
        debug!(
            source = source.input_index,
            destinations = destinations.len(),
            candidates = candidates.len(),
            "source selected"
        );

        let destination_inputs: Vec<usize> = destinations.iter().map(|d| d.input_index).collect();
        let arena = NodeArena::new(
            source.position,
            destinations
                .into_iter()
                .map(|d| (d.position, d.name))
                .collect(),
            candidates.candidates.clone(),
        );

        let distances = DistanceMatrix::from_points(&arena.positions());
        let graph = build_candidate_graph(&arena, &distances, &self.config, &request.costs);
        let outcome = self.solver.solve(&graph, arena.source())?;

        if !outcome.is_spanning() {
            let unreached: Vec<UnreachedDestination> = outcome
                .unreached
                .iter()
                .filter(|id| arena.role(**id) == NodeRole::Destination)
                .map(|&id| {
                    let name = arena.get(id).name.clone();
                    // Zero spans in means no pole or source within service range
                    warn!(
                        destination = %name,
                        candidate_spans = graph.incoming(id).count(),
                        "destination unreachable from the source"
                    );
                    UnreachedDestination {
                        input_index: destination_inputs[id.value() - 1],
                        name,
                    }
                })
                .collect();
            if !unreached.is_empty() {
                return Err(PlanError::UnreachableDestination {
                    destinations: unreached,
                });
            }
            debug!(poles = outcome.unreached.len(), "unreachable poles left out");
        }

        let poles: BTreeSet<NodeId> = arena.poles().collect();
        let destination_ids: BTreeSet<NodeId> = arena.destinations().collect();
        let pruned = prune_dead_branches(&outcome.tree, &poles, &destination_ids);
        verify_tree(&pruned.network).map_err(|e| PlanError::Solver(e.to_string()))?;

        let stats = tree_stats(&pruned.network);
        debug!(
            depth = stats.max_depth,
            fanout = stats.max_fanout,
            leaves = stats.leaf_count,
            "pruned network shape"
        );

        let context = SummaryContext {
            source_index: source.input_index,
            source_name: source.name.clone().unwrap_or_else(|| SOURCE_NAME.to_string()),
            original_points: request.points.len(),
            candidates_generated: candidates.len(),
            prune_passes: pruned.passes,
            warnings: diagnostics.messages(),
        };
        let plan = summarize(&arena, &pruned.network, &request.costs, context);
        info!(
            poles = plan.num_poles_used,
            edges = plan.edges.len(),
            low_m = plan.total_low_voltage_meters,
            high_m = plan.total_high_voltage_meters,
            total_cost = plan.total_cost_estimate,
            "network planned"
        );

        Ok(PlanRun {
            arena,
            candidates,
            candidate_edges: graph.edge_count(),
            arborescence: outcome.tree,
            pruned,
            plan,
        })
    }
}

/// Split validated points into the source and the destinations, keeping the
/// destinations in input order.
fn split_source(
    mut terminals: Vec<TerminalPoint>,
    source_pos: usize,
) -> (TerminalPoint, Vec<TerminalPoint>) {
    let source = terminals.remove(source_pos);
    (source, terminals)
}
