//! # polegrid-algo: pole placement and network planning
//!
//! Algorithms that turn a set of terminal points (one power source, many
//! destinations) into a buildable pole-and-wire tree.
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Source detection | [`source`] | index of the source point |
//! | Candidate poles | [`candidates`] (via [`voronoi`]) | filtered Voronoi vertices |
//! | Candidate graph | [`candidate_graph`] | directed spans within distance windows |
//! | Arborescence | [`arborescence`] | minimum-weight tree from the source |
//! | Pruning | [`prune`] | tree without poles that serve nothing |
//! | Summary | [`summary`] | [`polegrid_core::NetworkPlan`] |
//!
//! [`Planner`] runs all stages for one request.
//!
//! ### Swappable algorithms
//!
//! The geometry and graph steps sit behind narrow traits, set on the planner
//! with `with_voronoi` / `with_solver`:
//!
//! - **[`VoronoiBackend`]**: `(points) -> vertices`; default [`SpadeVoronoi`]
//! - **[`ArborescenceSolver`]**: `(graph, root) -> tree`; default [`ChuLiuEdmonds`]
//!
//! ## Example
//!
//! ```no_run
//! use polegrid_algo::Planner;
//! use polegrid_core::{CostConfig, PlanRequest, RawPoint};
//!
//! let request = PlanRequest::new(
//!     vec![
//!         RawPoint::new(0.0, 0.0, Some("Substation")),
//!         RawPoint::new(0.0, 0.001, Some("House")),
//!     ],
//!     CostConfig::new(100.0, 1.0, 2.0),
//! );
//!
//! let plan = Planner::new().plan(&request)?;
//! println!("{}", plan.summary());
//! # Ok::<(), polegrid_core::PlanError>(())
//! ```

pub mod arborescence;
pub mod candidate_graph;
pub mod candidates;
pub mod exclusion;
pub mod planner;
pub mod prune;
pub mod source;
pub mod summary;
pub mod voronoi;

pub use arborescence::{ArborescenceOutcome, ArborescenceSolver, ChuLiuEdmonds};
pub use candidate_graph::build_candidate_graph;
pub use candidates::{generate_candidates, CandidateReport};
pub use exclusion::BuildingFootprints;
pub use planner::{CandidateRun, PlanRun, Planner};
pub use prune::{prune_dead_branches, PruneOutcome};
pub use source::{detect_source, is_source_name, SOURCE_KEYWORDS};
pub use summary::{summarize, SummaryContext};
pub use voronoi::{PlanarPoint, SpadeVoronoi, VoronoiBackend};
