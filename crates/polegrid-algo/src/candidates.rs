//! Candidate pole generation.
//!
//! Candidates are the Voronoi vertices of the terminal set, filtered so that
//! each one sits between terminals rather than on top of one or far outside
//! the settlement:
//!
//! 1. Voronoi vertices of the terminals (planar `(lat, lng)`)
//! 2. Drop vertices closer than `min_dist_to_terminal_m` to their nearest terminal
//! 3. Drop vertices whose third-nearest terminal is beyond `max_circumradius_m`
//! 4. Drop vertices inside a building footprint
//! 5. Round to `dedup_decimals` and remove duplicates
//! 6. Greedy thinning so no two poles are closer than `min_pole_separation_m`
//!
//! Output order is ascending latitude, then longitude, which also fixes the
//! pole numbering downstream.

use crate::exclusion::BuildingFootprints;
use crate::voronoi::{PlanarPoint, VoronoiBackend};
use polegrid_core::{haversine_distance, DistanceThresholds, GeoPoint, PlanOutcome};
use tracing::debug;

/// Accepted candidates plus how many vertices each filter removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateReport {
    pub candidates: Vec<GeoPoint>,
    pub voronoi_vertices: usize,
    pub near_terminal: usize,
    /// Beyond the circumradius limit, or outside valid coordinate ranges
    pub far_from_terminals: usize,
    pub inside_buildings: usize,
    pub duplicates: usize,
    pub too_dense: usize,
}

impl CandidateReport {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} candidate(s) from {} Voronoi vertices \
             (dropped: {} near terminal, {} far, {} in buildings, {} duplicate, {} too dense)",
            self.candidates.len(),
            self.voronoi_vertices,
            self.near_terminal,
            self.far_from_terminals,
            self.inside_buildings,
            self.duplicates,
            self.too_dense
        )
    }
}

pub fn generate_candidates(
    terminals: &[GeoPoint],
    thresholds: &DistanceThresholds,
    backend: &dyn VoronoiBackend,
    footprints: &BuildingFootprints,
) -> PlanOutcome<CandidateReport> {
    let sites: Vec<PlanarPoint> = terminals
        .iter()
        .map(|t| PlanarPoint::new(t.latitude(), t.longitude()))
        .collect();
    let vertices = backend.vertices(&sites)?;

    let mut report = CandidateReport {
        voronoi_vertices: vertices.len(),
        ..CandidateReport::default()
    };

    let mut kept = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        let Ok(point) = GeoPoint::new(vertex.lat, vertex.lng) else {
            report.far_from_terminals += 1;
            continue;
        };
        let Some([nearest, _, third]) = three_nearest(&point, terminals) else {
            report.far_from_terminals += 1;
            continue;
        };
        if nearest < thresholds.min_dist_to_terminal_m {
            report.near_terminal += 1;
            continue;
        }
        if third > thresholds.max_circumradius_m {
            report.far_from_terminals += 1;
            continue;
        }
        if footprints.contains(&point) {
            report.inside_buildings += 1;
            continue;
        }
        kept.push(point.rounded(thresholds.dedup_decimals));
    }

    kept.sort_by(|a, b| {
        a.latitude()
            .total_cmp(&b.latitude())
            .then(a.longitude().total_cmp(&b.longitude()))
    });
    let before_dedup = kept.len();
    kept.dedup();
    report.duplicates = before_dedup - kept.len();

    let before_thinning = kept.len();
    report.candidates = thin_by_separation(kept, thresholds.min_pole_separation_m);
    report.too_dense = before_thinning - report.candidates.len();

    debug!(
        backend = backend.id(),
        terminals = terminals.len(),
        "{}",
        report.summary()
    );
    Ok(report)
}

/// Distances to the three closest terminals, ascending. `None` with fewer
/// than three terminals.
fn three_nearest(point: &GeoPoint, terminals: &[GeoPoint]) -> Option<[f64; 3]> {
    if terminals.len() < 3 {
        return None;
    }
    let mut best = [f64::INFINITY; 3];
    for terminal in terminals {
        let d = haversine_distance(point, terminal).value();
        if d < best[2] {
            best[2] = d;
            if best[2] < best[1] {
                best.swap(1, 2);
                if best[1] < best[0] {
                    best.swap(0, 1);
                }
            }
        }
    }
    Some(best)
}

/// Accept points in order, skipping any closer than `min_separation_m` to
/// one already accepted.
fn thin_by_separation(points: Vec<GeoPoint>, min_separation_m: f64) -> Vec<GeoPoint> {
    let mut accepted: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for point in points {
        let crowded = accepted
            .iter()
            .any(|other| haversine_distance(&point, other).value() < min_separation_m);
        if !crowded {
            accepted.push(point);
        }
    }
    accepted
}
