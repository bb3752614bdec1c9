//! Geographic points and great-circle distances.
//!
//! Every distance in the planner (span windows, terminal clearance, pole
//! separation, reported lengths) comes from [`haversine_distance`]. Voronoi
//! construction is the one place that treats `(latitude, longitude)` as planar
//! coordinates; see `polegrid_algo::voronoi`.

use crate::error::{PlanError, PlanOutcome};
use crate::units::Meters;
use serde::{Deserialize, Serialize};

/// Earth mean radius used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A validated WGS84 coordinate in decimal degrees.
///
/// Deserialization goes through [`GeoPoint::new`], so a decoded point is
/// range-checked like any other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct UncheckedPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<UncheckedPoint> for GeoPoint {
    type Error = PlanError;

    fn try_from(raw: UncheckedPoint) -> PlanOutcome<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Validate and build a point. Rejects non-finite values and coordinates
    /// outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> PlanOutcome<Self> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(PlanError::InvalidInput(format!(
                "coordinate ({latitude}, {longitude}) is not a finite number"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(PlanError::InvalidInput(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(PlanError::InvalidInput(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Round both coordinates to `decimals` places.
    ///
    /// Rounding stays inside the valid ranges, so the result needs no
    /// revalidation.
    pub fn rounded(&self, decimals: u32) -> Self {
        let scale = 10f64.powi(decimals as i32);
        Self {
            latitude: (self.latitude * scale).round() / scale,
            longitude: (self.longitude * scale).round() / scale,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Haversine great-circle distance with the inner term clamped to `[0, 1]`.
///
/// The clamp keeps `sqrt(1 - a)` defined when rounding pushes `a` just past 1
/// for near-antipodal pairs.
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint) -> Meters {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    Meters(EARTH_RADIUS_M * c)
}

/// Dense symmetric matrix of pairwise great-circle distances.
///
/// Row `i` holds the distances from point `i` to every point, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances. Rows are independent, so the
    /// `parallel` feature fills them on the rayon pool.
    pub fn from_points(points: &[GeoPoint]) -> Self {
        let size = points.len();
        let row = |i: usize| -> Vec<f64> {
            points
                .iter()
                .map(|other| haversine_distance(&points[i], other).value())
                .collect()
        };

        #[cfg(feature = "parallel")]
        let rows: Vec<Vec<f64>> = {
            use rayon::prelude::*;
            (0..size).into_par_iter().map(row).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let rows: Vec<Vec<f64>> = (0..size).map(row).collect();

        Self {
            size,
            values: rows.into_iter().flatten().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance between points `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Meters {
        Meters(self.values[i * self.size + j])
    }
}
