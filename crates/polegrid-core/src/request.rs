//! Planning request as received at the boundary.
//!
//! The wire format is camelCase JSON:
//!
//! ```json
//! {
//!   "points": [{"lat": 0.0, "lng": 0.0, "name": "Power Source"},
//!              {"latitude": 0.0, "longitude": 0.001}],
//!   "costs": {"poleCost": 100, "lowVoltageCostPerMeter": 1, "highVoltageCostPerMeter": 2}
//! }
//! ```
//!
//! [`PlanRequest::validate`] turns it into [`TerminalPoint`]s or rejects the
//! whole request; nothing downstream sees an unchecked coordinate.

use crate::config::CostConfig;
use crate::error::{PlanError, PlanOutcome};
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A point exactly as supplied; coordinates may be missing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawPoint {
    #[serde(alias = "latitude", default)]
    pub lat: Option<f64>,
    #[serde(alias = "longitude", default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RawPoint {
    pub fn new(lat: f64, lng: f64, name: Option<&str>) -> Self {
        Self {
            lat: Some(lat),
            lng: Some(lng),
            name: name.map(str::to_string),
        }
    }
}

/// A validated input point with its position in the request.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalPoint {
    pub input_index: usize,
    pub position: GeoPoint,
    pub name: Option<String>,
}

/// Optional building outline given as `[lat, lng]` vertices.
pub type FootprintRing = Vec<[f64; 2]>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub points: Vec<RawPoint>,
    #[serde(default)]
    pub costs: CostConfig,
    /// Footprints that candidate poles must stay out of
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buildings: Vec<FootprintRing>,
}

impl PlanRequest {
    pub fn new(points: Vec<RawPoint>, costs: CostConfig) -> Self {
        Self {
            points,
            costs,
            buildings: Vec::new(),
        }
    }

    /// Check point count, every coordinate and the costs.
    pub fn validate(&self) -> PlanOutcome<Vec<TerminalPoint>> {
        if self.points.len() < 2 {
            return Err(PlanError::InvalidInput(format!(
                "need at least 2 points, got {}",
                self.points.len()
            )));
        }
        self.costs.validate()?;

        self.points
            .iter()
            .enumerate()
            .map(|(input_index, raw)| {
                let (lat, lng) = match (raw.lat, raw.lng) {
                    (Some(lat), Some(lng)) => (lat, lng),
                    _ => {
                        return Err(PlanError::InvalidInput(format!(
                            "point #{input_index} is missing lat or lng"
                        )))
                    }
                };
                let position = GeoPoint::new(lat, lng).map_err(|err| match err {
                    PlanError::InvalidInput(msg) => {
                        PlanError::InvalidInput(format!("point #{input_index}: {msg}"))
                    }
                    other => other,
                })?;
                Ok(TerminalPoint {
                    input_index,
                    position,
                    name: raw.name.clone(),
                })
            })
            .collect()
    }
}
