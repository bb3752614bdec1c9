//! Planner configuration: span windows, candidate filters and unit costs.
//!
//! Defaults reproduce the field-tested constants:
//!
//! | Threshold | Default | Used by |
//! |-----------|---------|---------|
//! | `min_span_m` | 0.1 m | every edge window (lower, exclusive) |
//! | `max_pole_to_destination_m` | 100 m | pole -> destination service drops |
//! | `max_pole_to_pole_m` | 150 m | pole <-> pole and source -> pole spans |
//! | `min_dist_to_terminal_m` | 8 m | Voronoi vertex clearance from terminals |
//! | `max_circumradius_m` | 300 m | third-nearest terminal cutoff |
//! | `min_pole_separation_m` | 10 m | greedy candidate thinning |
//! | `dedup_decimals` | 6 | candidate coordinate rounding (~11 cm) |
//!
//! Every field is optional when deserializing, so a TOML file only needs the
//! keys it overrides.

use crate::error::{PlanError, PlanOutcome};
use crate::units::Meters;
use serde::{Deserialize, Serialize};

/// Distance limits for candidate filtering and candidate-graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceThresholds {
    pub min_span_m: f64,
    pub max_pole_to_destination_m: f64,
    pub max_pole_to_pole_m: f64,
    pub min_dist_to_terminal_m: f64,
    pub max_circumradius_m: f64,
    pub min_pole_separation_m: f64,
    pub dedup_decimals: u32,
}

impl Default for DistanceThresholds {
    fn default() -> Self {
        Self {
            min_span_m: 0.1,
            max_pole_to_destination_m: 100.0,
            max_pole_to_pole_m: 150.0,
            min_dist_to_terminal_m: 8.0,
            max_circumradius_m: 300.0,
            min_pole_separation_m: 10.0,
            dedup_decimals: 6,
        }
    }
}

impl DistanceThresholds {
    /// True when `length` lies in the half-open window `(min_span, max]`.
    #[inline]
    pub fn admits(&self, length: Meters, max_m: f64) -> bool {
        length.value() > self.min_span_m && length.value() <= max_m
    }

    pub fn validate(&self) -> PlanOutcome<()> {
        let named = [
            ("min_span_m", self.min_span_m),
            ("max_pole_to_destination_m", self.max_pole_to_destination_m),
            ("max_pole_to_pole_m", self.max_pole_to_pole_m),
            ("min_dist_to_terminal_m", self.min_dist_to_terminal_m),
            ("max_circumradius_m", self.max_circumradius_m),
            ("min_pole_separation_m", self.min_pole_separation_m),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.max_pole_to_destination_m <= self.min_span_m {
            return Err(PlanError::Config(format!(
                "max_pole_to_destination_m ({}) must exceed min_span_m ({})",
                self.max_pole_to_destination_m, self.min_span_m
            )));
        }
        if self.max_pole_to_pole_m <= self.min_span_m {
            return Err(PlanError::Config(format!(
                "max_pole_to_pole_m ({}) must exceed min_span_m ({})",
                self.max_pole_to_pole_m, self.min_span_m
            )));
        }
        if self.dedup_decimals > 12 {
            return Err(PlanError::Config(format!(
                "dedup_decimals must be at most 12, got {}",
                self.dedup_decimals
            )));
        }
        Ok(())
    }
}

/// How candidate-graph edges are weighted for the arborescence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeWeighting {
    /// Weight equals geodesic length (minimizes total wire length)
    #[default]
    Length,
    /// Weight equals length times the per-meter cost of the edge's voltage class
    WireCost,
}

/// Configuration threaded through candidate generation and graph building.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub thresholds: DistanceThresholds,
    pub weighting: EdgeWeighting,
}

impl PlannerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, thresholds: DistanceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_weighting(mut self, weighting: EdgeWeighting) -> Self {
        self.weighting = weighting;
        self
    }

    pub fn validate(&self) -> PlanOutcome<()> {
        self.thresholds.validate()
    }
}

/// Unit costs supplied with each request. Missing keys default to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostConfig {
    pub pole_cost: f64,
    pub low_voltage_cost_per_meter: f64,
    pub high_voltage_cost_per_meter: f64,
}

impl CostConfig {
    pub fn new(pole_cost: f64, low_per_m: f64, high_per_m: f64) -> Self {
        Self {
            pole_cost,
            low_voltage_cost_per_meter: low_per_m,
            high_voltage_cost_per_meter: high_per_m,
        }
    }

    pub fn validate(&self) -> PlanOutcome<()> {
        let named = [
            ("poleCost", self.pole_cost),
            ("lowVoltageCostPerMeter", self.low_voltage_cost_per_meter),
            ("highVoltageCostPerMeter", self.high_voltage_cost_per_meter),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(PlanError::InvalidInput(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
