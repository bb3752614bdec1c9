//! Error types shared by the planner crates.
//!
//! [`PlanError`] covers everything that can fail a single planning request
//! once it is in memory. File, CSV and JSON failures belong to
//! `polegrid_io::IoError`; the CLI wraps both in `anyhow`.

use serde::Serialize;
use thiserror::Error;

/// A destination that has no path from the source under the configured
/// span windows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreachedDestination {
    /// Position of the point in the caller's input list
    pub input_index: usize,
    pub name: String,
}

impl std::fmt::Display for UnreachedDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (point #{})", self.name, self.input_index)
    }
}

/// Failure of a planning request.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Rejected at the boundary before any geometry ran
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Some destinations cannot be served
    #[error("Unreachable destination(s): {}", format_unreached(.destinations))]
    UnreachableDestination {
        destinations: Vec<UnreachedDestination>,
    },

    /// Triangulation or other geometric failure
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Internal solver fault (should not happen for validated input)
    #[error("Solver error: {0}")]
    Solver(String),

    /// Invalid planner configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias for results carrying a [`PlanError`].
pub type PlanOutcome<T> = Result<T, PlanError>;

fn format_unreached(destinations: &[UnreachedDestination]) -> String {
    destinations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
