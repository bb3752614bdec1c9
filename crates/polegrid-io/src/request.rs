//! JSON planning requests and inline cost objects.

use crate::error::{IoError, IoResult};
use polegrid_core::{CostConfig, PlanRequest};
use std::path::Path;

/// Load a [`PlanRequest`] from a JSON file.
///
/// Only the shape is checked here; coordinates and costs are validated when
/// the request is planned.
pub fn read_request(path: &Path) -> IoResult<PlanRequest> {
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| IoError::Json {
        context: path.display().to_string(),
        source,
    })
}

pub fn parse_request(text: &str) -> IoResult<PlanRequest> {
    serde_json::from_str(text).map_err(|source| IoError::Json {
        context: "request".to_string(),
        source,
    })
}

/// Parse an inline cost object such as `{"poleCost": 100}`. Missing keys
/// are zero.
pub fn parse_costs(text: &str) -> IoResult<CostConfig> {
    serde_json::from_str(text).map_err(|source| IoError::Json {
        context: "costs".to_string(),
        source,
    })
}
