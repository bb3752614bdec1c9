//! Planner configuration from TOML.
//!
//! ```toml
//! weighting = "wire-cost"
//!
//! [thresholds]
//! max_pole_to_pole_m = 120.0
//! min_pole_separation_m = 15.0
//! ```

use anyhow::{Context, Result};
use polegrid_algo::Planner;
use polegrid_cli::PlannerArgs;
use polegrid_core::PlannerConfig;
use std::path::Path;
use tracing::debug;

pub fn parse_planner_config(text: &str) -> Result<PlannerConfig> {
    let config: PlannerConfig = toml::from_str(text).context("parsing planner TOML")?;
    config.validate()?;
    Ok(config)
}

pub fn load_planner_config(path: Option<&Path>) -> Result<PlannerConfig> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading planner config {}", path.display()))?;
    let config = parse_planner_config(&contents)
        .with_context(|| format!("loading planner config {}", path.display()))?;
    debug!(?config, "planner config loaded");
    Ok(config)
}

pub fn build_planner(args: &PlannerArgs) -> Result<Planner> {
    let config = load_planner_config(args.config.as_deref())?;
    Ok(Planner::new().with_config(config))
}
