//! `plan` and `plan-csv`: run the full pipeline and write the plan as JSON.

use anyhow::{Context, Result};
use polegrid_cli::PlannerArgs;
use polegrid_core::{NetworkPlan, PlanRequest};
use polegrid_io::{parse_costs, read_points_csv, read_request, write_json};
use std::path::Path;
use tracing::info;

use crate::commands::config::build_planner;

pub fn handle_plan(request: &Path, planner: &PlannerArgs, out: Option<&Path>) -> Result<()> {
    let request = read_request(request)
        .with_context(|| format!("loading request {}", request.display()))?;
    let plan = run(&request, planner)?;
    write_plan(&plan, out)
}

pub fn handle_plan_csv(
    points: &Path,
    costs: &str,
    planner: &PlannerArgs,
    out: Option<&Path>,
) -> Result<()> {
    let import = read_points_csv(points)
        .with_context(|| format!("reading points {}", points.display()))?;
    let costs = parse_costs(costs).context("parsing --costs")?;
    info!(
        points = import.points.len(),
        skipped = import.diagnostics.warning_count(),
        "CSV points loaded"
    );

    let request = PlanRequest::new(import.points, costs);
    let mut plan = run(&request, planner)?;

    // Skipped rows happened first, so they lead the warning list
    let mut warnings = import.diagnostics.messages();
    warnings.append(&mut plan.debug.warnings);
    plan.debug.warnings = warnings;

    write_plan(&plan, out)
}

pub fn run(request: &PlanRequest, planner: &PlannerArgs) -> Result<NetworkPlan> {
    let planner = build_planner(planner)?;
    let plan = planner.plan(request).context("planning network")?;
    for line in plan.summary().lines() {
        info!("{line}");
    }
    Ok(plan)
}

fn write_plan(plan: &NetworkPlan, out: Option<&Path>) -> Result<()> {
    write_json(plan, out).context("writing plan")?;
    if let Some(path) = out {
        info!("plan written to {}", path.display());
    }
    Ok(())
}
