use anyhow::{Context, Result};
use polegrid_cli::PlannerArgs;
use polegrid_core::graph_utils::export_plan;
use polegrid_io::{read_request, write_text};
use std::path::Path;

use crate::commands::plan::run;

pub fn handle(
    request: &Path,
    planner: &PlannerArgs,
    format: &str,
    out: Option<&Path>,
) -> Result<()> {
    let request = read_request(request)
        .with_context(|| format!("loading request {}", request.display()))?;
    let plan = run(&request, planner)?;
    let graph = export_plan(&plan, format)?;
    write_text(&graph, out).context("writing graph export")?;
    Ok(())
}
