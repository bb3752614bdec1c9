//! `candidates`: show where poles could go without solving the network.

use anyhow::{Context, Result};
use polegrid_algo::CandidateReport;
use polegrid_cli::PlannerArgs;
use polegrid_core::{GeoPoint, TerminalPoint, SOURCE_NAME};
use polegrid_io::{read_request, write_json};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::commands::config::build_planner;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CandidatesOutput {
    source: SourceOutput,
    destinations: usize,
    voronoi_vertices: usize,
    candidates: Vec<PointOutput>,
    dropped: DroppedOutput,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SourceOutput {
    index: usize,
    name: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Serialize)]
struct PointOutput {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DroppedOutput {
    near_terminal: usize,
    far_from_terminals: usize,
    inside_buildings: usize,
    duplicates: usize,
    too_dense: usize,
}

impl From<&GeoPoint> for PointOutput {
    fn from(point: &GeoPoint) -> Self {
        Self {
            lat: point.latitude(),
            lng: point.longitude(),
        }
    }
}

impl From<&TerminalPoint> for SourceOutput {
    fn from(source: &TerminalPoint) -> Self {
        Self {
            index: source.input_index,
            name: source
                .name
                .clone()
                .unwrap_or_else(|| SOURCE_NAME.to_string()),
            lat: source.position.latitude(),
            lng: source.position.longitude(),
        }
    }
}

impl From<&CandidateReport> for DroppedOutput {
    fn from(report: &CandidateReport) -> Self {
        Self {
            near_terminal: report.near_terminal,
            far_from_terminals: report.far_from_terminals,
            inside_buildings: report.inside_buildings,
            duplicates: report.duplicates,
            too_dense: report.too_dense,
        }
    }
}

pub fn handle(request: &Path, planner: &PlannerArgs) -> Result<()> {
    let request = read_request(request)
        .with_context(|| format!("loading request {}", request.display()))?;
    let run = build_planner(planner)?
        .candidates(&request)
        .context("generating candidate poles")?;
    info!("{}", run.report.summary());

    let output = CandidatesOutput {
        source: SourceOutput::from(&run.source),
        destinations: run.destinations.len(),
        voronoi_vertices: run.report.voronoi_vertices,
        candidates: run.report.candidates.iter().map(PointOutput::from).collect(),
        dropped: DroppedOutput::from(&run.report),
        warnings: run.diagnostics.messages(),
    };
    write_json(&output, None).context("writing candidates")?;
    Ok(())
}
