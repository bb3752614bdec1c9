use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use polegrid_cli::{Cli, Commands};
use tracing_subscriber::FmtSubscriber;

mod commands;

use crate::commands::{candidates, export, plan};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries JSON/DOT output, so logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Plan {
            request,
            planner,
            out,
        } => plan::handle_plan(&request, &planner, out.as_deref()),
        Commands::PlanCsv {
            points,
            costs,
            planner,
            out,
        } => plan::handle_plan_csv(&points, &costs, &planner, out.as_deref()),
        Commands::Candidates { request, planner } => candidates::handle(&request, &planner),
        Commands::Export {
            request,
            planner,
            format,
            out,
        } => export::handle(&request, &planner, &format, out.as_deref()),
    }
}
