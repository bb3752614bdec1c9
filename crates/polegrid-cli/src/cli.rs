use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "polegrid",
    author,
    version,
    about = "Plan pole-and-wire distribution networks for small settlements",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command that runs the planner.
#[derive(Args, Debug, Clone, Default)]
pub struct PlannerArgs {
    /// Planner thresholds and edge weighting (TOML); missing keys use defaults
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan a network from a JSON request
    Plan {
        /// Request file with `points`, optional `costs` and `buildings`
        #[arg(long, value_name = "JSON")]
        request: PathBuf,
        #[command(flatten)]
        planner: PlannerArgs,
        /// Write the plan here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Plan a network from a CSV point list
    PlanCsv {
        /// CSV with Latitude, Longitude and optional Name columns
        #[arg(long, value_name = "CSV")]
        points: PathBuf,
        /// Inline cost object, e.g. '{"poleCost": 100, "lowVoltageCostPerMeter": 2}'
        #[arg(long, value_name = "JSON")]
        costs: String,
        #[command(flatten)]
        planner: PlannerArgs,
        /// Write the plan here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the filtered candidate pole positions for a request
    Candidates {
        #[arg(long, value_name = "JSON")]
        request: PathBuf,
        #[command(flatten)]
        planner: PlannerArgs,
    },
    /// Plan a request and export the network as a graph
    Export {
        #[arg(long, value_name = "JSON")]
        request: PathBuf,
        #[command(flatten)]
        planner: PlannerArgs,
        /// Graph format (currently `dot`)
        #[arg(long, default_value = "dot")]
        format: String,
        /// Write the graph here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
