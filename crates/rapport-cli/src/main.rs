//! Rapport CLI - headless host for the social-proximity simulation.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rapport::prelude::DEFAULT_PICK_RADIUS;

use crate::config::Overrides;

#[derive(Parser)]
#[command(name = "rapport")]
#[command(author, version, about = "Rapport - agents that meet, match and make friends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Population size (overrides rapport.toml)
    #[arg(short, long, global = true)]
    agents: Option<usize>,

    /// RNG seed for a reproducible run
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Frames to simulate before reporting
    #[arg(short, long, global = true)]
    frames: Option<u64>,

    /// Seconds per frame (clamped to 0.05 by the engine)
    #[arg(long, global = true)]
    dt: Option<f64>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default rapport.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the simulation and summarize what formed
    Run,

    /// Show graph statistics after the run
    Stats,

    /// Shortest friendship path between two agents
    Path {
        /// Population index of the first agent
        from: usize,
        /// Population index of the second agent
        to: usize,
    },

    /// Direct and indirect contacts of an agent
    Contacts {
        /// Population index of the agent
        index: usize,

        /// Physical radius; unlimited when omitted
        #[arg(short, long)]
        radius: Option<f64>,
    },

    /// Best-matching agents for an agent
    Top {
        /// Population index of the agent
        index: usize,

        /// Number of matches to show
        #[arg(short, long, default_value = "5")]
        n: usize,
    },

    /// Nearest agent to a point in the arena
    Pick {
        x: f64,
        y: f64,

        /// Maximum distance from the point
        #[arg(short, long, default_value_t = DEFAULT_PICK_RADIUS)]
        radius: f64,
    },

    /// Export the friendship graph
    Export {
        /// Output file path
        output: String,

        /// Export format: json or dot
        #[arg(long, default_value = "json")]
        format: String,
    },
}

fn init_tracing(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = Overrides {
        agents: cli.agents,
        seed: cli.seed,
        frames: cli.frames,
        dt: cli.dt,
    };

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run => commands::run::run(&overrides, cli.verbose),
        Commands::Stats => commands::stats::run(&overrides),
        Commands::Path { from, to } => commands::path::run(&overrides, from, to),
        Commands::Contacts { index, radius } => commands::contacts::run(&overrides, index, radius),
        Commands::Top { index, n } => commands::top::run(&overrides, index, n),
        Commands::Pick { x, y, radius } => commands::pick::run(&overrides, x, y, radius),
        Commands::Export { output, format } => commands::export::run(&overrides, &output, &format),
    }
}
