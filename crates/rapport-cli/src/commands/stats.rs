//! Show graph statistics after the run.

use anyhow::Result;
use colored::Colorize;

use crate::commands::simulate;
use crate::config::Overrides;

pub fn run(overrides: &Overrides) -> Result<()> {
    let sim = simulate(overrides, false)?;
    let stats = sim.engine.engine_stats();

    println!("{}", "Rapport Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Simulation".blue().bold());
    println!("  Frames:            {}", stats.frame.to_string().cyan());
    println!("  Simulated time:    {:.2}s", stats.elapsed);
    println!();

    println!("{}", "Graph Structure".blue().bold());
    println!("  Agents:            {}", stats.graph.node_count.to_string().cyan());
    println!("  Friendships:       {}", stats.graph.edge_count.to_string().cyan());
    println!("  Components:        {}", stats.graph.component_count.to_string().cyan());
    println!("  Mean degree:       {:.3}", stats.mean_degree);
    println!("  Density:           {:.6}", stats.density);

    println!();
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
