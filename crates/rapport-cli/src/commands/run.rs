//! Run the simulation and summarize what formed.

use anyhow::Result;
use colored::Colorize;

use crate::commands::simulate;
use crate::config::Overrides;

pub fn run(overrides: &Overrides, verbose: bool) -> Result<()> {
    println!("{} Running simulation...", "→".blue());
    let sim = simulate(overrides, true)?;
    let engine = &sim.engine;
    let stats = engine.engine_stats();

    println!(
        "  {} agents in {}x{}, {} frames of {:.4}s",
        stats.graph.node_count.to_string().cyan(),
        engine.arena().width,
        engine.arena().height,
        sim.settings.frames.to_string().cyan(),
        sim.settings.dt
    );
    if let Some(seed) = sim.settings.engine.rng_seed {
        println!("  Seed: {}", seed.to_string().cyan());
    }

    println!();
    println!("{} Simulation complete!", "✓".green().bold());
    println!("  Simulated time:  {:.2}s", stats.elapsed);
    println!("  Friendships:     {}", stats.graph.edge_count.to_string().green());
    println!("  Groups:          {}", stats.graph.component_count.to_string().green());
    println!(
        "  Formed / broken: {} / {}",
        sim.connected.to_string().green(),
        sim.disconnected.to_string().yellow()
    );

    if verbose {
        println!();
        println!("{}", "Most connected".blue().bold());
        let mut by_degree: Vec<_> = engine.snapshot().iter().enumerate().collect();
        by_degree.sort_by(|a, b| b.1.connections.len().cmp(&a.1.connections.len()));
        for (i, agent) in by_degree.into_iter().take(5) {
            println!(
                "  {} {} {}",
                format!("#{}", i).blue(),
                super::describe(agent),
                format!("[{} friends]", agent.connections.len()).cyan()
            );
        }
    }

    Ok(())
}
