//! Nearest agent to a point in the arena.

use anyhow::Result;
use colored::Colorize;

use crate::commands::{describe, simulate};
use crate::config::Overrides;

pub fn run(overrides: &Overrides, x: f64, y: f64, radius: f64) -> Result<()> {
    let sim = simulate(overrides, false)?;
    let engine = &sim.engine;

    match engine.pick_agent(x, y, radius).and_then(|id| engine.get_agent(&id)) {
        Some(agent) => {
            println!(
                "{} {} at ({:.1}, {:.1})",
                "✓".green(),
                describe(agent),
                agent.position.x,
                agent.position.y
            );
        }
        None => {
            println!(
                "{} No agent within {} of ({:.1}, {:.1})",
                "✗".red(),
                radius,
                x,
                y
            );
        }
    }

    Ok(())
}
