//! Shortest friendship path between two agents.

use anyhow::Result;
use colored::Colorize;

use crate::commands::{agent_id, simulate};
use crate::config::Overrides;

pub fn run(overrides: &Overrides, from: usize, to: usize) -> Result<()> {
    let sim = simulate(overrides, false)?;
    let engine = &sim.engine;
    let from_id = agent_id(engine, from)?;
    let to_id = agent_id(engine, to)?;

    let path = engine.find_path(&from_id, &to_id);
    if path.is_empty() {
        println!(
            "{} No path between {} and {}",
            "✗".red(),
            from_id.to_string().white().bold(),
            to_id.to_string().white().bold()
        );
        return Ok(());
    }

    println!(
        "{} Path ({} hops):",
        "→".blue(),
        (path.len() - 1).to_string().cyan()
    );
    let names: Vec<String> = path
        .iter()
        .filter_map(|id| engine.get_agent(id))
        .map(|a| a.name.clone())
        .collect();
    let arrow = format!(" {} ", "→".dimmed());
    println!("  {}", names.join(arrow.as_str()));

    Ok(())
}
