//! Best-matching agents for an agent.

use anyhow::Result;
use colored::Colorize;

use crate::commands::{agent_id, describe, simulate};
use crate::config::Overrides;

pub fn run(overrides: &Overrides, index: usize, n: usize) -> Result<()> {
    let sim = simulate(overrides, false)?;
    let engine = &sim.engine;
    let id = agent_id(engine, index)?;
    let me = engine.require_agent(&id)?;

    println!(
        "{} Top {} matches for {}",
        "→".blue(),
        n.to_string().cyan(),
        describe(me)
    );
    println!();

    for (i, m) in engine.match_top_n(&id, n).iter().enumerate() {
        let Some(agent) = engine.get_agent(&m.id) else {
            continue;
        };
        let friend = if me.is_connected_to(&m.id) { " ♥" } else { "" };
        println!(
            "  {} {} {}{}",
            format!("{}.", i + 1).blue(),
            describe(agent),
            format!("({:.4})", m.score).dimmed(),
            friend.red()
        );
    }

    Ok(())
}
