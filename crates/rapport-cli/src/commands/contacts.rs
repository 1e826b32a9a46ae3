//! Direct and indirect contacts of an agent.

use anyhow::Result;
use colored::Colorize;

use crate::commands::{agent_id, describe, simulate};
use crate::config::Overrides;

pub fn run(overrides: &Overrides, index: usize, radius: Option<f64>) -> Result<()> {
    let sim = simulate(overrides, false)?;
    let engine = &sim.engine;
    let id = agent_id(engine, index)?;
    let me = engine.require_agent(&id)?;
    let sets = engine.contact_sets(&id, radius.unwrap_or(f64::INFINITY));

    println!("{} Contacts of {}", "→".blue(), describe(me));
    println!();

    println!("{} ({})", "Direct".blue().bold(), sets.direct.len());
    for contact in sets.direct.iter().filter_map(|c| engine.get_agent(c)) {
        println!("  {} {}", "•".green(), describe(contact));
    }

    println!("{} ({})", "Indirect".blue().bold(), sets.indirect.len());
    for (contact, hops) in &sets.hops {
        if *hops < 2 {
            continue;
        }
        if let Some(agent) = engine.get_agent(contact) {
            println!(
                "  {} {} {}",
                "•".yellow(),
                describe(agent),
                format!("[{} hops]", hops).dimmed()
            );
        }
    }

    Ok(())
}
