//! Export the friendship graph.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use rapport::prelude::*;
use std::path::Path;

use crate::commands::simulate;
use crate::config::Overrides;

pub fn run(overrides: &Overrides, output: &str, format: &str) -> Result<()> {
    let content = match format {
        "json" | "dot" => {
            let sim = simulate(overrides, false)?;
            if format == "json" {
                to_json(&sim.engine)?
            } else {
                to_dot(&sim.engine)
            }
        }
        other => bail!("Unknown format: {}. Use json or dot.", other),
    };

    let path = Path::new(output);
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Exported {} to {}",
        "✓".green().bold(),
        format.cyan(),
        path.display()
    );

    Ok(())
}
