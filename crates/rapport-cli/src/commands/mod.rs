//! CLI command implementations.

pub mod init;
pub mod run;
pub mod stats;
pub mod path;
pub mod contacts;
pub mod top;
pub mod pick;
pub mod export;

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rapport::prelude::*;
use tracing::info;

use crate::config::{Config, Overrides, RunSettings};

/// Outcome of driving an engine through the configured frames.
pub struct Simulated {
    pub engine: SimulationEngine,
    pub settings: RunSettings,
    pub connected: usize,
    pub disconnected: usize,
}

/// Load the config, build a fresh engine and run it.
pub fn simulate(overrides: &Overrides, show_progress: bool) -> Result<Simulated> {
    let config = Config::load()?;
    let settings = config.settings(overrides);
    let mut engine = SimulationEngine::from_config(&settings.engine);

    let pb = if show_progress {
        let pb = ProgressBar::new(settings.frames);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} frames")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let (connected, disconnected) = drive(&mut engine, settings.frames, settings.dt, &pb);
    pb.finish_and_clear();

    Ok(Simulated {
        engine,
        settings,
        connected,
        disconnected,
    })
}

/// Step `engine` for `frames` frames, returning connect and disconnect
/// event counts.
pub fn drive(engine: &mut SimulationEngine, frames: u64, dt: f64, pb: &ProgressBar) -> (usize, usize) {
    let mut connected = 0;
    let mut disconnected = 0;
    for _ in 0..frames {
        for event in engine.step(dt) {
            match event {
                EngineEvent::Connected { .. } => connected += 1,
                EngineEvent::Disconnected { .. } => disconnected += 1,
                EngineEvent::FrameComplete { .. } => {}
            }
        }
        pb.inc(1);
    }

    info!(
        frames,
        connected,
        disconnected,
        agents = engine.snapshot().len(),
        "simulation finished"
    );
    (connected, disconnected)
}

/// Id of the agent at population position `index`.
pub fn agent_id(engine: &SimulationEngine, index: usize) -> Result<AgentId> {
    Ok(engine.agent_at(index)?.id.clone())
}

/// One-line description of an agent for listings.
pub fn describe(agent: &Agent) -> String {
    let interests: Vec<String> = agent
        .interests
        .tags()
        .iter()
        .map(|t| format!("{:?}", t))
        .collect();
    format!(
        "{} {} {}",
        agent.name.white().bold(),
        format!("({}, {:?})", agent.age, agent.gender).dimmed(),
        interests.join(", ").dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drive_counts_connect_events() {
        let mut engine = SimulationEngine::with_seed(300.0, 300.0, 6, 11);
        // Negative thresholds connect every pair on the first frame.
        engine.update_params(&ParamsPatch {
            sense_radius: Some(1e6),
            connect_on: Some(-0.5),
            connect_off: Some(-1.0),
            ..Default::default()
        });

        let pb = ProgressBar::hidden();
        let (connected, disconnected) = drive(&mut engine, 3, 0.016, &pb);
        assert_eq!(connected, 15);
        assert_eq!(disconnected, 0);
        assert_eq!(engine.frame(), 3);
        assert_eq!(pb.position(), 3);
    }

    #[test]
    fn drive_with_zero_frames_is_a_no_op() {
        let mut engine = SimulationEngine::with_seed(300.0, 300.0, 4, 2);
        let (connected, disconnected) = drive(&mut engine, 0, 0.016, &ProgressBar::hidden());
        assert_eq!((connected, disconnected), (0, 0));
        assert_eq!(engine.frame(), 0);
    }
}
