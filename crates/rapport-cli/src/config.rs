//! Configuration management for the rapport CLI.

use anyhow::{Context, Result};
use rapport::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "rapport.toml";

/// Contents of `rapport.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub run: RunConfig,
    /// Overrides merged into the default simulation parameters.
    #[serde(default)]
    pub params: ParamsPatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    #[serde(default = "default_agents")]
    pub agents: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_frames")]
    pub frames: u64,
    #[serde(default = "default_dt")]
    pub dt: f64,
}

// Default value functions
fn default_width() -> f64 { 800.0 }
fn default_height() -> f64 { 600.0 }
fn default_agents() -> usize { 80 }
fn default_frames() -> u64 { 600 }
fn default_dt() -> f64 { 1.0 / 60.0 }

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agents: default_agents(),
            seed: None,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            dt: default_dt(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub agents: Option<usize>,
    pub seed: Option<u64>,
    pub frames: Option<u64>,
    pub dt: Option<f64>,
}

/// Everything a command needs to build and drive an engine.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub engine: EngineConfig,
    pub frames: u64,
    pub dt: f64,
}

impl Config {
    /// Load `rapport.toml` from the current directory or its parents, then
    /// from the user config directory. Defaults when none exists.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        match find_config_file(&cwd).or_else(user_config_file) {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default()).context("Failed to serialize config")
    }

    /// Resolve the engine configuration, letting `overrides` win.
    pub fn settings(&self, overrides: &Overrides) -> RunSettings {
        let mut params = SimParams::default();
        params.merge(&self.params);

        RunSettings {
            engine: EngineConfig {
                width: self.arena.width,
                height: self.arena.height,
                agent_count: overrides.agents.unwrap_or(self.population.agents),
                rng_seed: overrides.seed.or(self.population.seed),
                params,
            },
            frames: overrides.frames.unwrap_or(self.run.frames),
            dt: overrides.dt.unwrap_or(self.run.dt),
        }
    }
}

/// Find `rapport.toml` in `start` or any of its parents.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// `rapport/rapport.toml` under the platform config directory, if present.
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("rapport").join(CONFIG_FILE);
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = Config::default();
        config.population.seed = Some(42);
        config.params.connect_on = Some(0.25);
        config.save(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[population]\nagents = 12\n\n[params]\nsense_radius = 90.0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.population.agents, 12);
        assert_eq!(config.population.seed, None);
        assert_eq!(config.arena, ArenaConfig::default());
        assert_eq!(config.params.sense_radius, Some(90.0));
        assert_eq!(config.params.drag, None);
    }

    #[test]
    fn config_found_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        Config::default().save(&dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(find_config_file(&nested), Some(dir.path().join(CONFIG_FILE)));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[arena]\nwidth = \"wide\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn overrides_win_over_file() {
        let mut config = Config::default();
        config.population.agents = 30;
        config.population.seed = Some(1);
        config.params.v_max = Some(60.0);

        let settings = config.settings(&Overrides {
            agents: Some(5),
            frames: Some(10),
            ..Default::default()
        });
        assert_eq!(settings.engine.agent_count, 5);
        assert_eq!(settings.engine.rng_seed, Some(1));
        assert_eq!(settings.engine.params.v_max, 60.0);
        assert_eq!(settings.engine.params.drag, SimParams::default().drag);
        assert_eq!(settings.frames, 10);
        assert_eq!(settings.dt, default_dt());
    }

    #[test]
    fn default_toml_parses_back() {
        let text = Config::default_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
