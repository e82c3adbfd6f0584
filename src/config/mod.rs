use crate::error::{ErrorCode, Result, TaskError};
use crate::tasks::performance::{default_teams, teams_from_value, DEFAULT_SEED};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub mod loader;

#[cfg(test)]
mod tests;

pub use loader::ConfigLoader;

pub const CONFIG_FILE_NAME: &str = "datatasks.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Get the global datatasks directory for configuration
pub fn get_global_config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "datatasks", "datatasks")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| TaskError::config("Could not determine home directory"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Where the traffic task writes `traffic_data.csv`
    pub output_dir: PathBuf,
    pub default_teams: Vec<String>,
    pub seed: u64,
    pub log_level: String,
}

/// On-disk shape; teams stay untyped until validated
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    output_dir: Option<PathBuf>,
    default_teams: Option<serde_json::Value>,
    seed: Option<u64>,
    log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            default_teams: default_teams(),
            seed: DEFAULT_SEED,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Parse a TOML document, filling unspecified fields with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let default_teams = match raw.default_teams {
            Some(value) => teams_from_value(&value)
                .map_err(|e| e.with_context("in default_teams"))?,
            None => defaults.default_teams,
        };

        Ok(Self {
            output_dir: raw.output_dir.unwrap_or(defaults.output_dir),
            default_teams,
            seed: raw.seed.unwrap_or(defaults.seed),
            log_level: raw.log_level.unwrap_or(defaults.log_level),
        })
    }

    /// Apply `DATATASKS_*` overrides looked up through `lookup`
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("DATATASKS_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(seed) = lookup("DATATASKS_SEED") {
            match seed.parse::<u64>() {
                Ok(value) => self.seed = value,
                Err(_) => warn!("Ignoring non-numeric DATATASKS_SEED={}", seed),
            }
        }

        if let Some(level) = lookup("DATATASKS_LOG_LEVEL") {
            self.log_level = level;
        }

        if let Some(teams) = lookup("DATATASKS_TEAMS") {
            let parsed: Vec<String> = teams
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            if !parsed.is_empty() {
                self.default_teams = parsed;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(TaskError::config_with_code(
                ErrorCode::CONFIG_INVALID_VALUE,
                "output_dir must not be empty",
            ));
        }
        Ok(())
    }
}
