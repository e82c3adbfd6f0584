use super::{get_global_config_dir, Config, CONFIG_FILE_NAME};
use crate::error::{ErrorCode, Result, TaskError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds and loads `datatasks.toml`
pub struct ConfigLoader {
    search_dirs: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Search the working directory, then the global config directory
    pub fn new() -> Self {
        let mut search_dirs = vec![PathBuf::from(".")];
        if let Ok(global) = get_global_config_dir() {
            search_dirs.push(global);
        }
        Self { search_dirs }
    }

    pub fn with_search_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// Load configuration and apply environment overrides
    pub fn load(&self, explicit_path: Option<&Path>) -> Result<Config> {
        self.load_with_env(explicit_path, |key| std::env::var(key).ok())
    }

    pub fn load_with_env<F>(&self, explicit_path: Option<&Path>, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(TaskError::config_with_code(
                        ErrorCode::CONFIG_NOT_FOUND,
                        format!("Configuration file not found: {}", path.display()),
                    ));
                }
                Self::load_file(path)?
            }
            None => match self.find_config_file() {
                Some(path) => Self::load_file(&path)?,
                None => {
                    debug!("No configuration file found, using defaults");
                    Config::default()
                }
            },
        };

        config.merge_env_from(lookup);
        config.validate()?;
        Ok(config)
    }

    /// First `datatasks.toml` that exists in the search directories
    pub fn find_config_file(&self) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }

    fn load_file(path: &Path) -> Result<Config> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| TaskError::from(e).with_path(path))?;
        Config::from_toml_str(&content).map_err(|e| e.with_context(path.display()))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
