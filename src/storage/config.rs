//! Configuration handling for the dinner decider
//!
//! Configuration is stored in `.dinner/config.toml` (project) and
//! `~/.config/dinner/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decider::RollSettings;
use crate::domain::ActiveFilters;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Animation tuning for rolls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RollConfig {
    /// Number of animated ticks before the result is committed
    pub ticks: u32,

    /// Milliseconds between ticks
    pub interval_ms: u64,
}

impl Default for RollConfig {
    fn default() -> Self {
        let settings = RollSettings::default();
        Self {
            ticks: settings.ticks,
            interval_ms: settings.interval.as_millis() as u64,
        }
    }
}

impl RollConfig {
    /// Checks the tuning and converts it to engine settings
    pub fn settings(&self) -> Result<RollSettings, ConfigError> {
        if self.ticks == 0 {
            return Err(ConfigError::Invalid("roll.ticks must be at least 1".to_string()));
        }
        if self.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "roll.interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(RollSettings {
            ticks: self.ticks,
            interval: Duration::from_millis(self.interval_ms),
        })
    }
}

/// Persisted filter state
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    /// Active primitive categories
    pub active: ActiveFilters,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Name recorded on restaurants you add (defaults to $DINNER_USER, then $USER)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    /// Roll animation settings
    pub roll: RollConfig,

    /// Filter state
    pub filters: FilterConfig,
}

impl ProjectConfig {
    /// Gets the effective user name from config, environment, or defaults
    pub fn effective_user(&self) -> String {
        self.user_name
            .clone()
            .or_else(|| std::env::var("DINNER_USER").ok())
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "anonymous".to_string())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project()?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "dinner", "dinner-decider")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Finds and loads project configuration
    fn load_project() -> Result<(ProjectConfig, Option<PathBuf>)> {
        let project_root = Self::find_project_root();

        match project_root {
            Some(root) => {
                let config = Self::load_project_config(&root)?;
                Ok((config, Some(root)))
            }
            None => Ok((ProjectConfig::default(), None)),
        }
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(".dinner").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        config
            .roll
            .settings()
            .with_context(|| format!("Invalid project config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Finds the project root by looking for `.dinner/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let dinner_dir = current.join(".dinner");
            if dinner_dir.is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a dinner project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Returns the project root, or an error if not in a project
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a dinner project. Run 'dinner init' first."))
    }

    /// Returns validated roll settings
    pub fn roll_settings(&self) -> Result<RollSettings> {
        Ok(self.project.roll.settings()?)
    }

    /// Saves the project configuration
    pub fn save_project(&self) -> Result<()> {
        let root = self.require_project_root()?;
        let config_path = root.join(".dinner").join("config.toml");

        let content =
            toml::to_string_pretty(&self.project).context("Failed to serialize project config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write project config: {}", config_path.display()))
    }

    /// Saves the global configuration
    pub fn save_global(&self) -> Result<()> {
        let config_dir = Self::global_config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = config_dir.join("config.toml");
        let content =
            toml::to_string_pretty(&self.global).context("Failed to serialize global config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write global config: {}", config_path.display()))
    }
}
