//! Project management
//!
//! Handles project initialization and provides access to stores.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, RestaurantStore};
use crate::domain::{Category, Restaurant};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a dinner project. Run 'dinner init' first.")]
    NotInProject,
}

/// Starter list written by `dinner init --seed`
const STARTER_RESTAURANTS: &[(&str, Category)] = &[
    ("Pasta House", Category::DineIn),
    ("Ramen Bar", Category::DineInOrTakeout),
    ("Taiwanese Street Food", Category::Takeout),
    ("Veggie & Salad", Category::DineInOrTakeout),
    ("Burger Joint", Category::FastFood),
    ("Thai Kitchen", Category::DineIn),
];

/// A dinner decider project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let dinner_dir = root.join(".dinner");

        if !dinner_dir.is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let dinner_dir = root.join(".dinner");

        // Create directory structure
        fs::create_dir_all(&dinner_dir).with_context(|| {
            format!("Failed to create .dinner directory: {}", dinner_dir.display())
        })?;

        // Create default config
        let config_path = dinner_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Dinner decider configuration

# Name recorded on restaurants you add (defaults to $DINNER_USER, then $USER)
# user_name = "me"

[roll]
# Animated draws before the result is committed
ticks = 16
# Milliseconds between draws
interval_ms = 80

[filters]
# Active categories: dine_in, takeout, fast_food
active = ["dine_in", "takeout", "fast_food"]
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        // Create .gitignore for .dinner
        let gitignore_path = dinner_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = "# Ignore interrupted writes\n*.tmp\n";
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Adds the starter restaurants. Returns how many were added.
    ///
    /// Does nothing if the list already has restaurants.
    pub fn seed(&self) -> Result<usize> {
        let store = self.restaurant_store();
        if !store.read_all()?.is_empty() {
            return Ok(0);
        }

        let user = self.config.project.effective_user();
        let restaurants = STARTER_RESTAURANTS
            .iter()
            .map(|(name, category)| {
                Restaurant::new(name, *category).map(|r| r.with_added_by(user.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        store.write_all(&restaurants)?;
        Ok(restaurants.len())
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .dinner directory path
    pub fn dinner_dir(&self) -> PathBuf {
        self.root.join(".dinner")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Returns the restaurant store
    pub fn restaurant_store(&self) -> RestaurantStore {
        RestaurantStore::for_project(&self.root)
    }
}
