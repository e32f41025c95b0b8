//! JSONL storage for restaurants
//!
//! Restaurants are stored in `.dinner/restaurants.jsonl` with one JSON object
//! per line. Line order is list order. Uses file locking for concurrent
//! access safety.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{Restaurant, RestaurantId};

/// Store for restaurant data in JSONL format
pub struct RestaurantStore {
    path: PathBuf,
}

impl RestaurantStore {
    /// Creates a new restaurant store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root.join(".dinner").join("restaurants.jsonl"))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all restaurants in list order.
    ///
    /// A restaurant that appears on several lines keeps the position of its
    /// first line and the content of its last one.
    pub fn read_all(&self) -> Result<Vec<Restaurant>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open restaurant store: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on restaurant store")?;

        let reader = BufReader::new(&file);
        let mut restaurants: Vec<Restaurant> = Vec::new();
        let mut positions: HashMap<RestaurantId, usize> = HashMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let restaurant: Restaurant = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse restaurant at line {}", line_num + 1))?;

            match positions.get(&restaurant.id) {
                Some(&idx) => restaurants[idx] = restaurant,
                None => {
                    positions.insert(restaurant.id.clone(), restaurants.len());
                    restaurants.push(restaurant);
                }
            }
        }

        // Lock is released when file is dropped
        Ok(restaurants)
    }

    /// Finds one restaurant by ID
    pub fn get(&self, id: &RestaurantId) -> Result<Option<Restaurant>> {
        Ok(self.read_all()?.into_iter().find(|r| &r.id == id))
    }

    /// Writes all restaurants to the store (full rewrite, order preserved)
    pub fn write_all(&self, restaurants: &[Restaurant]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            // Acquire exclusive lock
            file.lock_exclusive()
                .context("Failed to acquire write lock on restaurant store")?;

            let mut writer = BufWriter::new(&file);

            for restaurant in restaurants {
                let line =
                    serde_json::to_string(restaurant).context("Failed to serialize restaurant")?;
                writeln!(writer, "{}", line).context("Failed to write restaurant")?;
            }

            writer.flush().context("Failed to flush restaurant store")?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends a single restaurant (used for quick adds without full rewrite)
    pub fn append(&self, restaurant: &Restaurant) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open restaurant store: {}", self.path.display()))?;

        // Acquire exclusive lock
        file.lock_exclusive()
            .context("Failed to acquire write lock on restaurant store")?;

        let mut writer = BufWriter::new(&file);
        let line = serde_json::to_string(restaurant).context("Failed to serialize restaurant")?;
        writeln!(writer, "{}", line).context("Failed to write restaurant")?;

        writer.flush().context("Failed to flush restaurant store")?;

        Ok(())
    }

    /// Updates a single restaurant in place. Returns false if it is unknown.
    pub fn update(&self, restaurant: &Restaurant) -> Result<bool> {
        let mut restaurants = self.read_all()?;
        match restaurants.iter_mut().find(|r| r.id == restaurant.id) {
            Some(slot) => {
                *slot = restaurant.clone();
                self.write_all(&restaurants)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a restaurant by ID, returning it if it existed
    pub fn remove(&self, id: &RestaurantId) -> Result<Option<Restaurant>> {
        let mut restaurants = self.read_all()?;
        let Some(pos) = restaurants.iter().position(|r| &r.id == id) else {
            return Ok(None);
        };
        let removed = restaurants.remove(pos);
        self.write_all(&restaurants)?;
        Ok(Some(removed))
    }
}
