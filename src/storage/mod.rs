//! # Storage Layer
//!
//! Persistence layer for the dinner decider with git-friendly file formats.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Restaurants | JSONL (one JSON per line, list order) | `.dinner/restaurants.jsonl` |
//! | Config + filters | TOML | `.dinner/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`RestaurantStore`] uses file locking (`fs2`) for concurrent access
//! - Full rewrites are atomic (temp file + rename)
//! - Concurrent editors resolve last-write-wins
//!
//! ## Project Structure
//!
//! ```text
//! .dinner/
//! ├── restaurants.jsonl     # The restaurant list
//! ├── config.toml           # Roll tuning and active filters
//! └── .gitignore            # Ignores interrupted writes
//! ```

mod jsonl;
mod config;
mod project;

pub use jsonl::RestaurantStore;
pub use config::{Config, ConfigError, FilterConfig, GlobalConfig, OutputFormat, ProjectConfig, RollConfig};
pub use project::{Project, ProjectError};
