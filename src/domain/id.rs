//! Restaurant identifiers
//!
//! ID Format: `r-{7-char-hash}` (e.g., `r-7f2b4c1`)
//!
//! Hash is derived from name + creation timestamp, so re-adding a restaurant
//! with the same name later produces a different ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid restaurant ID format: expected 'r-{{7-char-hash}}', got '{0}'")]
    InvalidRestaurantId(String),
}

/// Generates a 7-character hash from name and timestamp
fn generate_hash(name: &str, timestamp: DateTime<Utc>) -> String {
    let input = format!("{}{}", name, timestamp.timestamp_nanos_opt().unwrap_or(0));
    let hash = blake3::hash(input.as_bytes());
    let hex = hash.to_hex();
    hex[..7].to_string()
}

/// Restaurant ID in the format `r-{7-char-hash}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RestaurantId {
    hash: String,
}

impl RestaurantId {
    /// Creates a new restaurant ID from name and timestamp
    pub fn new(name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            hash: generate_hash(name, timestamp),
        }
    }

    /// Returns the hash portion of the ID
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r-{}", self.hash)
    }
}

impl FromStr for RestaurantId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hash = s
            .strip_prefix("r-")
            .ok_or_else(|| IdError::InvalidRestaurantId(s.to_string()))?;

        if hash.len() != 7 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(IdError::InvalidRestaurantId(s.to_string()));
        }

        Ok(Self {
            hash: hash.to_ascii_lowercase(),
        })
    }
}

impl TryFrom<String> for RestaurantId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RestaurantId> for String {
    fn from(id: RestaurantId) -> Self {
        id.to_string()
    }
}
