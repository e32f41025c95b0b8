//! Restaurant domain model
//!
//! A restaurant is a named, categorized candidate for dinner. The name is
//! always stored trimmed and is never empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::Category;
use super::id::RestaurantId;

#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("Restaurant name cannot be empty")]
    EmptyName,

    #[error("Unknown category '{0}' (expected dine-in, takeout, fast-food, or dine-in-or-takeout)")]
    UnknownCategory(String),

    #[error("Unknown filter '{0}' (expected dine-in, takeout, or fast-food)")]
    UnknownFilterTag(String),

    #[error("'{0}' is a combined category and cannot be toggled; toggle dine-in or takeout instead")]
    CompositeFilter(String),
}

/// Trims a restaurant name, rejecting names that are blank
pub fn normalize_name(name: &str) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// A restaurant on the dinner list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Who added the restaurant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
}

impl Restaurant {
    /// Creates a new restaurant, trimming the name
    pub fn new(name: &str, category: Category) -> Result<Self, DomainError> {
        Self::new_at(name, category, Utc::now())
    }

    /// Creates a new restaurant with an explicit creation time
    pub fn new_at(
        name: &str,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = normalize_name(name)?;
        Ok(Self {
            id: RestaurantId::new(&name, created_at),
            name,
            category,
            created_at,
            updated_at: created_at,
            added_by: None,
        })
    }

    /// Records who added the restaurant
    pub fn with_added_by(mut self, user: impl Into<String>) -> Self {
        self.added_by = Some(user.into());
        self
    }

    /// Renames the restaurant
    pub fn rename(&mut self, name: &str) -> Result<(), DomainError> {
        self.name = normalize_name(name)?;
        self.touch();
        Ok(())
    }

    /// Changes the category
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
