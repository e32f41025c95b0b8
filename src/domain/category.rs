//! Restaurant categories
//!
//! Two distinct types keep the "derived, not toggleable" rule in the type
//! system:
//!
//! - [`Category`] is what a restaurant is classified as. It includes the
//!   composite [`Category::DineInOrTakeout`].
//! - [`FilterTag`] is what a user can switch on or off. It has no composite
//!   variant, so a composite filter toggle cannot be constructed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// A primitive, user-toggleable category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterTag {
    DineIn,
    Takeout,
    FastFood,
}

impl FilterTag {
    /// All primitive tags, in display order
    pub const ALL: [FilterTag; 3] = [FilterTag::DineIn, FilterTag::Takeout, FilterTag::FastFood];

    /// Stable machine name (matches the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterTag::DineIn => "dine_in",
            FilterTag::Takeout => "takeout",
            FilterTag::FastFood => "fast_food",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FilterTag::DineIn => "Dine-in",
            FilterTag::Takeout => "Takeout",
            FilterTag::FastFood => "Fast Food",
        }
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "dinein" => Ok(FilterTag::DineIn),
            "takeout" => Ok(FilterTag::Takeout),
            "fastfood" => Ok(FilterTag::FastFood),
            "dineinortakeout" | "both" => Err(DomainError::CompositeFilter(s.trim().to_string())),
            _ => Err(DomainError::UnknownFilterTag(s.trim().to_string())),
        }
    }
}

/// How a restaurant is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    DineIn,
    Takeout,
    FastFood,
    /// Eligible whenever either dine-in or takeout is active
    DineInOrTakeout,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 4] = [
        Category::DineIn,
        Category::Takeout,
        Category::FastFood,
        Category::DineInOrTakeout,
    ];

    /// Stable machine name (matches the serialized form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DineIn => "dine_in",
            Category::Takeout => "takeout",
            Category::FastFood => "fast_food",
            Category::DineInOrTakeout => "dine_in_or_takeout",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::DineIn => "Dine-in",
            Category::Takeout => "Takeout",
            Category::FastFood => "Fast Food",
            Category::DineInOrTakeout => "Dine-in/Takeout",
        }
    }

    /// The primitive tags that make this category eligible.
    ///
    /// A primitive category is covered by its own tag; the composite is
    /// covered by either of its two members.
    pub fn covering_tags(&self) -> &'static [FilterTag] {
        match self {
            Category::DineIn => &[FilterTag::DineIn],
            Category::Takeout => &[FilterTag::Takeout],
            Category::FastFood => &[FilterTag::FastFood],
            Category::DineInOrTakeout => &[FilterTag::DineIn, FilterTag::Takeout],
        }
    }

    /// Returns true for the composite category
    pub fn is_composite(&self) -> bool {
        self.covering_tags().len() > 1
    }

    /// Next category in display order, wrapping around (used by the TUI editor)
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl From<FilterTag> for Category {
    fn from(tag: FilterTag) -> Self {
        match tag {
            FilterTag::DineIn => Category::DineIn,
            FilterTag::Takeout => Category::Takeout,
            FilterTag::FastFood => Category::FastFood,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "dinein" => Ok(Category::DineIn),
            "takeout" => Ok(Category::Takeout),
            "fastfood" => Ok(Category::FastFood),
            "dineinortakeout" | "both" => Ok(Category::DineInOrTakeout),
            _ => Err(DomainError::UnknownCategory(s.trim().to_string())),
        }
    }
}

/// Lowercases and strips separators so `dine-in`, `Dine In`, `dine_in`,
/// and `Dine-in/Takeout` all parse
fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace('/', "or")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
