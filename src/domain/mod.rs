//! Domain models for the dinner decider
//!
//! Contains the core business logic without any I/O concerns.

mod id;
mod category;
mod restaurant;
mod filter;

pub use id::{IdError, RestaurantId};
pub use category::{Category, FilterTag};
pub use restaurant::{normalize_name, DomainError, Restaurant};
pub use filter::{category_enabled, filter_pool, is_eligible, ActiveFilters};
