//! Dinner Decider - can't pick a place to eat? Roll for it.
//!
//! Keep a list of restaurants, tag each as dine-in, takeout, fast food, or
//! dine-in/takeout, switch categories on and off, and let an animated dice
//! roll pick one from whatever is still eligible.

pub mod domain;
pub mod decider;
pub mod storage;
pub mod cli;

pub use decider::{Decider, RollEngine, RollSettings};
pub use domain::{ActiveFilters, Category, FilterTag, Restaurant, RestaurantId};
