//! # Decider
//!
//! The piece a front-end talks to. [`Decider`] combines the restaurant list,
//! the active category filters, and the [`RollEngine`]:
//!
//! ```text
//! restaurants + filters ──▶ eligible_pool() ──▶ trigger() ──▶ on_tick()… ──▶ result
//! ```
//!
//! ## Host contract
//!
//! - The host owns an event queue and passes a [`TickNotifier`] that posts a
//!   [`RollId`] onto it.
//! - Each posted id is handed back through [`Decider::on_tick`] on the host
//!   thread, so ticks never race with list or filter changes.
//! - Dropping the `Decider` (or calling [`Decider::cancel`]) stops the timer.

mod engine;
mod ticker;

pub use engine::{
    RollEngine, RollId, RollSettings, RollUpdate, TickNotifier, TriggerOutcome, DECIDING,
    NO_CANDIDATES,
};
pub use ticker::Ticker;

use rand::Rng;

use crate::domain::{filter_pool, ActiveFilters, FilterTag, Restaurant, RestaurantId};

/// Filter + roll state for one front-end session
pub struct Decider<R> {
    restaurants: Vec<Restaurant>,
    filters: ActiveFilters,
    engine: RollEngine<R>,
}

impl<R: Rng> Decider<R> {
    pub fn new(restaurants: Vec<Restaurant>, filters: ActiveFilters, engine: RollEngine<R>) -> Self {
        Self {
            restaurants,
            filters,
            engine,
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Replaces the restaurant list. A roll in progress keeps its own pool.
    pub fn set_restaurants(&mut self, restaurants: Vec<Restaurant>) {
        self.restaurants = restaurants;
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    /// Restaurants eligible under the current filters, in list order
    pub fn eligible_pool(&self) -> Vec<Restaurant> {
        filter_pool(&self.restaurants, &self.filters)
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible_pool().len()
    }

    /// Whether a roll button should be enabled
    pub fn can_trigger(&self) -> bool {
        !self.is_rolling() && self.eligible_count() > 0
    }

    pub fn is_rolling(&self) -> bool {
        self.engine.is_rolling()
    }

    pub fn displayed_result(&self) -> Option<&str> {
        self.engine.displayed()
    }

    pub fn committed(&self) -> Option<&Restaurant> {
        self.engine.committed()
    }

    pub fn settings(&self) -> RollSettings {
        self.engine.settings()
    }

    /// Starts a roll over the current eligible pool. No-op while rolling.
    pub fn trigger(&mut self) -> TriggerOutcome {
        if self.is_rolling() {
            return TriggerOutcome::AlreadyRolling;
        }
        let pool = self.eligible_pool();
        self.engine.start(pool)
    }

    /// Feeds a tick from the host's event queue
    pub fn on_tick(&mut self, id: RollId) -> Option<RollUpdate> {
        self.engine.on_tick(id)
    }

    /// Flips a filter tag and clears any shown result. Returns true if the
    /// tag is now active.
    pub fn toggle_filter(&mut self, tag: FilterTag) -> bool {
        let active = self.filters.toggle(tag);
        self.engine.clear_result();
        active
    }

    /// Replaces all filters and clears any shown result
    pub fn set_filters(&mut self, filters: ActiveFilters) {
        self.filters = filters;
        self.engine.clear_result();
    }

    /// Clears the shown result if it was the given restaurant
    pub fn forget(&mut self, id: &RestaurantId) {
        let shown = self
            .restaurants
            .iter()
            .find(|r| &r.id == id)
            .map(|r| r.name.as_str());
        let committed = self.engine.committed().map(|r| &r.id);

        if committed == Some(id) || (shown.is_some() && shown == self.engine.displayed()) {
            self.engine.clear_result();
        }
    }

    /// Aborts a roll in progress
    pub fn cancel(&mut self) -> bool {
        self.engine.cancel()
    }
}
