//! Category filter
//!
//! Derives the eligible pool from the restaurant list and the set of active
//! primitive tags. Everything here is pure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::category::{Category, FilterTag};
use super::restaurant::Restaurant;

/// The set of primitive tags currently switched on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilters(BTreeSet<FilterTag>);

impl Default for ActiveFilters {
    fn default() -> Self {
        Self::all()
    }
}

impl ActiveFilters {
    /// Every primitive tag active
    pub fn all() -> Self {
        Self(FilterTag::ALL.into_iter().collect())
    }

    /// No tag active
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Returns true if the tag is active
    pub fn contains(&self, tag: FilterTag) -> bool {
        self.0.contains(&tag)
    }

    /// Flips a tag and returns the new set
    pub fn toggled(&self, tag: FilterTag) -> Self {
        let mut next = self.clone();
        next.toggle(tag);
        next
    }

    /// Flips a tag in place. Returns true if the tag is now active.
    pub fn toggle(&mut self, tag: FilterTag) -> bool {
        if !self.0.remove(&tag) {
            self.0.insert(tag);
            true
        } else {
            false
        }
    }

    /// Returns true if no tag is active
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over active tags in display order
    pub fn iter(&self) -> impl Iterator<Item = FilterTag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<FilterTag> for ActiveFilters {
    fn from_iter<I: IntoIterator<Item = FilterTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns true if a category is selectable under the active filters.
///
/// Primitive categories need their own tag; the composite needs either of
/// its members.
pub fn category_enabled(category: Category, filters: &ActiveFilters) -> bool {
    category
        .covering_tags()
        .iter()
        .any(|tag| filters.contains(*tag))
}

/// Returns true if the restaurant is eligible under the active filters
pub fn is_eligible(restaurant: &Restaurant, filters: &ActiveFilters) -> bool {
    category_enabled(restaurant.category, filters)
}

/// Returns every eligible restaurant, in original order
pub fn filter_pool(restaurants: &[Restaurant], filters: &ActiveFilters) -> Vec<Restaurant> {
    restaurants
        .iter()
        .filter(|r| is_eligible(r, filters))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn restaurant(name: &str, category: Category) -> Restaurant {
        let ts = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Restaurant::new_at(name, category, ts).unwrap()
    }

    fn filters(tags: &[FilterTag]) -> ActiveFilters {
        tags.iter().copied().collect()
    }

    #[test]
    fn default_is_all_tags() {
        let f = ActiveFilters::default();
        for tag in FilterTag::ALL {
            assert!(f.contains(tag));
        }
    }

    #[test]
    fn primitive_needs_own_tag() {
        let r = restaurant("Burger", Category::FastFood);
        assert!(is_eligible(&r, &filters(&[FilterTag::FastFood])));
        assert!(!is_eligible(&r, &filters(&[FilterTag::DineIn, FilterTag::Takeout])));
    }

    #[test]
    fn composite_with_fast_food_only_is_ineligible() {
        let r = restaurant("Noodles", Category::DineInOrTakeout);
        assert!(!is_eligible(&r, &filters(&[FilterTag::FastFood])));
    }

    #[test]
    fn composite_with_takeout_is_eligible() {
        let r = restaurant("Noodles", Category::DineInOrTakeout);
        assert!(is_eligible(&r, &filters(&[FilterTag::FastFood, FilterTag::Takeout])));
        assert!(is_eligible(&r, &filters(&[FilterTag::DineIn])));
    }

    #[test]
    fn nothing_eligible_with_no_filters() {
        for category in Category::ALL {
            assert!(!category_enabled(category, &ActiveFilters::none()));
        }
    }

    #[test]
    fn filter_pool_keeps_order() {
        let list = vec![
            restaurant("A", Category::DineIn),
            restaurant("B", Category::FastFood),
            restaurant("C", Category::DineInOrTakeout),
            restaurant("D", Category::Takeout),
        ];

        let pool = filter_pool(&list, &filters(&[FilterTag::Takeout]));
        let names: Vec<_> = pool.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "D"]);
    }

    #[test]
    fn toggle_returns_new_state() {
        let mut f = ActiveFilters::all();
        assert!(!f.toggle(FilterTag::Takeout));
        assert!(!f.contains(FilterTag::Takeout));
        assert!(f.toggle(FilterTag::Takeout));
        assert!(f.contains(FilterTag::Takeout));
    }

    #[test]
    fn serializes_as_list() {
        let f = filters(&[FilterTag::FastFood, FilterTag::DineIn]);
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"["dine_in","fast_food"]"#);
    }

    fn any_tag() -> impl Strategy<Value = FilterTag> {
        prop::sample::select(FilterTag::ALL.to_vec())
    }

    fn any_category() -> impl Strategy<Value = Category> {
        prop::sample::select(Category::ALL.to_vec())
    }

    fn any_filters() -> impl Strategy<Value = ActiveFilters> {
        prop::collection::vec(any_tag(), 0..4).prop_map(|tags| tags.into_iter().collect())
    }

    fn any_list() -> impl Strategy<Value = Vec<Restaurant>> {
        prop::collection::vec(("[a-z]{1,8}", any_category()), 0..20).prop_map(|items| {
            items
                .into_iter()
                .map(|(name, category)| restaurant(&name, category))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn toggle_twice_restores(f in any_filters(), tag in any_tag()) {
            let twice = f.toggled(tag).toggled(tag);
            prop_assert_eq!(twice.contains(tag), f.contains(tag));
            prop_assert_eq!(twice, f);
        }

        #[test]
        fn composite_law(f in any_filters()) {
            let r = restaurant("X", Category::DineInOrTakeout);
            let expected = f.contains(FilterTag::DineIn) || f.contains(FilterTag::Takeout);
            prop_assert_eq!(is_eligible(&r, &f), expected);
        }

        #[test]
        fn filter_pool_is_pure(list in any_list(), f in any_filters()) {
            let snapshot = list.clone();
            let first = filter_pool(&list, &f);
            let second = filter_pool(&list, &f);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&list, &snapshot);
        }

        #[test]
        fn filter_pool_is_ordered_subsequence(list in any_list(), f in any_filters()) {
            let pool = filter_pool(&list, &f);
            let expected: Vec<_> = list.iter().filter(|r| is_eligible(r, &f)).cloned().collect();
            prop_assert_eq!(pool, expected);
        }
    }
}
