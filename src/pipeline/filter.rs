// src/pipeline/filter.rs

//! Restaurant filter/sort engine.
//!
//! Filters are an unordered conjunction of independent predicates; each one
//! is skipped when its input is at the no-op value. Survivors are then
//! stably sorted by best discount, highest first.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::models::{DiningType, FilterSelection, Restaurant};

/// Cuisine substrings that mark a drinks venue.
const DRINK_MARKERS: [&str; 4] = ["drink", "bar", "beer", "wine"];

/// Best discount of a restaurant: the highest deal discount, 0 without deals.
pub fn best_discount(restaurant: &Restaurant) -> u32 {
    restaurant
        .deals
        .iter()
        .map(|d| d.discount)
        .max()
        .unwrap_or(0)
}

/// Apply `selection` to `restaurants` and return the survivors in display order.
///
/// Pure: the input slice is not modified and repeated calls with the same
/// arguments return the same sequence.
pub fn apply<'a>(restaurants: &'a [Restaurant], selection: &FilterSelection) -> Vec<&'a Restaurant> {
    select_indices(restaurants, selection)
        .into_iter()
        .map(|i| &restaurants[i])
        .collect()
}

/// Same as [`apply`], returning positions into `restaurants`.
pub fn select_indices(restaurants: &[Restaurant], selection: &FilterSelection) -> Vec<usize> {
    let query = selection.query.trim().to_lowercase();

    let mut matched: Vec<usize> = restaurants
        .iter()
        .enumerate()
        .filter(|(_, r)| query.is_empty() || matches_query(r, &query))
        .filter(|(_, r)| selection.cuisines.is_empty() || matches_cuisines(r, &selection.cuisines))
        .filter(|(_, r)| selection.suburbs.is_empty() || selection.suburbs.contains(&r.suburb))
        .filter(|(_, r)| selection.min_discount == 0 || best_discount(r) >= selection.min_discount)
        .filter(|(_, r)| matches_dining_type(r, selection.dining_type))
        .map(|(i, _)| i)
        .collect();

    // Stable: equal keys keep their filtered order.
    matched.sort_by_key(|&i| sort_key(&restaurants[i]));
    matched
}

/// Highest best discount first; among equal discounts, restaurants with
/// deals precede restaurants without any.
fn sort_key(restaurant: &Restaurant) -> Reverse<(u32, bool)> {
    Reverse((best_discount(restaurant), !restaurant.deals.is_empty()))
}

/// Case-insensitive substring match on name or any cuisine.
/// `query` must already be lowercased.
fn matches_query(restaurant: &Restaurant, query: &str) -> bool {
    restaurant.name.to_lowercase().contains(query)
        || restaurant
            .cuisines
            .iter()
            .any(|c| c.to_lowercase().contains(query))
}

fn matches_cuisines(restaurant: &Restaurant, selected: &BTreeSet<String>) -> bool {
    restaurant.cuisines.iter().any(|c| selected.contains(c))
}

fn matches_dining_type(restaurant: &Restaurant, dining_type: DiningType) -> bool {
    match dining_type {
        DiningType::Everything => true,
        DiningType::DineIn => restaurant.has_dine_in_deal(),
        DiningType::Takeaway => restaurant.has_takeaway_deal(),
        DiningType::Drinks => is_drinks_venue(restaurant),
        DiningType::VenueOfTheWeek => restaurant.has_lightning_deal(),
    }
}

/// Whether any cuisine tag names a drinks venue.
pub fn is_drinks_venue(restaurant: &Restaurant) -> bool {
    restaurant.cuisines.iter().any(|c| {
        let c = c.to_lowercase();
        DRINK_MARKERS.iter().any(|m| c.contains(m))
    })
}

/// Number of restaurants `selection` would keep.
pub fn count(restaurants: &[Restaurant], selection: &FilterSelection) -> usize {
    apply(restaurants, selection).len()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{Deal, Restaurant};

    pub fn deal(discount: u32, dine_in: bool, lightning: bool) -> Deal {
        Deal {
            object_id: format!("D{discount}"),
            discount,
            dine_in: Some(dine_in),
            lightning,
            window: None,
            qty_left: 5,
        }
    }

    pub fn restaurant(id: &str, name: &str, suburb: &str, cuisines: &[&str], deals: Vec<Deal>) -> Restaurant {
        Restaurant {
            object_id: id.to_string(),
            name: name.to_string(),
            address1: format!("{id} Example St"),
            suburb: suburb.to_string(),
            open: "11:00am".to_string(),
            close: "9:00pm".to_string(),
            image_link: format!("https://img.example.com/{id}.jpg"),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
            deals,
        }
    }

    pub fn with_discounts(id: &str, discounts: &[u32]) -> Restaurant {
        restaurant(
            id,
            id,
            "Richmond",
            &["Cafe"],
            discounts.iter().map(|&d| deal(d, true, false)).collect(),
        )
    }
}
