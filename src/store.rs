// src/store.rs

//! Session state and its reducer.
//!
//! State is never mutated in place: every transition takes the previous
//! state and an [`Action`] and returns a new [`SessionState`]. The
//! restaurant list is shared behind an `Arc`, so transitions that only
//! touch the selection are cheap.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::models::{DiningType, FilterSelection, MAX_MIN_DISCOUNT, Restaurant};
use crate::pipeline::filter;

/// Where the restaurant fetch stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    /// Last fetch failed with this message
    Failed(String),
    Ready,
}

/// A discrete state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchStarted,
    FetchSucceeded(Vec<Restaurant>),
    FetchFailed(String),
    ToggleCuisine(String),
    ToggleSuburb(String),
    /// "Show all" cuisines: clear if everything is selected, else select all
    ToggleAllCuisines,
    /// "Show all" suburbs: clear if everything is selected, else select all
    ToggleAllSuburbs,
    SetCuisines(BTreeSet<String>),
    ClearCuisines,
    SetSuburbs(BTreeSet<String>),
    ClearSuburbs,
    SetMinDiscount(u32),
    SetDiningType(DiningType),
    SetQuery(String),
    ResetFilters,
}

/// Everything a browsing session holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub restaurants: Arc<[Restaurant]>,
    pub status: FetchStatus,
    pub selection: FilterSelection,
    /// Set once the select-all defaults have been applied
    pub defaults_applied: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            restaurants: Arc::from(Vec::new()),
            status: FetchStatus::Idle,
            selection: FilterSelection::default(),
            defaults_applied: false,
        }
    }
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Message of the last failed fetch.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Every cuisine in the list, sorted and unique.
    pub fn known_cuisines(&self) -> BTreeSet<String> {
        known_cuisines(&self.restaurants)
    }

    /// Every non-empty suburb in the list, sorted and unique.
    pub fn known_suburbs(&self) -> BTreeSet<String> {
        known_suburbs(&self.restaurants)
    }

    /// Restaurant by object identifier.
    pub fn find(&self, object_id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.object_id == object_id)
    }

    /// Restaurants the current selection keeps, in display order.
    pub fn visible(&self) -> Vec<&Restaurant> {
        filter::apply(&self.restaurants, &self.selection)
    }

    /// Size of [`SessionState::visible`].
    pub fn filtered_count(&self) -> usize {
        filter::count(&self.restaurants, &self.selection)
    }
}

/// Apply `action` to `state`, returning the next state.
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    let mut next = state.clone();

    match action {
        Action::FetchStarted => {
            next.status = FetchStatus::Loading;
        }
        Action::FetchSucceeded(restaurants) => {
            next.restaurants = Arc::from(restaurants);
            next.status = FetchStatus::Ready;
            apply_first_load_defaults(&mut next);
        }
        Action::FetchFailed(message) => {
            next.status = FetchStatus::Failed(message);
        }
        Action::ToggleCuisine(cuisine) => toggle(&mut next.selection.cuisines, cuisine),
        Action::ToggleSuburb(suburb) => toggle(&mut next.selection.suburbs, suburb),
        Action::ToggleAllCuisines => {
            let all = state.known_cuisines();
            next.selection.cuisines = if next.selection.cuisines == all {
                BTreeSet::new()
            } else {
                all
            };
        }
        Action::ToggleAllSuburbs => {
            let all = state.known_suburbs();
            next.selection.suburbs = if next.selection.suburbs == all {
                BTreeSet::new()
            } else {
                all
            };
        }
        Action::SetCuisines(cuisines) => next.selection.cuisines = cuisines,
        Action::ClearCuisines => next.selection.cuisines.clear(),
        Action::SetSuburbs(suburbs) => next.selection.suburbs = suburbs,
        Action::ClearSuburbs => next.selection.suburbs.clear(),
        Action::SetMinDiscount(value) => {
            next.selection.min_discount = value.min(MAX_MIN_DISCOUNT);
        }
        Action::SetDiningType(dining_type) => next.selection.dining_type = dining_type,
        Action::SetQuery(query) => next.selection.query = query,
        Action::ResetFilters => {
            next.selection = FilterSelection {
                cuisines: state.known_cuisines(),
                suburbs: state.known_suburbs(),
                query: next.selection.query,
                ..FilterSelection::default()
            };
        }
    }

    next
}

/// One-time select-all: fires the first time the list is non-empty,
/// and only for sets the user has not touched yet.
fn apply_first_load_defaults(state: &mut SessionState) {
    if state.defaults_applied || state.restaurants.is_empty() {
        return;
    }
    if state.selection.cuisines.is_empty() {
        state.selection.cuisines = known_cuisines(&state.restaurants);
    }
    if state.selection.suburbs.is_empty() {
        state.selection.suburbs = known_suburbs(&state.restaurants);
    }
    state.defaults_applied = true;
}

fn toggle(set: &mut BTreeSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

fn known_cuisines(restaurants: &[Restaurant]) -> BTreeSet<String> {
    restaurants
        .iter()
        .flat_map(|r| r.cuisines.iter().cloned())
        .collect()
}

fn known_suburbs(restaurants: &[Restaurant]) -> BTreeSet<String> {
    restaurants
        .iter()
        .filter(|r| !r.suburb.is_empty())
        .map(|r| r.suburb.clone())
        .collect()
}
