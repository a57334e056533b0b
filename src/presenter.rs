// src/presenter.rs

//! Display helpers for restaurants, deals, and active filters.

use std::cmp::Reverse;

use crate::models::{Deal, DiningType, Restaurant};
use crate::store::{Action, SessionState};

/// Cuisine chips shown before collapsing the rest into a "+N" chip.
const MAX_CUISINE_CHIPS: usize = 3;

/// The deal to headline: the first with the highest non-zero discount.
pub fn best_deal(restaurant: &Restaurant) -> Option<&Deal> {
    restaurant.deals.iter().fold(None::<&Deal>, |best, deal| {
        let best_discount = best.map_or(0, |b| b.discount);
        if deal.discount > best_discount {
            Some(deal)
        } else {
            best
        }
    })
}

/// Deals ordered by discount, highest first; ties keep feed order.
pub fn deals_by_discount(restaurant: &Restaurant) -> Vec<&Deal> {
    let mut deals: Vec<&Deal> = restaurant.deals.iter().collect();
    deals.sort_by_key(|d| Reverse(d.discount));
    deals
}

/// Badge headline, e.g. "45% off".
pub fn discount_label(deal: &Deal) -> String {
    format!("{}% off", deal.discount)
}

/// Remaining quantity, e.g. "3 Deals Left".
pub fn quantity_label(deal: &Deal) -> String {
    format!("{} Deals Left", deal.qty_left)
}

/// Short caption for a deal card badge.
pub fn deal_summary(deal: &Deal) -> String {
    let dine_in = (deal.dine_in == Some(true)).then_some("Dine In");
    let arrive = deal
        .window
        .as_ref()
        .map(|w| format!("Arrive before {}", w.bounds().1));

    match (dine_in, arrive) {
        (Some(d), Some(a)) => format!("{d} - {a}"),
        (None, Some(a)) => a,
        (Some(d), None) => d.to_string(),
        (None, None) => "Anytime today".to_string(),
    }
}

/// Validity line for a deal detail card.
pub fn deal_time_range(deal: &Deal) -> String {
    match &deal.window {
        Some(window) => {
            let (from, to) = window.bounds();
            format!("Between {from} - {to}")
        }
        None => "Anytime today".to_string(),
    }
}

/// A removable summary of one active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    /// Action that clears this filter
    pub remove: Action,
}

/// Chips for every filter that narrows the default view.
pub fn active_chips(state: &SessionState) -> Vec<FilterChip> {
    let selection = &state.selection;
    let mut chips = Vec::new();

    let known = state.known_cuisines();
    if selection.cuisines.len() < known.len() {
        for cuisine in selection.cuisines.iter().take(MAX_CUISINE_CHIPS) {
            chips.push(FilterChip {
                label: cuisine.clone(),
                remove: Action::ToggleCuisine(cuisine.clone()),
            });
        }
        let remaining = selection.cuisines.len().saturating_sub(MAX_CUISINE_CHIPS);
        if remaining > 0 {
            chips.push(FilterChip {
                label: format!("+{remaining} cuisine{}", if remaining > 1 { "s" } else { "" }),
                remove: Action::ClearCuisines,
            });
        }
    }

    if selection.min_discount > 0 {
        chips.push(FilterChip {
            label: format!("Above {}%", selection.min_discount),
            remove: Action::SetMinDiscount(0),
        });
    }

    if selection.dining_type != DiningType::Everything {
        chips.push(FilterChip {
            label: selection.dining_type.label().to_string(),
            remove: Action::SetDiningType(DiningType::Everything),
        });
    }

    chips
}
