//! Memoized filter results.

use std::sync::Arc;

use crate::models::{FilterSelection, Restaurant};
use crate::pipeline::filter;

/// Remembers the last filter run and reuses it while the restaurant list
/// (by identity) and the selection (by value) are unchanged.
#[derive(Debug, Default)]
pub struct FilterMemo {
    last: Option<Entry>,
    runs: usize,
}

#[derive(Debug)]
struct Entry {
    restaurants: Arc<[Restaurant]>,
    selection: FilterSelection,
    indices: Vec<usize>,
}

impl FilterMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filtered and sorted view of `restaurants`.
    pub fn get<'a>(
        &mut self,
        restaurants: &'a Arc<[Restaurant]>,
        selection: &FilterSelection,
    ) -> Vec<&'a Restaurant> {
        let fresh = match &self.last {
            Some(entry) => {
                Arc::ptr_eq(&entry.restaurants, restaurants) && entry.selection == *selection
            }
            None => false,
        };

        if !fresh {
            self.runs += 1;
            self.last = Some(Entry {
                restaurants: Arc::clone(restaurants),
                selection: selection.clone(),
                indices: filter::select_indices(restaurants, selection),
            });
        }

        self.last
            .as_ref()
            .map(|entry| entry.indices.iter().map(|&i| &restaurants[i]).collect())
            .unwrap_or_default()
    }

    /// How many times the filter actually ran.
    pub fn runs(&self) -> usize {
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::filter::fixtures::with_discounts;

    #[test]
    fn reuses_result_for_unchanged_inputs() {
        let list: Arc<[Restaurant]> = vec![with_discounts("A", &[10]), with_discounts("B", &[40])].into();
        let selection = FilterSelection::default();
        let mut memo = FilterMemo::new();

        let first: Vec<String> = memo.get(&list, &selection).iter().map(|r| r.object_id.clone()).collect();
        let second: Vec<String> = memo.get(&list, &selection).iter().map(|r| r.object_id.clone()).collect();

        assert_eq!(first, vec!["B", "A"]);
        assert_eq!(first, second);
        assert_eq!(memo.runs(), 1);
    }

    #[test]
    fn recomputes_when_selection_or_list_changes() {
        let list: Arc<[Restaurant]> = vec![with_discounts("A", &[10]), with_discounts("B", &[40])].into();
        let mut memo = FilterMemo::new();

        memo.get(&list, &FilterSelection::default());
        let narrowed = memo.get(&list, &FilterSelection::default().with_min_discount(20));
        assert_eq!(narrowed.len(), 1);
        assert_eq!(memo.runs(), 2);

        // Equal contents, different allocation: treated as a new list.
        let copy: Arc<[Restaurant]> = list.iter().cloned().collect::<Vec<_>>().into();
        memo.get(&copy, &FilterSelection::default().with_min_discount(20));
        assert_eq!(memo.runs(), 3);
    }
}
