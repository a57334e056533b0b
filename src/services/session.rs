// src/services/session.rs

//! Browsing session: fetch-once restaurant cache plus reducer-driven state.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::Result;
use crate::models::Restaurant;
use crate::pipeline::FilterMemo;
use crate::services::RestaurantSource;
use crate::store::{Action, SessionState, reduce};

/// Holds one session's state and loads restaurants from a source.
///
/// The list is fetched at most once per session while it is non-empty.
/// Concurrent first loads are serialized behind an async gate, so callers
/// that arrive while a fetch is in flight wait for it and reuse its result
/// instead of issuing their own request.
pub struct SessionStore<S> {
    source: S,
    state: RwLock<SessionState>,
    fetch_gate: tokio::sync::Mutex<()>,
    memo: Mutex<FilterMemo>,
}

impl<S: RestaurantSource> SessionStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(SessionState::default()),
            fetch_gate: tokio::sync::Mutex::new(()),
            memo: Mutex::new(FilterMemo::new()),
        }
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `action` and return the resulting state.
    pub fn dispatch(&self, action: Action) -> SessionState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *state = reduce(&state, action);
        state.clone()
    }

    /// Return the restaurant list, fetching it if the session has none.
    ///
    /// On failure the previous list is kept and the error message is
    /// recorded on the state.
    pub async fn load(&self) -> Result<Arc<[Restaurant]>> {
        let _gate = self.fetch_gate.lock().await;

        let current = self.snapshot();
        if !current.restaurants.is_empty() {
            log::debug!("Using {} cached restaurants", current.restaurants.len());
            return Ok(current.restaurants);
        }

        self.fetch().await
    }

    /// Fetch a fresh list even if one is cached, replacing it on success.
    pub async fn refresh(&self) -> Result<Arc<[Restaurant]>> {
        let _gate = self.fetch_gate.lock().await;
        self.fetch().await
    }

    /// Caller must hold `fetch_gate`.
    async fn fetch(&self) -> Result<Arc<[Restaurant]>> {
        self.dispatch(Action::FetchStarted);
        match self.source.fetch_all().await {
            Ok(restaurants) => Ok(self.dispatch(Action::FetchSucceeded(restaurants)).restaurants),
            Err(e) => {
                log::error!("Error fetching restaurants: {}", e);
                self.dispatch(Action::FetchFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Restaurants visible under the current selection, in display order.
    pub fn visible(&self) -> Vec<Restaurant> {
        let state = self.snapshot();
        let mut memo = self.memo.lock().unwrap_or_else(PoisonError::into_inner);
        memo.get(&state.restaurants, &state.selection)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Restaurant by object identifier, loading the list first if needed.
    pub async fn restaurant(&self, object_id: &str) -> Result<Option<Restaurant>> {
        let restaurants = self.load().await?;
        Ok(restaurants.iter().find(|r| r.object_id == object_id).cloned())
    }
}
