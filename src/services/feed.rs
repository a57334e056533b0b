// src/services/feed.rs

//! Upstream feed client.
//!
//! Fetches the full restaurant list in one request and normalizes it into
//! [`Restaurant`] records. There is no retry; failures go to the caller.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{RawRestaurant, Restaurant, UpstreamConfig};
use crate::utils::http;

/// Anything that can produce the full restaurant list.
#[async_trait]
pub trait RestaurantSource: Send + Sync {
    /// Fetch every restaurant, in feed order.
    async fn fetch_all(&self) -> Result<Vec<Restaurant>>;
}

/// Client for the upstream JSON feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    url: String,
}

impl FeedClient {
    /// Create a feed client from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self::with_client(http::create_async_client(config)?, &config.url))
    }

    /// Create a feed client around an existing HTTP client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the upstream body without interpreting it.
    ///
    /// Non-success statuses become [`AppError::Fetch`].
    pub async fn fetch_raw(&self) -> Result<Vec<u8>> {
        log::debug!("GET {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Upstream {} answered {}", self.url, status);
            return Err(AppError::fetch(
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl RestaurantSource for FeedClient {
    async fn fetch_all(&self) -> Result<Vec<Restaurant>> {
        let body = self.fetch_raw().await?;
        let restaurants = parse_feed(&body)?;
        log::info!("Fetched {} restaurants from {}", restaurants.len(), self.url);
        Ok(restaurants)
    }
}

/// Parse a feed body into restaurants.
///
/// A body that is not JSON is an error. A missing or non-array
/// `restaurants` key yields an empty list. Entries that are not objects are
/// skipped; malformed fields inside a record fall back to defaults. Only the
/// first record per object identifier is kept. Records without an identifier
/// are all kept.
pub fn parse_feed(body: &[u8]) -> Result<Vec<Restaurant>> {
    let mut payload: Value = serde_json::from_slice(body)?;

    let records = match payload.get_mut("restaurants").map(Value::take) {
        Some(Value::Array(records)) => records,
        _ => {
            log::debug!("Feed has no restaurants array; treating as empty");
            return Ok(Vec::new());
        }
    };

    let mut seen = HashSet::new();
    let mut restaurants = Vec::with_capacity(records.len());

    for (position, record) in records.into_iter().enumerate() {
        let raw = match serde_json::from_value::<RawRestaurant>(record) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Skipping restaurant #{}: {}", position, e);
                continue;
            }
        };

        let restaurant = Restaurant::from(raw);
        if restaurant.object_id.is_empty() {
            log::warn!("Restaurant #{} has no objectId", position);
        } else if !seen.insert(restaurant.object_id.clone()) {
            log::warn!(
                "Skipping duplicate restaurant id '{}' at #{}",
                restaurant.object_id,
                position
            );
            continue;
        }
        restaurants.push(restaurant);
    }

    Ok(restaurants)
}
