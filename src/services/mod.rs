//! Service layer for the deal browser.
//!
//! This module contains:
//! - Upstream feed access (`FeedClient`, `RestaurantSource`)
//! - Session state with a fetch-once cache (`SessionStore`)

mod feed;
mod session;

pub use feed::{FeedClient, RestaurantSource, parse_feed};
pub use session::SessionStore;
