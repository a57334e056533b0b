// src/models/mod.rs

//! Domain models for the deal browser.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod restaurant;
mod selection;

// Re-export all public types
pub use config::{Config, LoggingConfig, ServerConfig, UpstreamConfig};
pub use restaurant::{
    Deal, DealWindow, RawDeal, RawRestaurant, Restaurant, parse_bool, parse_clock, parse_count, parse_flag,
};
pub use selection::{DiningType, FilterSelection, MAX_MIN_DISCOUNT};
