// src/lib.rs

//! dealscout: restaurant deal browsing library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod presenter;
#[cfg(feature = "server")]
pub mod server;
pub mod services;
pub mod store;
pub mod utils;

#[cfg(test)]
mod testing;
