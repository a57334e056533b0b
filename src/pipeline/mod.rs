//! Filter/sort pipeline over an in-memory restaurant list.
//!
//! - `filter`: pure filtering and best-discount ordering
//! - `memo`: skips recomputation while inputs are unchanged

pub mod filter;
pub mod memo;

pub use filter::{apply, best_discount, count, is_drinks_venue, select_indices};
pub use memo::FilterMemo;
