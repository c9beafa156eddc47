//! Output helpers.
//!
//! - derived-series CSV export (`export`)

pub mod export;

pub use export::*;
