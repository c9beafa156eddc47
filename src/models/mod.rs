//! Projection models.
//!
//! - `phillips`: the three fixed Phillips-curve variants

pub mod phillips;

pub use phillips::*;
