//! Numeric building blocks: lagged percentage change, means, and date joins.

pub mod align;
pub mod stats;
pub mod yoy;

pub use align::*;
pub use stats::*;
pub use yoy::*;
