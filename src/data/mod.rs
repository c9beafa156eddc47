//! Data acquisition from the Ipeadata statistical API.

pub mod ipea;

pub use ipea::*;
