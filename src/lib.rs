//! `phillips-curves` library crate.
//!
//! The binary (`phillips`) is a thin wrapper around this library so that:
//!
//! - the pipeline is testable without spawning processes or touching the network
//! - each stage (fetch, normalize, derive, present) is a plain function with
//!   explicit inputs and outputs

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
