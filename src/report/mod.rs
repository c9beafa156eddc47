//! Formatted terminal output for the `report` subcommand.

pub mod format;

pub use format::*;
