//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the source indicators and their series identifiers (`Indicator`)
//! - dated value sequences and the inclusive analysis window (`Series`, `Window`)
//! - the derived inflation series kinds (`DerivedKind`)
//! - the run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;
