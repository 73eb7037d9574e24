//! Data layer for the bikeshare explorer.
//!
//! Loads city trip CSVs, derives calendar fields, applies month / weekday
//! filters and computes the trip reports.

pub mod aggregator;
pub mod analysis;
pub mod preparer;
pub mod reader;

pub use bikeshare_core as core;
