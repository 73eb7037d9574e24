//! Text presentation layer for the bikeshare explorer.
//!
//! Renders the trip reports and the paged raw-row table as plain strings;
//! the binary decides where they are written.

pub mod report_view;
pub mod table_view;

pub use bikeshare_core as core;
