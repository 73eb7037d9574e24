//! Shared domain types for the bikeshare explorer.
//!
//! Holds the fixed city / month / weekday enumerations, the trip and dataset
//! model, the error taxonomy, CLI settings and small formatting helpers.

pub mod catalog;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};
