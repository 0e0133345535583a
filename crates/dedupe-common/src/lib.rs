//! Shared utilities for the dedupe preparation crates.
//!
//! This crate provides the Polars cell helpers used across the workspace:
//! stringifying heterogeneous cells and extracting floats.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{MISSING_TEXT, any_to_f64, any_to_text, format_float, parse_f64};
