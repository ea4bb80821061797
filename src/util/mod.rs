//! Utility functions module
//!
//! Contains helpers for units formatting and scope timing.

pub mod timer;
pub mod units;

// Re-export commonly used functions
pub use timer::Timer;
pub use units::{format_bytes, format_duration, parse_dd_size};
