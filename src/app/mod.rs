//! Application module
//!
//! Wires device resolution, the confirmation prompt and the benchmark
//! driver into one run.

#[allow(clippy::module_inception)]
pub mod app;

pub use app::{ensure_root, App, Outcome, RunOptions};
