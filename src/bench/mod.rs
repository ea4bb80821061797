//! Benchmark engine module
//!
//! Contains the test driver, its phase tracker and the interrupt flag it
//! polls between tests.

pub mod cancel;
pub mod driver;
pub mod state;

// Re-export commonly used types
pub use cancel::Cancellation;
pub use driver::BenchmarkDriver;
pub use state::{Phase, PhaseTracker};
