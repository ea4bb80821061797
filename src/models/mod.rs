//! Data models module
//!
//! Contains the fixed test battery, device identities and result records.

pub mod device;
pub mod result;
pub mod spec;

// Re-export commonly used types
pub use device::{DeviceIdentity, UsbDevice};
pub use result::{BenchmarkReport, DdResult, HdparmResult};
pub use spec::{DdSpec, Direction, BATTERY, READ_SOURCE};
