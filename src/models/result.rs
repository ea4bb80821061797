//! Benchmark result data models
//!
//! Results carry the throughput text exactly as the tool printed it. No unit
//! conversion happens anywhere.

use std::fmt;
use std::time::Duration;

use super::spec::{DdSpec, Direction};
use crate::util::units::format_duration;

/// Outcome of one `dd` test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdResult {
    pub spec: DdSpec,
    pub direction: Direction,
    /// Last comma-separated segment of dd's summary line, e.g. `458 MB/s`
    pub throughput: String,
    /// Wall time around the whole test
    pub elapsed: Duration,
}

impl DdResult {
    pub fn new(spec: DdSpec, direction: Direction, throughput: String, elapsed: Duration) -> Self {
        Self {
            spec,
            direction,
            throughput,
            elapsed,
        }
    }

    /// One-line summary including the wall time, for debug logs
    pub fn summary(&self) -> String {
        format!("{} in {}", self, format_duration(self.elapsed))
    }
}

/// Renders the console line, e.g. `WRITE: DD: 1M blocks for a total of 1G = 458 MB/s`
impl fmt::Display for DdResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {}", self.direction, self.spec.desc, self.throughput)
    }
}

/// Timings lifted from one `hdparm -Tt --direct` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HdparmResult {
    /// Page-cache-warmed read speed, empty when hdparm did not report it
    pub cached: String,
    /// Cold disk read speed, empty when hdparm did not report it
    pub disk: String,
}

impl HdparmResult {
    /// Console lines for both timings
    pub fn lines(&self) -> [String; 2] {
        [
            format!("READ: hdparm o_direct cached = {}", self.cached),
            format!("READ: hdparm o_direct disk = {}", self.disk),
        ]
    }
}

/// Everything one run measured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkReport {
    pub hdparm: HdparmResult,
    pub writes: Vec<DdResult>,
    pub reads: Vec<DdResult>,
}

impl BenchmarkReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of dd tests completed
    pub fn dd_count(&self) -> usize {
        self.writes.len() + self.reads.len()
    }
}
