//! Benchmark test specifications
//!
//! The battery is fixed: three `dd` block size/count pairs, largest block
//! first. Labels are printed verbatim next to each result.

use std::fmt;

use crate::util::units::parse_dd_size;

/// One `dd` test case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdSpec {
    /// Label printed with the result
    pub desc: &'static str,
    /// `bs=` operand, in dd's size syntax
    pub block: &'static str,
    /// `count=` operand
    pub count: u64,
}

impl DdSpec {
    /// Total bytes moved by this test
    pub fn total_bytes(&self) -> u64 {
        // Battery blocks are compile-time constants known to parse.
        parse_dd_size(self.block).unwrap_or(0) * self.count
    }

    /// `bs=` and `count=` operands
    pub fn operands(&self) -> [String; 2] {
        [format!("bs={}", self.block), format!("count={}", self.count)]
    }
}

impl fmt::Display for DdSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.desc)
    }
}

pub const T64M: DdSpec = DdSpec {
    desc: "DD: 64M blocks for a total of 1G",
    block: "64M",
    count: 1024 / 64,
};

pub const T1M: DdSpec = DdSpec {
    desc: "DD: 1M blocks for a total of 1G",
    block: "1M",
    count: 1024,
};

pub const T4K: DdSpec = DdSpec {
    desc: "DD: 4K blocks for a total of 1M",
    block: "4K",
    count: 1024 / 4,
};

/// Every test runs in this order, for writes and reads alike
pub const BATTERY: [DdSpec; 3] = [T64M, T1M, T4K];

/// Spec used to lay down the file each read test reads back
pub const READ_SOURCE: DdSpec = T64M;

/// Direction of a `dd` test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Read => "READ",
            Direction::Write => "WRITE",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
