//! I/O operations module
//!
//! Contains the external command runner and the scratch file guard used by
//! the read and write tests.

pub mod runner;
pub mod testfile;

pub use runner::{args, operand, CommandLine, CommandOutput, CommandRunner, SystemRunner};
pub use testfile::TestFile;
