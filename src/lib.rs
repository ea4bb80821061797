//! diskspeed - raw disk throughput benchmark
//!
//! Resolves the block device behind a mount path and measures its read and
//! write throughput by driving `hdparm` and `dd`, printing each result as
//! soon as the tool reports it.

use std::fmt;
use std::path::PathBuf;

pub mod app;
pub mod bench;
pub mod config;
pub mod device;
pub mod io;
pub mod logging;
pub mod models;
pub mod parse;
pub mod prompt;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

// Common error types
#[derive(Debug)]
pub enum DiskSpeedError {
    /// Startup requirement not met (not root, mount path missing)
    Precondition(String),
    /// Mount table or device property lookup failed
    Resolution(String),
    /// External tool could not be spawned or exited non-zero
    ExternalCommand {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when spawning failed or a signal killed the child
        status: Option<i32>,
        /// Captured stdout and stderr
        output: String,
    },
    /// Tool output did not have the expected structure
    Parse(String),
    /// Read test found no file to read back
    TestFileMissing(PathBuf),
    /// Confirmation prompt could not be answered
    Confirmation(String),
    /// Configuration file unreadable or invalid
    Config(String),
    /// Local I/O operation failed
    Io(std::io::Error),
    /// Operator interrupted the run
    Cancelled,
}

impl fmt::Display for DiskSpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskSpeedError::Precondition(msg) => write!(f, "Precondition failed: {}", msg),
            DiskSpeedError::Resolution(msg) => write!(f, "Couldn't find device: {}", msg),
            DiskSpeedError::ExternalCommand {
                command,
                status,
                output,
            } => {
                match status {
                    Some(code) => write!(f, "Command '{}' exited with status {}", command, code)?,
                    None => write!(f, "Command '{}' did not complete", command)?,
                }
                if !output.trim().is_empty() {
                    write!(f, ":\n{}", output.trim_end())?;
                }
                Ok(())
            }
            DiskSpeedError::Parse(msg) => write!(f, "Unexpected tool output: {}", msg),
            DiskSpeedError::TestFileMissing(path) => {
                write!(f, "No test file present to read: {}", path.display())
            }
            DiskSpeedError::Confirmation(msg) => write!(f, "Confirmation failed: {}", msg),
            DiskSpeedError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DiskSpeedError::Io(err) => write!(f, "I/O error: {}", err),
            DiskSpeedError::Cancelled => write!(f, "Interrupted"),
        }
    }
}

impl std::error::Error for DiskSpeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiskSpeedError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DiskSpeedError {
    fn from(err: std::io::Error) -> Self {
        DiskSpeedError::Io(err)
    }
}

impl From<toml::de::Error> for DiskSpeedError {
    fn from(err: toml::de::Error) -> Self {
        DiskSpeedError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for DiskSpeedError {
    fn from(err: toml::ser::Error) -> Self {
        DiskSpeedError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for diskspeed operations
pub type Result<T> = std::result::Result<T, DiskSpeedError>;

/// Error handling utilities
pub mod error {
    use super::DiskSpeedError;

    /// Process exit status for a run that ended with `error`
    ///
    /// An interrupt is a quiet, successful exit. Everything else is fatal.
    pub fn exit_code(error: &DiskSpeedError) -> i32 {
        match error {
            DiskSpeedError::Cancelled => 0,
            _ => 1,
        }
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &DiskSpeedError) -> String {
        match error {
            DiskSpeedError::Precondition(msg) if msg.contains("root") => {
                "This needs to be run as root. Use sudo!".to_string()
            }
            DiskSpeedError::Resolution(_) => {
                "Could not resolve the device. Check that the path is on a mounted filesystem."
                    .to_string()
            }
            DiskSpeedError::ExternalCommand { command, .. } => {
                format!("'{}' failed. Check that the tool is installed and the device is writable.", command)
            }
            DiskSpeedError::TestFileMissing(_) => {
                "The test file disappeared before it could be read. Check free space on the device."
                    .to_string()
            }
            DiskSpeedError::Config(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            DiskSpeedError::Cancelled => "Operation was cancelled by user.".to_string(),
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "diskspeed";
pub const CONFIG_FILE: &str = "diskspeed.toml";
pub const TEST_FILE_PREFIX: &str = "dd-test-";
