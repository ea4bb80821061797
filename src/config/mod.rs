//! Configuration management module
//!
//! Handles loading and validation of the tool paths and output preferences.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DiskSpeedError, Result, APP_NAME, CONFIG_FILE};

/// Absolute paths of the external programs the benchmark drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    /// USB device lister
    pub lsusb: PathBuf,
    /// Mount table query
    pub findmnt: PathBuf,
    /// Device property database query
    pub udevadm: PathBuf,
    /// Cached/disk read timing probe
    pub hdparm: PathBuf,
    /// Block copy tool used for read and write tests
    pub dd: PathBuf,
    /// Shell used for the cache-drop write
    pub shell: PathBuf,
    /// Kernel page cache control file
    pub drop_caches: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            lsusb: PathBuf::from("/usr/bin/lsusb"),
            findmnt: PathBuf::from("/usr/bin/findmnt"),
            udevadm: PathBuf::from("/usr/bin/udevadm"),
            hdparm: PathBuf::from("/usr/sbin/hdparm"),
            dd: PathBuf::from("/usr/bin/dd"),
            shell: PathBuf::from("/bin/sh"),
            drop_caches: PathBuf::from("/proc/sys/vm/drop_caches"),
        }
    }
}

impl ToolPaths {
    fn entries(&self) -> [(&'static str, &Path); 7] {
        [
            ("lsusb", self.lsusb.as_path()),
            ("findmnt", self.findmnt.as_path()),
            ("udevadm", self.udevadm.as_path()),
            ("hdparm", self.hdparm.as_path()),
            ("dd", self.dd.as_path()),
            ("shell", self.shell.as_path()),
            ("drop_caches", self.drop_caches.as_path()),
        ]
    }
}

/// Console output preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Show a spinner on stderr while a test runs
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { progress: true }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolPaths,
    pub output: OutputConfig,
}

impl Config {
    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        for (name, path) in self.tools.entries() {
            if path.as_os_str().is_empty() {
                return Err(DiskSpeedError::Config(format!("{} path is empty", name)));
            }
            if !path.is_absolute() {
                return Err(DiskSpeedError::Config(format!(
                    "{} path must be absolute: {}",
                    name,
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Set whether the progress spinner is shown
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.output.progress = progress;
        self
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            DiskSpeedError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            DiskSpeedError::Config(msg) => {
                DiskSpeedError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Load configuration from `explicit`, or from the standard config file
    /// location. Returns default configuration if neither exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::config_file_path() {
            Ok(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/diskspeed/diskspeed.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            DiskSpeedError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
