use std::time::{Duration, Instant};

use log::debug;

use super::units::format_duration;

/// Logs how long a scope took when dropped
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("'{}' took {}", self.name, format_duration(self.elapsed()));
    }
}
