use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{DiskSpeedError, Result};

#[derive(Debug, Default)]
struct Flags {
    cancelled: AtomicBool,
    deferred: AtomicBool,
}

/// Shared interrupt flag between the signal listener and the driver
///
/// Until [`Cancellation::defer_exit`] is called an interrupt may end the
/// process on the spot. Afterwards the driver owns test files on disk and
/// polls [`Cancellation::check`] so they are removed before exiting.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flags: Arc<Flags>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interrupt
    pub fn cancel(&self) {
        self.flags.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flags.cancelled.load(Ordering::SeqCst)
    }

    /// Ask the signal listener to leave exiting to the driver
    pub fn defer_exit(&self) {
        self.flags.deferred.store(true, Ordering::SeqCst);
    }

    /// Whether the process may exit immediately on interrupt
    pub fn exit_immediately(&self) -> bool {
        !self.flags.deferred.load(Ordering::SeqCst)
    }

    /// React to one interrupt, returning whether the process should exit now
    ///
    /// Exits right away while no test file can exist yet, and on a repeated
    /// interrupt. Otherwise only records it for the driver to act on.
    pub fn on_interrupt(&self) -> bool {
        if self.exit_immediately() {
            return true;
        }
        self.flags.cancelled.swap(true, Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once an interrupt was recorded
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(DiskSpeedError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Map a failure that happened after an interrupt to `Cancelled`
    ///
    /// Children share the terminal's process group and die from the same
    /// SIGINT, so their failure is a consequence of the interrupt.
    pub fn explain(&self, error: DiskSpeedError) -> DiskSpeedError {
        if self.is_cancelled() {
            DiskSpeedError::Cancelled
        } else {
            error
        }
    }
}
