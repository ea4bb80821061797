//! Benchmark phase tracking
//!
//! A run walks `Idle -> Confirming -> HdparmPhase -> WritePhase -> ReadPhase
//! -> Done` and never moves backwards. A fatal error leaves the tracker in
//! the phase that failed.

use std::fmt;

use log::debug;

/// Phases of one benchmark run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Nothing started yet
    #[default]
    Idle,
    /// Waiting for the operator to accept the device
    Confirming,
    /// Running the hdparm read probe
    HdparmPhase,
    /// Running dd write tests
    WritePhase,
    /// Running dd read tests
    ReadPhase,
    /// All tests finished
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Confirming => "confirming",
            Phase::HdparmPhase => "hdparm",
            Phase::WritePhase => "write",
            Phase::ReadPhase => "read",
            Phase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Forward-only phase tracker
#[derive(Debug)]
pub struct PhaseTracker {
    current: Phase,
    history: Vec<Phase>,
}

impl PhaseTracker {
    /// Create a tracker starting at `Idle`
    pub fn new() -> Self {
        Self {
            current: Phase::Idle,
            history: vec![Phase::Idle],
        }
    }

    /// Get the current phase
    pub fn current(&self) -> Phase {
        self.current
    }

    /// Every phase entered so far, in order
    pub fn history(&self) -> &[Phase] {
        &self.history
    }

    /// Enter `next`. Returns `false` and stays put if that would move
    /// backwards or re-enter the current phase.
    pub fn transition_to(&mut self, next: Phase) -> bool {
        if next <= self.current {
            debug!("Ignoring phase change {} -> {}", self.current, next);
            return false;
        }
        debug!("Phase {} -> {}", self.current, next);
        self.current = next;
        self.history.push(next);
        true
    }

    pub fn is_done(&self) -> bool {
        self.current == Phase::Done
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}
