//! Main application controller
//!
//! Resolves the device, asks for confirmation and hands over to the
//! benchmark driver.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use log::info;

use crate::{
    bench::{BenchmarkDriver, Cancellation, Phase},
    config::Config,
    device,
    io::CommandRunner,
    models::BenchmarkReport,
    prompt, DiskSpeedError, Result,
};

/// Per-run options taken from the command line
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Writable path on the device under test
    pub mount_path: PathBuf,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

/// How a run ended without error
#[derive(Debug)]
pub enum Outcome {
    /// Every test ran
    Completed(BenchmarkReport),
    /// The operator declined the device
    Declined,
}

/// Benchmark application
pub struct App<R: CommandRunner> {
    config: Config,
    options: RunOptions,
    driver: BenchmarkDriver<R>,
}

impl<R: CommandRunner> App<R> {
    /// Create a new application instance
    pub fn new(runner: R, config: Config, options: RunOptions, cancel: Cancellation) -> Self {
        let driver = BenchmarkDriver::new(runner, config.tools.clone(), cancel)
            .with_progress(config.output.progress);
        Self {
            config,
            options,
            driver,
        }
    }

    /// Phase the run reached
    pub fn phase(&self) -> Phase {
        self.driver.phase()
    }

    /// Every phase the run went through
    pub fn phase_history(&self) -> &[Phase] {
        self.driver.phase_history()
    }

    /// Run resolution, confirmation and the full test battery
    pub fn run<I: BufRead, W: Write>(&mut self, input: &mut I, output: &mut W) -> Result<Outcome> {
        let mount_path = device::canonical_mount_path(&self.options.mount_path)?;
        let identity = {
            let runner = self.driver.runner();
            device::resolve(runner, &self.config.tools, &mount_path)?
        };

        self.driver.begin_confirmation();
        if !prompt::confirm_device(input, output, &identity, self.options.assume_yes)? {
            info!("Not testing {}", identity);
            return Ok(Outcome::Declined);
        }

        writeln!(output, "Testing device '{}'\n", identity)?;
        output.flush()?;

        let report = self.driver.run(&identity, &mount_path, output)?;
        Ok(Outcome::Completed(report))
    }
}

/// Fail unless running with an effective uid of 0
pub fn ensure_root() -> Result<()> {
    if is_root() {
        Ok(())
    } else {
        Err(DiskSpeedError::Precondition(
            "this needs to be run as root".to_string(),
        ))
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    false
}
