//! Benchmark driver
//!
//! Runs the hdparm probe once, then the write battery, then the read
//! battery, printing every result line the moment its test finishes.
//! Each dd test gets its own scratch file that is removed when the test
//! returns, whether the tool succeeded or not.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error};

use super::cancel::Cancellation;
use super::state::{Phase, PhaseTracker};
use crate::config::ToolPaths;
use crate::io::{args, operand, CommandOutput, CommandRunner, TestFile};
use crate::models::{
    BenchmarkReport, DdResult, DdSpec, DeviceIdentity, Direction, HdparmResult, BATTERY,
    READ_SOURCE,
};
use crate::parse;
use crate::util::{format_bytes, Timer};
use crate::{DiskSpeedError, Result};

/// Extra dd operands for write tests: bypass the page cache, fsync once at the end
const DD_WRITE_FLAGS: [&str; 2] = ["oflag=direct", "conv=fsync"];
const DD_ZERO_SOURCE: &str = "if=/dev/zero";
const DD_NULL_SINK: &str = "of=/dev/null";

/// Sequences the fixed test battery against one device
pub struct BenchmarkDriver<R: CommandRunner> {
    runner: R,
    tools: ToolPaths,
    cancel: Cancellation,
    tracker: PhaseTracker,
    progress: bool,
}

impl<R: CommandRunner> BenchmarkDriver<R> {
    /// Create a new driver
    pub fn new(runner: R, tools: ToolPaths, cancel: Cancellation) -> Self {
        Self {
            runner,
            tools,
            cancel,
            tracker: PhaseTracker::new(),
            progress: false,
        }
    }

    /// Show a spinner on stderr while each test runs
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub(crate) fn runner(&self) -> &R {
        &self.runner
    }

    /// Get the current phase
    pub fn phase(&self) -> Phase {
        self.tracker.current()
    }

    /// Every phase entered so far
    pub fn phase_history(&self) -> &[Phase] {
        self.tracker.history()
    }

    /// Mark the start of device confirmation
    pub fn begin_confirmation(&mut self) {
        self.tracker.transition_to(Phase::Confirming);
    }

    /// Run every test against `identity`, writing scratch files under `mount_path`
    pub fn run<W: Write>(
        &mut self,
        identity: &DeviceIdentity,
        mount_path: &Path,
        out: &mut W,
    ) -> Result<BenchmarkReport> {
        // From here on test files may exist, so interrupts must go through us.
        self.cancel.defer_exit();
        let mut report = BenchmarkReport::new();

        self.cancel.check()?;
        self.tracker.transition_to(Phase::HdparmPhase);
        {
            let _timer = Timer::start("hdparm test");
            report.hdparm = self.run_hdparm(&identity.device)?;
            for line in report.hdparm.lines() {
                emit(out, &line)?;
            }
        }

        self.tracker.transition_to(Phase::WritePhase);
        for spec in BATTERY {
            self.cancel.check()?;
            let result = self.run_write(mount_path, spec)?;
            emit(out, &result.to_string())?;
            report.writes.push(result);
        }

        self.tracker.transition_to(Phase::ReadPhase);
        for spec in BATTERY {
            self.cancel.check()?;
            let result = self.run_read(mount_path, spec)?;
            emit(out, &result.to_string())?;
            report.reads.push(result);
        }

        self.tracker.transition_to(Phase::Done);
        Ok(report)
    }

    /// Direct-I/O read probe covering cached and cold disk reads
    pub fn run_hdparm(&self, device: &str) -> Result<HdparmResult> {
        let spinner = self.spinner("hdparm o_direct read timing");
        let output = self
            .runner
            .run(&self.tools.hdparm, &args(["-Tt", "--direct", device]));
        spinner.finish_and_clear();

        let output = output.map_err(|e| self.cancel.explain(e))?;
        Ok(parse::hdparm_timings(&output.combined()))
    }

    /// Write a fresh file with `spec` using direct I/O and a final fsync
    pub fn run_write(&self, mount_path: &Path, spec: DdSpec) -> Result<DdResult> {
        let test_file = TestFile::in_dir(mount_path);
        let timer = Timer::start(spec.desc);
        debug!(
            "Writing {} to {}",
            format_bytes(spec.total_bytes()),
            test_file.path().display()
        );

        let spinner = self.spinner(&format!("WRITE: {}", spec.desc));
        let output = self.dd_fill(&test_file, spec, true);
        spinner.finish_and_clear();

        let output = output.map_err(|e| {
            let e = self.cancel.explain(e);
            if !matches!(e, DiskSpeedError::Cancelled) {
                error!("Could not write to test file {}", test_file.path().display());
            }
            e
        })?;

        let throughput = parse::dd_throughput(&output.combined())?;
        Ok(DdResult::new(spec, Direction::Write, throughput, timer.elapsed()))
    }

    /// Lay down a 1 GiB file, drop the page cache, read it back with `spec`
    pub fn run_read(&self, mount_path: &Path, spec: DdSpec) -> Result<DdResult> {
        let test_file = TestFile::in_dir(mount_path);

        let spinner = self.spinner(&format!("READ: {}", spec.desc));
        let result = self.read_back(&test_file, spec);
        spinner.finish_and_clear();

        result.map_err(|e| {
            let e = self.cancel.explain(e);
            if !matches!(e, DiskSpeedError::Cancelled) {
                error!("Could not read test file {}", test_file.path().display());
            }
            e
        })
    }

    fn read_back(&self, test_file: &TestFile, spec: DdSpec) -> Result<DdResult> {
        debug!(
            "Preparing {} read source {}",
            format_bytes(READ_SOURCE.total_bytes()),
            test_file.path().display()
        );
        self.dd_fill(test_file, READ_SOURCE, false)?;
        if !test_file.exists() {
            return Err(DiskSpeedError::TestFileMissing(test_file.path().to_owned()));
        }

        self.cancel.check()?;
        self.drop_caches()?;

        let timer = Timer::start(spec.desc);
        let mut argv = vec![operand("if=", test_file.path()), OsString::from(DD_NULL_SINK)];
        argv.extend(spec.operands().map(OsString::from));
        let output = self.runner.run(&self.tools.dd, &argv)?;
        let elapsed = timer.elapsed();

        let throughput = parse::dd_throughput(&output.combined())?;
        Ok(DdResult::new(spec, Direction::Read, throughput, elapsed))
    }

    /// Fill `test_file` with zeros, optionally with the write-test flags
    fn dd_fill(&self, test_file: &TestFile, spec: DdSpec, direct: bool) -> Result<CommandOutput> {
        let mut argv = vec![OsString::from(DD_ZERO_SOURCE), operand("of=", test_file.path())];
        argv.extend(spec.operands().map(OsString::from));
        if direct {
            argv.extend(DD_WRITE_FLAGS.iter().map(OsString::from));
        }
        self.runner.run(&self.tools.dd, &argv)
    }

    /// Evict cached file pages so the next read hits the device
    pub fn drop_caches(&self) -> Result<()> {
        let script = operand("sync; echo 3 > ", &self.tools.drop_caches);
        debug!("Dropping cache: {}", script.to_string_lossy());
        self.runner.run(&self.tools.shell, &[OsString::from("-c"), script])?;
        Ok(())
    }

    fn spinner(&self, label: &str) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
            pb.set_style(style);
        }
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}

/// Print one result line and flush so it shows up before the next test starts
fn emit<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{}", line)?;
    out.flush()?;
    Ok(())
}
