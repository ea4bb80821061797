//! External command execution
//!
//! Every tool the benchmark drives goes through [`CommandRunner`], so tests
//! can swap the real subprocess runner for canned output.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::{DiskSpeedError, Result};

/// Captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') && !self.stderr.is_empty() {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

/// Program plus arguments, rendered the way a shell user would type it
#[derive(Debug, Clone, Copy)]
pub struct CommandLine<'a> {
    pub program: &'a Path,
    pub args: &'a [OsString],
}

impl<'a> CommandLine<'a> {
    pub fn new(program: &'a Path, args: &'a [OsString]) -> Self {
        Self { program, args }
    }
}

impl fmt::Display for CommandLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Runs an external program to completion
pub trait CommandRunner {
    /// Run `program` with `args` and return its captured output.
    ///
    /// Fails with [`DiskSpeedError::ExternalCommand`] when the program cannot
    /// be spawned or exits non-zero.
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Subprocess-backed runner
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        let line = CommandLine::new(program, args);
        debug!("Executing {}", line);

        let output = Command::new(program).args(args).output().map_err(|e| {
            DiskSpeedError::ExternalCommand {
                command: line.to_string(),
                status: None,
                output: e.to_string(),
            }
        })?;

        let captured = CommandOutput::new(
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        if !output.status.success() {
            return Err(DiskSpeedError::ExternalCommand {
                command: line.to_string(),
                status: output.status.code(),
                output: captured.combined(),
            });
        }

        Ok(captured)
    }
}

/// Build an owned argument list from string slices
pub fn args<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    items.into_iter().map(Into::into).collect()
}

/// `key` immediately followed by `value`, e.g. `of=/mnt/usb/dd-test-...`
///
/// Paths are not required to be UTF-8, so the operand is built without
/// going through `str`.
pub fn operand(key: &str, value: impl AsRef<OsStr>) -> OsString {
    let value = value.as_ref();
    let mut arg = OsString::with_capacity(key.len() + value.len());
    arg.push(key);
    arg.push(value);
    arg
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_combined_joins_streams() {
        let out = CommandOutput::new("a", "b\n");
        assert_eq!(out.combined(), "a\nb\n");

        let out = CommandOutput::new("", "16+0 records in\n");
        assert_eq!(out.combined(), "16+0 records in\n");
    }

    #[test]
    fn test_command_line_display() {
        let program = PathBuf::from("/usr/bin/findmnt");
        let argv = args(["-no", "SOURCE", "--target", "/mnt"]);
        assert_eq!(
            CommandLine::new(&program, &argv).to_string(),
            "/usr/bin/findmnt -no SOURCE --target /mnt"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_operand_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/mnt/usb\xff/dd-test"));
        let arg = operand("of=", path);
        assert_eq!(arg.as_bytes(), b"of=/mnt/usb\xff/dd-test");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_stdout() {
        let out = SystemRunner::new()
            .run(Path::new("/bin/sh"), &args(["-c", "echo hello; echo oops >&2"]))
            .unwrap();
        assert_eq!(out.stdout, "hello\n");
        assert_eq!(out.stderr, "oops\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_nonzero_exit() {
        let err = SystemRunner::new()
            .run(Path::new("/bin/sh"), &args(["-c", "echo broken >&2; exit 3"]))
            .unwrap_err();
        match err {
            DiskSpeedError::ExternalCommand { status, output, .. } => {
                assert_eq!(status, Some(3));
                assert!(output.contains("broken"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_system_runner_spawn_failure() {
        let err = SystemRunner::new()
            .run(Path::new("/nonexistent/tool"), &[])
            .unwrap_err();
        assert!(matches!(
            err,
            DiskSpeedError::ExternalCommand { status: None, .. }
        ));
    }
}
