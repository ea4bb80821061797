//! Scripted command runner for tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::io::{CommandLine, CommandOutput, CommandRunner};
use crate::{DiskSpeedError, Result};

pub(crate) const HDPARM_OUTPUT: &str = "
/dev/sdb1:
 Timing O_DIRECT cached reads:   242 MB in  2.01 seconds = 120.36 MB/sec
 Timing O_DIRECT disk reads: 438 MB in  3.01 seconds = 145.61 MB/sec
";

pub(crate) const DD_OUTPUT: &str = "16+0 records in
16+0 records out
1073741824 bytes (1.1 GB, 1.0 GiB) copied, 2.345 s, 458 MB/s
";

type Hook = Box<dyn Fn(&str, &[OsString])>;

/// Answers commands by program name with canned output
///
/// Fake `dd` creates the `of=` file like the real tool would, even when it
/// is scripted to fail, so cleanup paths can be observed.
pub(crate) struct FakeRunner {
    outputs: HashMap<String, CommandOutput>,
    failures: Vec<(String, String)>,
    calls: RefCell<Vec<(String, Vec<OsString>)>>,
    hook: Option<Hook>,
    create_files: bool,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        let mut outputs = HashMap::new();
        outputs.insert("findmnt".to_string(), CommandOutput::new("/dev/sdb1\n", ""));
        outputs.insert(
            "udevadm".to_string(),
            CommandOutput::new("DEVNAME=/dev/sdb1\nID_MODEL=SanDisk Ultra Fit\n", ""),
        );
        outputs.insert("hdparm".to_string(), CommandOutput::new(HDPARM_OUTPUT, ""));
        outputs.insert("dd".to_string(), CommandOutput::new("", DD_OUTPUT));
        Self {
            outputs,
            failures: Vec::new(),
            calls: RefCell::new(Vec::new()),
            hook: None,
            create_files: true,
        }
    }

    /// Make fake `dd` leave nothing on disk
    pub(crate) fn without_files(mut self) -> Self {
        self.create_files = false;
        self
    }

    pub(crate) fn with_output(mut self, program: &str, stdout: &str, stderr: &str) -> Self {
        self.outputs
            .insert(program.to_string(), CommandOutput::new(stdout, stderr));
        self
    }

    /// Fail `program` whenever one of its arguments contains `needle`
    pub(crate) fn fail_when(mut self, program: &str, needle: &str) -> Self {
        self.failures.push((program.to_string(), needle.to_string()));
        self
    }

    /// Run `hook` before answering every command
    pub(crate) fn with_hook(mut self, hook: impl Fn(&str, &[OsString]) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Program names in invocation order
    pub(crate) fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(p, _)| p.clone()).collect()
    }

    /// Argument lists of every call to `program`
    pub(crate) fn calls_to(&self, program: &str) -> Vec<Vec<OsString>> {
        self.calls
            .borrow()
            .iter()
            .filter(|(p, _)| p == program)
            .map(|(_, a)| a.clone())
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.borrow_mut().push((name.clone(), args.to_vec()));

        if let Some(hook) = &self.hook {
            hook(&name, args);
        }

        if name == "dd" && self.create_files {
            let target = args
                .iter()
                .find_map(|a| a.as_bytes().strip_prefix(b"of="))
                .map(|t| Path::new(OsStr::from_bytes(t)));
            if let Some(target) = target {
                if target != Path::new("/dev/null") {
                    fs::write(target, b"fake dd payload").map_err(DiskSpeedError::from)?;
                }
            }
        }

        let failing = self
            .failures
            .iter()
            .any(|(p, needle)| {
                *p == name && args.iter().any(|a| a.to_string_lossy().contains(needle.as_str()))
            });
        if failing {
            return Err(DiskSpeedError::ExternalCommand {
                command: CommandLine::new(program, args).to_string(),
                status: Some(1),
                output: format!("{}: scripted failure", name),
            });
        }

        Ok(self.outputs.get(&name).cloned().unwrap_or_default())
    }
}
