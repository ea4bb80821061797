use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{debug, warn};
use rand::Rng;

use crate::TEST_FILE_PREFIX;

/// Scratch file on the device under test, removed when dropped
///
/// The guard only owns the path. The file itself is created by `dd`, so the
/// guard may be dropped before anything exists at `path`.
#[derive(Debug)]
pub struct TestFile {
    path: PathBuf,
}

impl TestFile {
    /// Reserve a fresh, uniquely named test file path inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(unique_name()))
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the file now if it exists
    pub fn remove(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Deleted {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for TestFile {
    fn drop(&mut self) {
        if let Err(e) = self.remove() {
            warn!("Could not delete test file {}: {}", self.path.display(), e);
        }
    }
}

/// `dd-test-<timestamp>-<random>`
fn unique_name() -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!(
        "{}{}-{:08x}",
        TEST_FILE_PREFIX,
        Local::now().format("%Y-%m-%d-%H-%M-%S"),
        suffix
    )
}
