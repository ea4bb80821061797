use std::path::{Path, PathBuf};

use log::debug;

use crate::config::ToolPaths;
use crate::io::{args, CommandRunner};
use crate::models::DeviceIdentity;
use crate::parse;
use crate::{DiskSpeedError, Result};

/// Absolute, symlink-free form of `path`
pub fn canonical_mount_path(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        DiskSpeedError::Precondition(format!("{} does not exist: {}", path.display(), e))
    })
}

/// Block device mounted at (or containing) `path`
pub fn device_for_path<R: CommandRunner>(
    runner: &R,
    tools: &ToolPaths,
    path: &Path,
) -> Result<String> {
    let mut argv = args(["-no", "SOURCE", "--target"]);
    argv.push(path.into());
    let output = runner
        .run(&tools.findmnt, &argv)
        .map_err(|e| DiskSpeedError::Resolution(e.to_string()))?;
    parse::findmnt_source(&output.stdout)
}

/// `ID_MODEL` udev property of `device`, empty when unknown
pub fn model_for_device<R: CommandRunner>(
    runner: &R,
    tools: &ToolPaths,
    device: &str,
) -> Result<String> {
    let output = runner
        .run(&tools.udevadm, &args(["info", device, "--query=property"]))
        .map_err(|e| DiskSpeedError::Resolution(e.to_string()))?;
    Ok(parse::udev_model(&output.stdout))
}

/// Resolve the device and model behind `mount_path`
///
/// `mount_path` must already be canonical; see [`canonical_mount_path`].
pub fn resolve<R: CommandRunner>(
    runner: &R,
    tools: &ToolPaths,
    mount_path: &Path,
) -> Result<DeviceIdentity> {
    let device = device_for_path(runner, tools, mount_path)?;
    let model = model_for_device(runner, tools, &device)?;
    let identity = DeviceIdentity::new(device, model);
    debug!("{} is on {}", mount_path.display(), identity);
    Ok(identity)
}
