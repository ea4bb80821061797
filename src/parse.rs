//! Tool output parsers
//!
//! Each parser scans the known, fixed-format output of one tool line by line
//! and picks fields out by marker. None of them attempt a full grammar.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{HdparmResult, UsbDevice};
use crate::{DiskSpeedError, Result};

const HDPARM_CACHED_MARKER: &str = "Timing O_DIRECT cached reads";
const HDPARM_DISK_MARKER: &str = "Timing O_DIRECT disk reads";
const UDEV_MODEL_KEY: &str = "ID_MODEL=";

/// `lsusb` lines matching any of these are not offered for testing
static SKIP_USB: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\bhub\b").unwrap(),
        Regex::new(r"(?i)\bbluetooth\b").unwrap(),
    ]
});

/// Device path printed by `findmnt -no SOURCE --target <path>`
pub fn findmnt_source(text: &str) -> Result<String> {
    let source = text.trim();
    if source.is_empty() {
        return Err(DiskSpeedError::Resolution(
            "findmnt reported no source device".to_string(),
        ));
    }
    Ok(source.to_string())
}

/// `ID_MODEL` from `udevadm info <device> --query=property`, empty when absent
pub fn udev_model(text: &str) -> String {
    text.lines()
        .find_map(|line| line.strip_prefix(UDEV_MODEL_KEY))
        .map(|model| model.trim().to_string())
        .unwrap_or_default()
}

/// Cached and disk read timings from `hdparm -Tt --direct`
///
/// ```text
///  Timing O_DIRECT cached reads:   242 MB in  2.01 seconds = 120.36 MB/sec
///  Timing O_DIRECT disk reads: 438 MB in  3.01 seconds = 145.61 MB/sec
/// ```
///
/// Lines that are missing leave the matching field empty.
pub fn hdparm_timings(text: &str) -> HdparmResult {
    let mut result = HdparmResult::default();
    for line in text.lines().map(str::trim) {
        if line.contains(HDPARM_CACHED_MARKER) {
            result.cached = after_last_equals(line);
        }
        if line.contains(HDPARM_DISK_MARKER) {
            result.disk = after_last_equals(line);
        }
    }
    result
}

fn after_last_equals(line: &str) -> String {
    line.rsplit('=').next().unwrap_or_default().trim().to_string()
}

/// Throughput from the summary line `dd` prints last
///
/// `1073741824 bytes (1.1 GB, 1.0 GiB) copied, 2.345 s, 458 MB/s` yields
/// `458 MB/s`.
pub fn dd_throughput(text: &str) -> Result<String> {
    let last = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .ok_or_else(|| DiskSpeedError::Parse("dd produced no output".to_string()))?;

    Ok(last
        .rsplit(", ")
        .next()
        .unwrap_or(last)
        .trim()
        .to_string())
}

/// Split one `lsusb` line into its fields
///
/// `Bus 004 Device 008: ID 0781:5583 SanDisk Corp. Ultra Fit`
pub fn lsusb_line(line: &str) -> Result<UsbDevice> {
    let malformed = || DiskSpeedError::Parse(format!("malformed lsusb line: {:?}", line));

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 6 {
        return Err(malformed());
    }

    let device = tokens[3].strip_suffix(':').ok_or_else(malformed)?;
    let (vendor, model) = tokens[5].split_once(':').ok_or_else(malformed)?;

    Ok(UsbDevice {
        bus: tokens[1].to_string(),
        device: device.to_string(),
        vendor: vendor.to_string(),
        model: model.to_string(),
        name: tokens[6..].join(" "),
    })
}

/// Whether an `lsusb` line describes a hub or bluetooth adapter
pub fn is_skipped_usb(line: &str) -> bool {
    SKIP_USB.iter().any(|pattern| pattern.is_match(line))
}

/// All devices in `lsusb` output except hubs and bluetooth adapters
///
/// Every non-blank line must parse; a malformed line fails the whole listing.
pub fn lsusb_devices(text: &str) -> Result<Vec<UsbDevice>> {
    let mut devices = Vec::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let device = lsusb_line(line)?;
        log::debug!("device={:?}", device);

        if is_skipped_usb(line) {
            log::debug!("Skipping device as it matches skip pattern");
            continue;
        }
        devices.push(device);
    }
    Ok(devices)
}
