//! Device discovery module
//!
//! Maps a mount path to its block device and model, and enumerates USB
//! devices for the interactive picker.

pub mod resolver;
pub mod usb;

pub use resolver::{canonical_mount_path, resolve};
pub use usb::{choose_device, list_usb_devices};
