use std::fmt;

/// Block device backing the mount path under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    /// Device node, e.g. `/dev/sdb1`
    pub device: String,
    /// `ID_MODEL` property, empty when udev does not know it
    pub model: String,
}

impl DeviceIdentity {
    pub fn new(device: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            model: model.into(),
        }
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.device, self.model)
    }
}

/// One line of `lsusb` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsbDevice {
    pub bus: String,
    pub device: String,
    pub vendor: String,
    pub model: String,
    pub name: String,
}

impl fmt::Display for UsbDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bus {} Device {}: ID {}:{} {}",
            self.bus, self.device, self.vendor, self.model, self.name
        )
    }
}
