use std::io::{BufRead, Write};

use log::error;

use crate::config::ToolPaths;
use crate::io::CommandRunner;
use crate::models::UsbDevice;
use crate::parse;
use crate::Result;

/// Attached USB devices, without hubs and bluetooth adapters
pub fn list_usb_devices<R: CommandRunner>(
    runner: &R,
    tools: &ToolPaths,
) -> Result<Vec<UsbDevice>> {
    let output = runner.run(&tools.lsusb, &[])?;
    parse::lsusb_devices(&output.stdout)
}

/// Ask the operator to pick one of `devices` by number
///
/// Returns `None` when the operator enters nothing or input ends.
/// Invalid entries are logged and the menu is shown again.
pub fn choose_device<I: BufRead, W: Write>(
    devices: &[UsbDevice],
    input: &mut I,
    output: &mut W,
) -> Result<Option<UsbDevice>> {
    loop {
        for (i, device) in devices.iter().enumerate() {
            writeln!(output, "{}) {}", i + 1, device.name)?;
        }
        writeln!(output)?;
        write!(output, "Test device number? (SPACE to exit) > ")?;
        output.flush()?;

        let mut line = String::new();
        let read = input.read_line(&mut line)?;
        writeln!(output)?;

        let entry = line.trim();
        if read == 0 || entry.is_empty() {
            return Ok(None);
        }

        match entry.parse::<usize>() {
            Ok(choice) if (1..=devices.len()).contains(&choice) => {
                return Ok(Some(devices[choice - 1].clone()));
            }
            _ => error!("Invalid entry {}", entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeRunner;
    use std::io::Cursor;

    fn devices() -> Vec<UsbDevice> {
        parse::lsusb_devices(
            "Bus 004 Device 008: ID 0781:5583 SanDisk Corp. Ultra Fit\n\
             Bus 004 Device 009: ID 0951:1666 Kingston Technology DataTraveler 100 G3\n",
        )
        .unwrap()
    }

    #[test]
    fn test_list_usb_devices() {
        let runner = FakeRunner::new().with_output(
            "lsusb",
            "Bus 002 Device 001: ID 1d6b:0003 Linux Foundation 3.0 root hub\n\
             Bus 004 Device 008: ID 0781:5583 SanDisk Corp. Ultra Fit\n",
            "",
        );
        let found = list_usb_devices(&runner, &ToolPaths::default()).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].vendor, "0781");
        assert_eq!(runner.programs(), vec!["lsusb"]);
    }

    #[test]
    fn test_choose_valid_number() {
        let mut input = Cursor::new("2\n");
        let mut output = Vec::new();
        let chosen = choose_device(&devices(), &mut input, &mut output).unwrap().unwrap();
        assert_eq!(chosen.model, "1666");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("1) SanDisk Corp. Ultra Fit"));
        assert!(text.contains("2) Kingston Technology DataTraveler 100 G3"));
    }

    #[test]
    fn test_choose_retries_after_invalid_entries() {
        let mut input = Cursor::new("abc\n7\n0\n1\n");
        let mut output = Vec::new();
        let chosen = choose_device(&devices(), &mut input, &mut output).unwrap().unwrap();
        assert_eq!(chosen.name, "SanDisk Corp. Ultra Fit");

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Test device number?").count(), 4);
    }

    #[test]
    fn test_choose_empty_entry_exits() {
        let mut input = Cursor::new(" \n");
        let mut output = Vec::new();
        assert!(choose_device(&devices(), &mut input, &mut output).unwrap().is_none());

        let mut input = Cursor::new("");
        assert!(choose_device(&devices(), &mut input, &mut output).unwrap().is_none());
    }
}
