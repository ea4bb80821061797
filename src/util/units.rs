//! Units formatting and conversion utilities
//!
//! Provides human-readable sizes and durations for log output, and the dd
//! size syntax used by the test battery.

use std::time::Duration;

const BINARY_UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];

/// Binary-prefixed size such as `1.5 KiB`; anything under 1 KiB stays in bytes
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = BINARY_UNITS[0];
    for &next in &BINARY_UNITS[1..] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{:.1} {}", size, unit)
}

/// Parse a dd size operand (`bs=`) into bytes
///
/// Follows dd's suffixes: `c`, `w`, `b`, the binary `K`/`M`/`G`/`T`
/// (optionally spelled `KiB` etc.) and the decimal `kB`/`MB`/`GB`/`TB`.
///
/// # Examples
/// ```
/// use diskspeed::util::units::parse_dd_size;
///
/// assert_eq!(parse_dd_size("4K").unwrap(), 4096);
/// assert_eq!(parse_dd_size("64M").unwrap(), 67108864);
/// assert_eq!(parse_dd_size("1MB").unwrap(), 1000000);
/// ```
pub fn parse_dd_size(input: &str) -> Result<u64, String> {
    let input = input.trim();
    let split_pos = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (number_part, unit_part) = input.split_at(split_pos);

    if number_part.is_empty() {
        return Err(format!("Invalid size: {}", input));
    }
    let number: u64 = number_part
        .parse()
        .map_err(|_| format!("Invalid number: {}", number_part))?;

    let multiplier: u64 = match unit_part {
        "" | "c" => 1,
        "w" => 2,
        "b" => 512,
        "K" | "k" | "KiB" => 1 << 10,
        "M" | "MiB" => 1 << 20,
        "G" | "GiB" => 1 << 30,
        "T" | "TiB" => 1 << 40,
        "kB" | "KB" => 1_000,
        "MB" => 1_000_000,
        "GB" => 1_000_000_000,
        "TB" => 1_000_000_000_000,
        _ => return Err(format!("Unknown unit: {}", unit_part)),
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| format!("Size overflows: {}", input))
}

/// Compact elapsed time: `500ms`, `2.34s`, `1m 30s`, `1h 1m 1s`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);

    match secs {
        0 => format!("{}ms", duration.subsec_millis()),
        1..=59 => match duration.subsec_millis() / 10 {
            0 => format!("{}s", seconds),
            centis => format!("{}.{:02}s", seconds, centis),
        },
        60..=3599 => format!("{}m {}s", minutes, seconds),
        _ => format!("{}h {}m {}s", hours, minutes, seconds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(1048576), "1.0 MiB");
        assert_eq!(format_bytes(1073741824), "1.0 GiB");
        assert_eq!(format_bytes(u64::MAX), "16384.0 PiB");
    }

    #[test]
    fn test_parse_dd_size() {
        assert_eq!(parse_dd_size("512").unwrap(), 512);
        assert_eq!(parse_dd_size("2b").unwrap(), 1024);
        assert_eq!(parse_dd_size("4K").unwrap(), 4096);
        assert_eq!(parse_dd_size("1M").unwrap(), 1048576);
        assert_eq!(parse_dd_size("64M").unwrap(), 64 * 1048576);
        assert_eq!(parse_dd_size("1GiB").unwrap(), 1073741824);
        assert_eq!(parse_dd_size("1kB").unwrap(), 1000);

        assert!(parse_dd_size("").is_err());
        assert!(parse_dd_size("M").is_err());
        assert!(parse_dd_size("4X").is_err());
        assert!(parse_dd_size("99999999999T").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_millis(2005)), "2s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m 1s");
    }
}
