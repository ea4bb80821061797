//! Output parsing against captured tool output

use diskspeed::parse;

const HDPARM: &str = "
/dev/sdb1:
 Timing O_DIRECT cached reads:   242 MB in  2.01 seconds = 120.36 MB/sec
 Timing O_DIRECT disk reads: 438 MB in  3.01 seconds = 145.61 MB/sec
";

#[test]
fn test_hdparm_values_after_final_equals() {
    let result = parse::hdparm_timings(HDPARM);
    assert_eq!(result.cached, "120.36 MB/sec");
    assert_eq!(result.disk, "145.61 MB/sec");
}

#[test]
fn test_dd_last_segment() {
    let out = "16+0 records in\n16+0 records out\n1073741824 bytes (1.1 GB, 1.0 GiB) copied, 2.345 s, 458 MB/s\n";
    assert_eq!(parse::dd_throughput(out).unwrap(), "458 MB/s");
}

#[test]
fn test_dd_small_copy() {
    let out = "256+0 records in\n256+0 records out\n1048576 bytes (1.0 MB, 1.0 MiB) copied, 0.0123 s, 85.2 MB/s\n";
    assert_eq!(parse::dd_throughput(out).unwrap(), "85.2 MB/s");
}

#[test]
fn test_lsusb_listing() {
    let out = "\
Bus 002 Device 001: ID 1d6b:0003 Linux Foundation 3.0 root hub
Bus 001 Device 002: ID 8087:0aaa Intel Corp. Bluetooth 9460/9560 Jefferson Peak (JfP)
Bus 004 Device 008: ID 0781:5583 SanDisk Corp. Ultra Fit
Bus 001 Device 001: ID 1d6b:0002 Linux Foundation 2.0 root HUB
";
    let devices = parse::lsusb_devices(out).unwrap();
    assert_eq!(devices.len(), 1);
    let device = &devices[0];
    assert_eq!(device.bus, "004");
    assert_eq!(device.device, "008");
    assert_eq!(device.vendor, "0781");
    assert_eq!(device.model, "5583");
    assert_eq!(device.name, "SanDisk Corp. Ultra Fit");
}

#[test]
fn test_lsusb_malformed_listing_is_fatal() {
    assert!(parse::lsusb_devices("Bus 004 Device 008: ID\n").is_err());
}
