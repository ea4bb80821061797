//! Logger setup
//!
//! Installs `env_logger` behind the `log` facade with a timestamped format.

use std::io::Write;

use log::LevelFilter;

/// Timestamp layout used in every log line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log level for the given verbosity flag
pub fn level_for(debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` still takes precedence when set.
pub fn init(debug: bool) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(debug))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.args()
            )
        });
    // Keep whichever logger was installed first.
    let _ = builder.try_init();
}
