use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, error, info};

use diskspeed::app::ensure_root;
use diskspeed::config::Config;
use diskspeed::device::{choose_device, list_usb_devices};
use diskspeed::io::SystemRunner;
use diskspeed::{logging, Result};

/// Pick an attached USB storage device to benchmark
#[derive(Debug, Parser)]
#[command(name = "usbpick", version)]
struct Cli {
    /// Debug messages
    #[arg(short, long)]
    debug: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match run(&cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    ensure_root()?;
    let config = Config::load(cli.config.as_deref())?;

    let devices = list_usb_devices(&SystemRunner::new(), &config.tools)?;
    if devices.is_empty() {
        return Ok(0);
    }
    debug!("Devices: {:?}", devices);

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    match choose_device(&devices, &mut input, &mut output)? {
        Some(device) => {
            info!("Testing device {}", device);
            Ok(0)
        }
        None => Ok(1),
    }
}
