use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{debug, error, info};

use diskspeed::app::{self, App, Outcome, RunOptions};
use diskspeed::bench::Cancellation;
use diskspeed::config::Config;
use diskspeed::io::SystemRunner;
use diskspeed::{error as errors, logging, DiskSpeedError, Result};

/// Measure raw read and write throughput of the device behind a mount path
#[derive(Debug, Parser)]
#[command(name = "diskspeed", version)]
struct Cli {
    /// Path to a writable mountable location of the device
    mount_path: PathBuf,

    /// Debug messages
    #[arg(short, long)]
    debug: bool,

    /// Accept the discovered device
    #[arg(short, long)]
    yes: bool,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not show a spinner while tests run
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let cancel = Cancellation::new();
    let listener = cancel.clone();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if listener.on_interrupt() {
                process::exit(0);
            }
        }
    });

    let code = match tokio::task::spawn_blocking(move || run(cli, cancel)).await {
        Ok(Ok(())) => 0,
        Ok(Err(err)) => report_error(&err),
        Err(err) => {
            error!("Benchmark task failed: {}", err);
            1
        }
    };
    process::exit(code);
}

fn run(cli: Cli, cancel: Cancellation) -> Result<()> {
    app::ensure_root()?;

    let config = Config::load(cli.config.as_deref())?;
    let progress = config.output.progress && !cli.no_progress && io::stderr().is_terminal();
    let config = config.with_progress(progress);
    debug!("Tools: {:?}", config.tools);

    let options = RunOptions {
        mount_path: cli.mount_path,
        assume_yes: cli.yes,
    };
    let mut app = App::new(SystemRunner::new(), config, options, cancel);

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let outcome = app.run(&mut input, &mut output);
    debug!("Phases: {:?}", app.phase_history());
    match outcome? {
        Outcome::Completed(report) => {
            for result in report.writes.iter().chain(report.reads.iter()) {
                debug!("{}", result.summary());
            }
        }
        Outcome::Declined => {}
    }
    Ok(())
}

fn report_error(err: &DiskSpeedError) -> i32 {
    let code = errors::exit_code(err);
    if code != 0 {
        error!("{}", err);
        let hint = errors::user_friendly_message(err);
        if hint != err.to_string() {
            info!("{}", hint);
        }
    }
    code
}
