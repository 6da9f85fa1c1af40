/// FCStack - Fuel-cell stack viewer
///
/// Lays out the configured stack and shows it in the terminal.
/// Controls:
///   - Mouse drag / WASD / Arrow Keys: Orbit
///   - Scroll / + / -: Zoom
///   - R: Reset view
///   - Q/ESC: Quit
use std::{process, str::FromStr};

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use fcstack_terminal::Args;

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:? = log_level; "Starting FCStack");
    debug!(args:? = args; "Parsed arguments");

    if let Err(err) = fcstack_terminal::run(&args) {
        error!("{err}");
        process::exit(1);
    }
}
