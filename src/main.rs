//! Interactive mixing-tank study
//!
//! Usage: `sugar-rs [--horizon MIN] [--samples N] [--no-display] [--no-csv] [OUTPUT_DIR]`

use std::io::{self, Write};
use std::process::ExitCode;

use log::{error, warn};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use sugar_rs::cli::{execute, parse_run_options, read_scenario, CliError};
use sugar_rs::output::open_with_default_viewer;

fn run() -> Result<(), CliError> {
    let options = parse_run_options(std::env::args().skip(1))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let config = read_scenario(&mut stdin.lock(), &mut stdout, options)?;

    let report = execute(&config)?;
    writeln!(stdout, "{}", report)?;

    if config.options.display
        && let Err(e) = open_with_default_viewer(&report.chart)
    {
        // The chart is on disk; failing to show it is not fatal
        warn!("Could not open the chart viewer: {}", e);
    }

    Ok(())
}

fn main() -> ExitCode {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("Logger initialisation failed: {}", e);
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
