//! Command-line flags of the binary
//!
//! ```text
//! sugar-rs [--horizon MIN] [--samples N] [--no-display] [--no-csv] [OUTPUT_DIR]
//! ```
//!
//! Unknown `--` flags are ignored with a warning; any other word is the
//! output directory.

use std::path::PathBuf;

use log::warn;

use crate::cli::{CliError, InputError};
use crate::goal::RunOptions;

/// Build the run options from the arguments after the program name
pub fn parse_run_options<I>(args: I) -> Result<RunOptions, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = RunOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-display" => options.display = false,
            "--no-csv" => options.export_csv = false,
            "--horizon" => {
                let token = args.next().ok_or(InputError::MissingValue("--horizon"))?;
                options.horizon = match token.parse::<f64>() {
                    Ok(value) if value.is_finite() => value,
                    _ => return Err(InputError::InvalidNumber { field: "--horizon", token }.into()),
                };
            }
            "--samples" => {
                let token = args.next().ok_or(InputError::MissingValue("--samples"))?;
                options.samples = token
                    .parse::<usize>()
                    .map_err(|_| InputError::InvalidNumber { field: "--samples", token })?;
            }
            flag if flag.starts_with("--") => warn!("Ignoring unknown option {}", flag),
            dir => options.output_dir = PathBuf::from(dir),
        }
    }

    options.validate().map_err(CliError::InvalidOptions)?;

    Ok(options)
}
