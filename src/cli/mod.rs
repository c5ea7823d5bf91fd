//! Command-line front end
//!
//! ```text
//! prompts ──read_scenario──▶ ScenarioConfig ──execute──▶ chart + CSV ──▶ viewer
//! ```
//!
//! The binary only wires stdin/stdout, logging and the viewer around these
//! two calls, after [`parse_run_options`] has read its flags.

mod args;
mod input;
mod session;

pub use args::parse_run_options;
pub use input::{parse_single, parse_solver, parse_values, InputError};
pub use session::{execute, read_scenario, RunReport};

use thiserror::Error;

use crate::sweep::SweepError;

/// Any failure of an interactive run
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("invalid run options: {0}")]
    InvalidOptions(String),

    #[error(transparent)]
    Sweep(#[from] SweepError),

    #[error("output failed: {0}")]
    Output(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
