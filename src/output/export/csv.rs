//! CSV export of sweep results
//!
//! One row per time sample, one column per run of the sweep. Readable by
//! spreadsheets, pandas and most analysis tools.
//!
//! # Example
//!
//! ```rust,no_run
//! use sugar_rs::models::{SweptParameter, TankParameters};
//! use sugar_rs::output::export::{export_sweep_csv, CsvConfig, CsvMetadata};
//! use sugar_rs::solver::{AnalyticalSolver, SolverConfiguration};
//! use sugar_rs::sweep::run_sweep;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = run_sweep(
//!     &TankParameters::new(1000.0, 10.0, 5.0),
//!     SweptParameter::FlowRate,
//!     &[2.0, 5.0],
//!     &AnalyticalSolver::new(),
//!     &SolverConfiguration::adaptive(100.0, 4),
//! )?;
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_sweep(&result));
//! export_sweep_csv(&result, "sweep.csv", Some(&config))?;
//! # Ok(())
//! # }
//! ```
//!
//! **Output** (`sweep.csv`):
//! ```csv
//! # Sugar Tank Simulation Data
//! # Generated: 2026-10-19T09:12:44+00:00
//! # Model: Mixing Tank
//! # Solver: Analytical
//! # Swept: R
//! # Fixed: Q0=1000 g, X=10 g/L
//! #
//! Time (min),R=2 (g),R=5 (g)
//! 0.000000,1000.000000,1000.000000
//! 25.000000,1000.000000,1000.000000
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::SweptParameter;
use crate::sweep::SweepResult;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// ```rust
/// use sugar_rs::output::export::CsvConfig;
///
/// let config = CsvConfig { delimiter: ';', precision: 10, ..Default::default() };
/// assert_eq!(config.time_header, "Time (min)");
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places (default: 6)
    pub precision: usize,

    /// Write the `#` comment header (default: false)
    pub include_metadata: bool,

    pub metadata: Option<CsvMetadata>,

    /// Header of the time column (default: "Time (min)")
    pub time_header: String,

    /// Unit appended to every run column (default: "g")
    pub quantity_unit: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            time_header: "Time (min)".to_string(),
            quantity_unit: "g".to_string(),
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter, comma as decimal separator
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Enable the metadata header
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Header comments; only the fields that are set are written
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    pub model_name: Option<String>,
    pub solver_name: Option<String>,
    pub goal: Option<String>,
    pub swept: Option<SweptParameter>,

    /// `(symbol, value)` of the parameters held constant
    pub fixed: Vec<(String, f64)>,
}

impl CsvMetadata {
    /// Solver, swept parameter and fixed parameters of a sweep
    pub fn from_sweep(result: &SweepResult) -> Self {
        Self {
            model_name: Some("Mixing Tank".to_string()),
            solver_name: Some(result.solver_name().to_string()),
            swept: Some(result.parameter()),
            fixed: result
                .fixed_parameters()
                .into_iter()
                .map(|(symbol, value)| (symbol.to_string(), value))
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(
    out: &mut W,
    metadata: &CsvMetadata,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "# Sugar Tank Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(out, "# Model: {}", model)?;
    }
    if let Some(solver) = &metadata.solver_name {
        writeln!(out, "# Solver: {}", solver)?;
    }
    if let Some(goal) = &metadata.goal {
        writeln!(out, "# Goal: {}", goal)?;
    }
    if let Some(swept) = metadata.swept {
        writeln!(out, "# Swept: {}", swept)?;
    }

    if !metadata.fixed.is_empty() {
        let fixed: Vec<String> = metadata
            .fixed
            .iter()
            .map(|(symbol, value)| {
                let unit = SweptParameter::ALL
                    .iter()
                    .find(|p| p.symbol() == symbol.as_str())
                    .map(|p| format!(" {}", p.unit()))
                    .unwrap_or_default();
                format!("{}={}{}", symbol, value, unit)
            })
            .collect();
        writeln!(out, "# Fixed: {}", fixed.join(", "))?;
    }

    writeln!(out, "#")?;

    Ok(())
}

/// Number with the configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export every run of a sweep to one CSV file
///
/// The time column is taken from the first run; every run must share it.
///
/// # Errors
///
/// - Empty sweep or empty series
/// - Runs of different lengths
/// - NaN or Inf values
/// - File creation and write errors
pub fn export_sweep_csv(
    result: &SweepResult,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {

    // ============================= Validation =============================

    let first = result
        .entries()
        .first()
        .ok_or("Empty data: the sweep holds no run")?;

    let time = &first.series.time;
    if time.is_empty() {
        return Err("Empty data: time series must not be empty".into());
    }

    if time.iter().any(|t| !t.is_finite()) {
        return Err("Invalid data: NaN or Inf detected in time series".into());
    }

    for entry in result.entries() {
        let label = result.parameter().label(entry.value);

        if entry.series.len() != time.len() {
            return Err(format!(
                "Run [{}] length mismatch: {} samples vs {} time points",
                label,
                entry.series.len(),
                time.len()
            )
            .into());
        }

        if entry.series.quantity.iter().any(|q| !q.is_finite()) {
            return Err(format!("Invalid data: NaN or Inf detected in run {}", label).into());
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Open File ==============================

    let mut out = BufWriter::new(File::create(output_path.as_ref())?);

    // ============================= Write Metadata =========================

    if configuration.include_metadata
        && let Some(metadata) = &configuration.metadata
    {
        write_metadata_header(&mut out, metadata)?;
    }

    // ============================= Write Header ===========================

    write!(out, "{}", configuration.time_header)?;
    for label in result.labels() {
        write!(out, "{}{} ({})", configuration.delimiter, label, configuration.quantity_unit)?;
    }
    writeln!(out)?;

    // ============================= Write Data =============================

    for (i, t) in time.iter().enumerate() {
        write!(out, "{}", format_number(*t, configuration))?;
        for entry in result.entries() {
            write!(
                out,
                "{}{}",
                configuration.delimiter,
                format_number(entry.series.quantity[i], configuration)
            )?;
        }
        writeln!(out)?;
    }

    out.flush()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
