//! Parameter sweeps
//!
//! A sweep fixes two of the three tank parameters and runs one solver per
//! candidate value of the third. Every run builds its own parameter copy and
//! scenario, so runs share nothing and may execute in any order; the result
//! always lists them in the order the values were given.
//!
//! # Example
//!
//! ```rust
//! use sugar_rs::models::{SweptParameter, TankParameters};
//! use sugar_rs::solver::SolverMethod;
//! use sugar_rs::sweep::run_sweep;
//!
//! let base = TankParameters::new(1000.0, 10.0, 5.0);
//! let method = SolverMethod::Analytical;
//! let result = run_sweep(
//!     &base,
//!     SweptParameter::FlowRate,
//!     &[2.0, 5.0, 10.0, 15.0],
//!     method.build().as_ref(),
//!     &method.configuration(100.0, 1001),
//! ).unwrap();
//!
//! assert_eq!(result.labels(), vec!["R=2", "R=5", "R=10", "R=15"]);
//! ```

use log::{debug, info};
use thiserror::Error;

use crate::models::{MixingTank, SweptParameter, TankParameters};
use crate::physics::PhysicalQuantity;
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration};

// =================================================================================================
// Errors
// =================================================================================================

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("no candidate values to sweep for {0}")]
    EmptyValues(SweptParameter),

    #[error("invalid tank parameters: {0}")]
    InvalidParameters(String),

    #[error("solver failed for swept value {value}: {message}")]
    Solver { value: f64, message: String },
}

// =================================================================================================
// Series
// =================================================================================================

/// Sugar quantity against time for one run
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionSeries {
    pub time: Vec<f64>,
    pub quantity: Vec<f64>,
}

impl SolutionSeries {
    /// Pair two equally long vectors
    pub fn new(time: Vec<f64>, quantity: Vec<f64>) -> Result<Self, String> {
        if time.len() != quantity.len() {
            return Err(format!(
                "Time and quantity lengths differ: {} vs {}",
                time.len(),
                quantity.len()
            ));
        }
        Ok(Self { time, quantity })
    }

    /// Mass series of a solver result
    pub fn from_result(result: &SimulationResult) -> Result<Self, String> {
        let quantity = result.quantity_series(PhysicalQuantity::Mass)?;
        Self::new(result.time_points.clone(), quantity)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn final_quantity(&self) -> Option<f64> {
        self.quantity.last().copied()
    }

    /// `(min, max)` of the quantity, ignoring nothing: callers keep series finite
    pub fn quantity_range(&self) -> Option<(f64, f64)> {
        self.quantity.iter().fold(None, |range, &q| match range {
            None => Some((q, q)),
            Some((lo, hi)) => Some((lo.min(q), hi.max(q))),
        })
    }
}

/// One run of a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepEntry {
    pub value: f64,
    pub series: SolutionSeries,
}

// =================================================================================================
// Sweep result
// =================================================================================================

/// Ordered collection of runs differing in one parameter
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    parameter: SweptParameter,
    base: TankParameters,
    solver: String,
    entries: Vec<SweepEntry>,
}

impl SweepResult {
    pub fn new(
        parameter: SweptParameter,
        base: TankParameters,
        solver: impl Into<String>,
        entries: Vec<SweepEntry>,
    ) -> Self {
        Self { parameter, base, solver: solver.into(), entries }
    }

    pub fn parameter(&self) -> SweptParameter {
        self.parameter
    }

    /// Parameters shared by every run (the swept one holds its base value)
    pub fn base(&self) -> &TankParameters {
        &self.base
    }

    pub fn solver_name(&self) -> &str {
        &self.solver
    }

    pub fn entries(&self) -> &[SweepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.value).collect()
    }

    /// Legend labels, `"<symbol>=<value>"`
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| self.parameter.label(e.value)).collect()
    }

    /// Parameters held fixed, as `(symbol, value)` pairs
    pub fn fixed_parameters(&self) -> Vec<(&'static str, f64)> {
        SweptParameter::ALL
            .iter()
            .filter(|p| **p != self.parameter)
            .map(|p| (p.symbol(), self.base.get(*p)))
            .collect()
    }

    /// `(min, max)` of every quantity of every run
    pub fn quantity_range(&self) -> Option<(f64, f64)> {
        self.entries
            .iter()
            .filter_map(|e| e.series.quantity_range())
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Latest time over every run
    pub fn time_end(&self) -> Option<f64> {
        self.entries
            .iter()
            .filter_map(|e| e.series.time.last().copied())
            .reduce(f64::max)
    }
}

// =================================================================================================
// Driver
// =================================================================================================

fn run_single(
    base: &TankParameters,
    parameter: SweptParameter,
    value: f64,
    solver: &dyn Solver,
    configuration: &SolverConfiguration,
) -> Result<SweepEntry, SweepError> {
    let parameters = base.with(parameter, value);
    let scenario = Scenario::from_model(Box::new(MixingTank::new(parameters)));

    debug!("Sweep run {}: {}", parameter.label(value), parameters);

    let series = solver
        .solve(&scenario, configuration)
        .and_then(|result| SolutionSeries::from_result(&result))
        .map_err(|message| SweepError::Solver { value, message })?;

    Ok(SweepEntry { value, series })
}

/// Solve the tank once per candidate value of `parameter`
///
/// `base` provides the two fixed parameters. Entries come back in the order
/// of `values`. The first failing run aborts the sweep.
///
/// # Errors
///
/// - [`SweepError::EmptyValues`] when `values` is empty
/// - [`SweepError::InvalidParameters`] when a parameter is not finite
/// - [`SweepError::Solver`] with the offending value when a run fails
pub fn run_sweep(
    base: &TankParameters,
    parameter: SweptParameter,
    values: &[f64],
    solver: &dyn Solver,
    configuration: &SolverConfiguration,
) -> Result<SweepResult, SweepError> {
    if values.is_empty() {
        return Err(SweepError::EmptyValues(parameter));
    }

    for value in values {
        base.with(parameter, *value)
            .validate()
            .map_err(SweepError::InvalidParameters)?;
    }

    info!(
        "Sweeping {} over {:?} with {} ({} runs)",
        parameter,
        values,
        solver.name(),
        values.len()
    );

    #[cfg(feature = "parallel")]
    let entries = {
        use rayon::prelude::*;

        // collect() on an indexed parallel iterator keeps the input order
        values
            .par_iter()
            .map(|value| run_single(base, parameter, *value, solver, configuration))
            .collect::<Result<Vec<_>, _>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let entries = values
        .iter()
        .map(|value| run_single(base, parameter, *value, solver, configuration))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SweepResult::new(parameter, *base, solver.name(), entries))
}

// =================================================================================================
// Tests
// =================================================================================================
