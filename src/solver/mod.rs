//! Numerical solvers
//!
//! This module provides the solver interface and its implementations. A
//! solver applies a numerical method to the equations of a physical model
//! within a specific scenario.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Domain boundaries (initial state)
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Solver type (fixed-step, adaptive, analytical)
//!    - Numerical parameters (horizon, output samples, tolerances)
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Returns the trajectory on the requested grid
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`, `SimulationResult`
//! - **`grid`**: `TimeGrid`, the output sampling
//! - **`boundary`**: `DomainBoundaries`, the initial state
//! - **`scenario`**: `Scenario`, model + boundaries
//! - **`methods`**: `AnalyticalSolver`, `DormandPrinceSolver`, `RK4Solver`, `EulerSolver`
//!
//! # Quick Start Example
//!
//! ```rust
//! use sugar_rs::models::{MixingTank, TankParameters};
//! use sugar_rs::solver::{AnalyticalSolver, DormandPrinceSolver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), String> {
//! let tank = MixingTank::new(TankParameters::new(1000.0, 10.0, 5.0));
//! let scenario = Scenario::from_model(Box::new(tank));
//!
//! let config = SolverConfiguration::adaptive(100.0, 999);
//! let exact = AnalyticalSolver::new().solve(&scenario, &config)?;
//! let numeric = DormandPrinceSolver::new().solve(&scenario, &config)?;
//!
//! assert_eq!(exact.len(), numeric.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All solver methods return `Result<T, String>`. Common errors:
//! - Invalid configuration (non-positive horizon, zero steps, bad tolerances)
//! - Invalid scenario (missing or non-finite initial state)
//! - Numerical failure (NaN, overflow, step budget exhausted)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod grid;
mod boundary;
mod scenario;
mod methods;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    SimulationResult,
    Solver,
    SolverConfiguration,
    SolverType,
    DEFAULT_ABSOLUTE_TOLERANCE,
    DEFAULT_MAX_STEPS,
    DEFAULT_RELATIVE_TOLERANCE,
};

pub use grid::TimeGrid;
pub use boundary::DomainBoundaries;
pub use scenario::Scenario;

pub use methods::{
    AnalyticalSolver,
    DormandPrinceSolver,
    EulerSolver,
    RK4Solver,
    SolverMethod,
};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::physics::PhysicalState;

/// Validate physical state for numerical issues
///
/// Checks that the state does not contain NaN or Inf values, which would
/// indicate numerical instability or overflow.
///
/// # Arguments
///
/// * `state` - Physical state to validate
/// * `step` - Current step or grid index (for error reporting)
pub(crate) fn validate_state(state: &PhysicalState, step: usize) -> Result<(), String> {
    for (quantity, data) in state.iter() {
        if data.values().any(f64::is_nan) {
            return Err(format!(
                "NaN detected in {} at step {}. This indicates numerical instability. \
                 Try reducing time step (increase time_steps parameter).",
                quantity, step
            ));
        }

        if data.values().any(f64::is_infinite) {
            return Err(format!(
                "Infinity detected in {} at step {}. This indicates numerical overflow. \
                 Check the model parameters for unbounded growth.",
                quantity, step
            ));
        }
    }

    Ok(())
}

/// Fetch the initial state and the output grid shared by every time solver
pub(crate) fn prepare_run(
    scenario: &Scenario,
    config: &SolverConfiguration,
) -> Result<(PhysicalState, Vec<f64>), String> {
    config.validate()?;
    scenario.validate()?;

    let initial = scenario
        .conditions
        .initial_condition()
        .cloned()
        .ok_or_else(|| "No initial condition found in domain boundaries".to_string())?;

    let start = scenario.conditions.start_time();
    let grid = config
        .solver_type
        .time_grid()?
        .into_vec()
        .into_iter()
        .map(|t| start + t)
        .collect();

    Ok((initial, grid))
}

// =================================================================================================
// Tests
// =================================================================================================
