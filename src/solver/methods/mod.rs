//! Concrete solvers
//!
//! Implementations of the [`Solver`](crate::solver::Solver) trait. The
//! abstract interface lives in `solver::traits`; adding a method means adding
//! a file here and a variant to [`SolverMethod`], nothing else changes.
//!
//! # Available Methods
//!
//! - **[`AnalyticalSolver`]**: exact closed form evaluated on the grid
//!   - Cost: no function evaluation
//!   - Use: reference curves, default for the tank study
//!
//! - **[`DormandPrinceSolver`]**: adaptive RK5(4) with dense output
//!   - Order: fifth, error controlled by `rtol` / `atol`
//!   - Cost: 6 function evaluations per accepted step
//!   - Use: any model without a closed form
//!
//! - **[`RK4Solver`]**: classical fourth-order Runge-Kutta
//!   - Order: O(dt⁴), 4 evaluations per step
//!
//! - **[`EulerSolver`]**: forward Euler
//!   - Order: O(dt), 1 evaluation per step
//!   - Use: reference for convergence studies
//!
//! # Example
//!
//! ```rust
//! use sugar_rs::models::{MixingTank, TankParameters};
//! use sugar_rs::solver::{Scenario, SolverMethod};
//!
//! # fn main() -> Result<(), String> {
//! let scenario = Scenario::from_model(Box::new(MixingTank::new(TankParameters::new(0.0, 10.0, 5.0))));
//!
//! for method in SolverMethod::ALL {
//!     let result = method.build().solve(&scenario, &method.configuration(100.0, 101))?;
//!     assert_eq!(result.len(), 101);
//! }
//! # Ok(())
//! # }
//! ```

mod analytical;
mod dopri5;
mod euler;
mod rk4;

pub use analytical::AnalyticalSolver;
pub use dopri5::DormandPrinceSolver;
pub use euler::EulerSolver;
pub use rk4::RK4Solver;

use std::fmt;
use std::str::FromStr;

use crate::solver::{Solver, SolverConfiguration};

// =================================================================================================
// Method selection
// =================================================================================================

/// Solver chosen at run time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolverMethod {
    #[default]
    Analytical,
    DormandPrince,
    RungeKutta4,
    Euler,
}

impl SolverMethod {
    pub const ALL: [SolverMethod; 4] = [
        SolverMethod::Analytical,
        SolverMethod::DormandPrince,
        SolverMethod::RungeKutta4,
        SolverMethod::Euler,
    ];

    /// Name accepted by [`FromStr`]
    pub fn keyword(&self) -> &'static str {
        match self {
            SolverMethod::Analytical => "analytical",
            SolverMethod::DormandPrince => "rk45",
            SolverMethod::RungeKutta4 => "rk4",
            SolverMethod::Euler => "euler",
        }
    }

    /// Instantiate the solver
    pub fn build(&self) -> Box<dyn Solver> {
        match self {
            SolverMethod::Analytical => Box::new(AnalyticalSolver::new()),
            SolverMethod::DormandPrince => Box::new(DormandPrinceSolver::new()),
            SolverMethod::RungeKutta4 => Box::new(RK4Solver::new()),
            SolverMethod::Euler => Box::new(EulerSolver::new()),
        }
    }

    /// Configuration producing `samples` output points over `[0, horizon]`
    ///
    /// Dormand-Prince gets the adaptive configuration with default
    /// tolerances. The closed form and the fixed-step methods only need the
    /// output grid.
    pub fn configuration(&self, horizon: f64, samples: usize) -> SolverConfiguration {
        let time_steps = samples.saturating_sub(1);
        match self {
            SolverMethod::DormandPrince => SolverConfiguration::adaptive(horizon, time_steps),
            SolverMethod::Analytical | SolverMethod::RungeKutta4 | SolverMethod::Euler => {
                SolverConfiguration::time_evolution(horizon, time_steps)
            }
        }
    }
}

impl FromStr for SolverMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analytical" | "exact" => Ok(SolverMethod::Analytical),
            "rk45" | "dopri5" | "dormand-prince" => Ok(SolverMethod::DormandPrince),
            "rk4" => Ok(SolverMethod::RungeKutta4),
            "euler" => Ok(SolverMethod::Euler),
            other => Err(format!(
                "Unknown solver '{}' (expected analytical, rk45, rk4 or euler)",
                other
            )),
        }
    }
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}
