//! Forward Euler numerical solver
//!
//! # Mathematical Background
//!
//! The simplest explicit scheme for dy/dt = f(t, y):
//!
//! ```text
//! y_{n+1} = y_n + dt * f(t_n, y_n)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (error ~ O(dt))
//! - **Stability**: for the tank equation, dt < 200/R
//! - **Complexity**: 1 function evaluation per step
//!
//! Kept as a reference integrator: it makes the benefit of the higher-order
//! methods visible on the sweep plots and in the convergence tests.
//!
//! # Example
//!
//! ```rust
//! use sugar_rs::models::{MixingTank, TankParameters};
//! use sugar_rs::solver::{EulerSolver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), String> {
//! let scenario = Scenario::from_model(Box::new(MixingTank::new(TankParameters::new(0.0, 10.0, 5.0))));
//! let result = EulerSolver::new().solve(&scenario, &SolverConfiguration::time_evolution(100.0, 10_000))?;
//! assert_eq!(result.len(), 10_001);
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::solver::{prepare_run, validate_state};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

// =================================================================================================
// Forward Euler Solver
// =================================================================================================

/// Forward Euler time-stepping solver
///
/// Steps exactly on the output grid of a `TimeEvolution` configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerSolver;

impl EulerSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for EulerSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        let (total_time, time_steps) = match &config.solver_type {
            SolverType::TimeEvolution { total_time, time_steps } => (*total_time, *time_steps),
            other => {
                return Err(format!(
                    "EulerSolver only supports TimeEvolution configuration, got {}",
                    other.name()
                ));
            }
        };

        let (mut state, time_points) = prepare_run(scenario, config)?;
        let dt = total_time / (time_steps as f64);

        debug!("Euler: {} steps of {} on {}", time_steps, dt, scenario.get_model_name());

        // ====== Step 2: Time Integration ======

        let mut state_trajectory = Vec::with_capacity(time_points.len());
        state_trajectory.push(state.clone());

        for (step, window) in time_points.windows(2).enumerate() {
            let (t, h) = (window[0], window[1] - window[0]);

            let slope = scenario.model.compute_physics(t, &state);
            state = state + slope * h;

            validate_state(&state, step + 1)?;
            state_trajectory.push(state.clone());
        }

        // ====== Step 3: Build Result ======

        let mut result = SimulationResult::new(time_points, state_trajectory, state);

        result.add_metadata("solver", "Forward Euler");
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("function evaluations", &time_steps.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
