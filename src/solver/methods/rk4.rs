//! Runge-Kutta 4 (RK4) numerical solver
//!
//! # Mathematical Background
//!
//! The classical fourth-order scheme for dy/dt = f(t, y):
//!
//! ```text
//! k₁ = f(tₙ,        yₙ)
//! k₂ = f(tₙ + dt/2, yₙ + dt/2 · k₁)
//! k₃ = f(tₙ + dt/2, yₙ + dt/2 · k₂)
//! k₄ = f(tₙ + dt,   yₙ + dt · k₃)
//!
//! yₙ₊₁ = yₙ + dt/6 · (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(dt⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Step**: fixed; halving dt divides the error by ~16
//!
//! | Method | Order | Evals/Step | Error |
//! |--------|-------|------------|-------|
//! | Euler  | 1     | 1          | O(dt) |
//! | RK4    | 4     | 4          | O(dt⁴)|
//!
//! # Example
//!
//! ```rust
//! use sugar_rs::models::{MixingTank, TankParameters};
//! use sugar_rs::solver::{RK4Solver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), String> {
//! let scenario = Scenario::from_model(Box::new(MixingTank::new(TankParameters::new(1000.0, 10.0, 5.0))));
//! let result = RK4Solver::new().solve(&scenario, &SolverConfiguration::time_evolution(100.0, 1000))?;
//! assert_eq!(result.len(), 1001);
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::solver::{prepare_run, validate_state};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta solver
///
/// Steps exactly on the output grid of a `TimeEvolution` configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use sugar_rs::solver::{RK4Solver, Solver};
    ///
    /// let solver = RK4Solver::new();
    /// assert_eq!(solver.name(), "Runge Kutta (RK4)");
    /// ```
    pub fn new() -> Self {
        Self
    }
}

impl Solver for RK4Solver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration
    ) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        let (total_time, time_steps) = match &config.solver_type {
            SolverType::TimeEvolution { total_time, time_steps } => (*total_time, *time_steps),
            other => {
                return Err(format!(
                    "RK4Solver only supports TimeEvolution configuration, got {}",
                    other.name()
                ));
            }
        };

        let (mut state, time_points) = prepare_run(scenario, config)?;
        let dt = total_time / (time_steps as f64);

        debug!("RK4: {} steps of {} on {}", time_steps, dt, scenario.get_model_name());

        let mut state_trajectory = Vec::with_capacity(time_points.len());
        state_trajectory.push(state.clone());

        // ====== Step 2: Time Integration ======

        let model = &scenario.model;

        for (step, window) in time_points.windows(2).enumerate() {
            let (t, h) = (window[0], window[1] - window[0]);
            let half = h / 2.0;

            let k1 = model.compute_physics(t, &state);
            let k2 = model.compute_physics(t + half, &(state.clone() + k1.clone() * half));
            let k3 = model.compute_physics(t + half, &(state.clone() + k2.clone() * half));
            let k4 = model.compute_physics(t + h, &(state.clone() + k3.clone() * h));

            // Simpson weights 1/6, 1/3, 1/3, 1/6
            let weighted_slope = k1 + k2 * 2.0 + k3 * 2.0 + k4;
            state = state + weighted_slope * (h / 6.0);

            validate_state(&state, step + 1)?;
            state_trajectory.push(state.clone());
        }

        // ====== Step 3: Build Result ======

        let mut result = SimulationResult::new(time_points, state_trajectory, state);

        result.add_metadata("solver", "Runge-Kutta 4");
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("function evaluations", &(4 * time_steps).to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Runge Kutta (RK4)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
