//! Closed-form solver
//!
//! Evaluates the model's exact solution on the output grid instead of
//! integrating. Only models that implement
//! [`PhysicalModel::analytical_state`](crate::physics::PhysicalModel::analytical_state)
//! can be solved this way.
//!
//! Time is measured from the scenario start: the exact solution is asked for
//! the elapsed time `t - t₀`, so a scenario starting at t₀ = 30 reports the
//! initial state at t = 30. The closed form starts from the scenario's
//! initial condition, not from the model's own default state.

use log::debug;

use crate::solver::{prepare_run, validate_state};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration};

/// Exact solver backed by the model's closed form
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticalSolver;

impl AnalyticalSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for AnalyticalSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        // Every configuration kind works: only its output grid is used
        let (initial, time_points) = prepare_run(scenario, config)?;
        let start = scenario.conditions.start_time();
        let model = &scenario.model;

        debug!("Analytical: {} samples of {}", time_points.len(), scenario.get_model_name());

        // ====== Step 2: Evaluation ======

        let mut state_trajectory = Vec::with_capacity(time_points.len());

        for (index, t) in time_points.iter().enumerate() {
            let state = model.analytical_state(t - start, &initial).ok_or_else(|| {
                format!("Model '{}' has no closed-form solution", scenario.get_model_name())
            })?;
            validate_state(&state, index)?;
            state_trajectory.push(state);
        }

        let final_state = state_trajectory
            .last()
            .cloned()
            .ok_or_else(|| "Analytical solver produced no samples".to_string())?;

        // ====== Step 3: Build Result ======

        let mut result = SimulationResult::new(time_points, state_trajectory, final_state);

        result.add_metadata("solver", "Analytical");
        result.add_metadata("configuration", config.solver_type.name());
        result.add_metadata("samples", &result.len().to_string());
        result.add_metadata("function evaluations", "0");

        Ok(result)
    }

    fn name(&self) -> &str {
        "Analytical"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
