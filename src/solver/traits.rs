//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` defines the kind of numerical solution
//! - `SolverConfiguration` wraps it and validates it
//! - `SimulationResult` holds the trajectory plus string metadata
//! - `Solver` is the single entry point every method implements

use std::collections::HashMap;

use crate::physics::{PhysicalQuantity, PhysicalState};
use crate::solver::{Scenario, TimeGrid};

// =================================================================================================
// Central Solver Type Enumeration
// =================================================================================================

/// Type of numerical solution method
///
/// Each variant carries the data specific to that solution type.
///
/// # Examples
///
/// ```rust
/// use sugar_rs::solver::SolverType;
///
/// // Fixed-step integration on 1000 intervals
/// let fixed = SolverType::TimeEvolution { total_time: 100.0, time_steps: 1000 };
///
/// // Exact solution at t = 5
/// let exact = SolverType::Analytical { evaluation_time: Some(5.0) };
///
/// assert!(fixed.validate().is_ok());
/// assert_eq!(exact.name(), "Analytical");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {

    /// Fixed-step time evolution (ODE integration)
    ///
    /// Used by: Euler, Runge-Kutta 4. The output grid has `time_steps + 1`
    /// equally spaced points from 0 to `total_time`.
    TimeEvolution {
        total_time: f64,
        time_steps: usize,
    },

    /// Adaptive time evolution with error control
    ///
    /// Used by: Dormand-Prince. The integrator picks its own steps and
    /// reports the solution on the same uniform grid as `TimeEvolution`.
    ///
    /// # Parameters
    /// - `relative_tolerance`, `absolute_tolerance`: local error targets
    /// - `max_steps`: accepted plus rejected step budget
    Adaptive {
        total_time: f64,
        time_steps: usize,
        relative_tolerance: f64,
        absolute_tolerance: f64,
        max_steps: usize,
    },

    /// Analytical exact solution at one instant
    ///
    /// `None` evaluates at t = 0.
    Analytical {
        evaluation_time: Option<f64>,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::TimeEvolution { .. } => "TimeEvolution",
            SolverType::Adaptive { .. } => "Adaptive",
            SolverType::Analytical { .. } => "Analytical",
        }
    }

    /// Validate that parameters are physically meaningful
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SolverType::TimeEvolution { total_time, time_steps } => {
                validate_horizon(*total_time, *time_steps)
            }
            SolverType::Adaptive {
                total_time,
                time_steps,
                relative_tolerance,
                absolute_tolerance,
                max_steps,
            } => {
                validate_horizon(*total_time, *time_steps)?;
                if !(*relative_tolerance > 0.0) || !(*absolute_tolerance > 0.0) {
                    return Err("Tolerances must be positive".to_string());
                }
                if *max_steps == 0 {
                    return Err("Maximum steps must be positive".to_string());
                }
                Ok(())
            }
            SolverType::Analytical { evaluation_time } => {
                if let Some(t) = evaluation_time
                    && (!t.is_finite() || *t < 0.0) {
                        return Err(format!("Evaluation time must be finite and non-negative, got {}", t));
                    }
                Ok(())
            }
        }
    }

    /// Output grid requested by this configuration
    ///
    /// Fixed-step and adaptive configurations produce a uniform grid; the
    /// analytical configuration produces the single evaluation instant.
    pub fn time_grid(&self) -> Result<TimeGrid, String> {
        match self {
            SolverType::TimeEvolution { total_time, time_steps }
            | SolverType::Adaptive { total_time, time_steps, .. } => {
                TimeGrid::uniform(*total_time, time_steps + 1)
            }
            SolverType::Analytical { evaluation_time } => {
                TimeGrid::from_points(vec![evaluation_time.unwrap_or(0.0)])
            }
        }
    }
}

fn validate_horizon(total_time: f64, time_steps: usize) -> Result<(), String> {
    if !(total_time > 0.0) || !total_time.is_finite() {
        return Err("Total time must be positive".to_string());
    }
    if time_steps == 0 {
        return Err("TimeSteps must be greater than 0".to_string());
    }
    Ok(())
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Default relative tolerance of the adaptive integrator
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-8;

/// Default absolute tolerance of the adaptive integrator
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Default step budget of the adaptive integrator
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Configuration for numerical solver
///
/// # Examples
///
/// ```rust
/// use sugar_rs::solver::SolverConfiguration;
///
/// let fixed = SolverConfiguration::time_evolution(100.0, 9999);
/// let adaptive = SolverConfiguration::adaptive(100.0, 9999)
///     .with_tolerances(1e-10, 1e-10);
///
/// assert!(fixed.validate().is_ok());
/// assert!(adaptive.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Create a fixed-step time evolution configuration
    pub fn time_evolution(total_time: f64, time_steps: usize) -> Self {
        Self::new(SolverType::TimeEvolution { total_time, time_steps })
    }

    /// Create an adaptive configuration with default tolerances
    pub fn adaptive(total_time: f64, time_steps: usize) -> Self {
        Self::new(SolverType::Adaptive {
            total_time,
            time_steps,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            absolute_tolerance: DEFAULT_ABSOLUTE_TOLERANCE,
            max_steps: DEFAULT_MAX_STEPS,
        })
    }

    /// Create an analytical solver configuration
    pub fn analytical(evaluation_time: f64) -> Self {
        Self::new(SolverType::Analytical { evaluation_time: Some(evaluation_time) })
    }

    /// Builder: replace the tolerances of an adaptive configuration
    ///
    /// Has no effect on other configurations.
    pub fn with_tolerances(mut self, relative: f64, absolute: f64) -> Self {
        if let SolverType::Adaptive { relative_tolerance, absolute_tolerance, .. } = &mut self.solver_type {
            *relative_tolerance = relative;
            *absolute_tolerance = absolute;
        }
        self
    }

    /// Builder: replace the step budget of an adaptive configuration
    pub fn with_max_steps(mut self, steps: usize) -> Self {
        if let SolverType::Adaptive { max_steps, .. } = &mut self.solver_type {
            *max_steps = steps;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.solver_type.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// Trajectory produced by a solver
///
/// `time_points[i]` is the instant of `state_trajectory[i]`. The final state
/// is duplicated for convenience.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub time_points: Vec<f64>,
    pub state_trajectory: Vec<PhysicalState>,
    pub final_state: PhysicalState,
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(
        time_points: Vec<f64>,
        state_trajectory: Vec<PhysicalState>,
        final_state: PhysicalState,
    ) -> Self {
        Self {
            time_points,
            state_trajectory,
            final_state,
            metadata: HashMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of stored time points
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Scalar series of one quantity over the trajectory
    ///
    /// Vector quantities contribute their first entry.
    pub fn quantity_series(&self, quantity: PhysicalQuantity) -> Result<Vec<f64>, String> {
        self.state_trajectory
            .iter()
            .enumerate()
            .map(|(i, state)| {
                state
                    .scalar(quantity)
                    .ok_or_else(|| format!("{} missing from state at index {}", quantity, i))
            })
            .collect()
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method applied to a scenario
///
/// Implementations are stateless and may be reused for any number of
/// scenarios, including concurrently.
pub trait Solver: Send + Sync {
    /// Solve `scenario` as requested by `config`
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String>;

    /// Display name
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicalData;

    #[test]
    fn test_time_evolution_validation() {
        assert!(SolverConfiguration::time_evolution(10.0, 100).validate().is_ok());
        assert!(SolverConfiguration::time_evolution(0.0, 100).validate().is_err());
        assert!(SolverConfiguration::time_evolution(-1.0, 100).validate().is_err());
        assert!(SolverConfiguration::time_evolution(10.0, 0).validate().is_err());
        assert!(SolverConfiguration::time_evolution(f64::NAN, 10).validate().is_err());
    }

    #[test]
    fn test_adaptive_validation() {
        let config = SolverConfiguration::adaptive(100.0, 99);
        assert!(config.validate().is_ok());

        let bad_tol = config.clone().with_tolerances(0.0, 1e-6);
        assert!(bad_tol.validate().unwrap_err().contains("Tolerances"));

        let no_budget = config.with_max_steps(0);
        assert!(no_budget.validate().is_err());
    }

    #[test]
    fn test_builders_ignore_non_adaptive() {
        let config = SolverConfiguration::time_evolution(1.0, 1).with_tolerances(1.0, 1.0);
        assert_eq!(config, SolverConfiguration::time_evolution(1.0, 1));
    }

    #[test]
    fn test_analytical_validation() {
        assert!(SolverConfiguration::analytical(5.0).validate().is_ok());
        assert!(SolverConfiguration::analytical(-5.0).validate().is_err());
        let none = SolverConfiguration::new(SolverType::Analytical { evaluation_time: None });
        assert!(none.validate().is_ok());
    }

    #[test]
    fn test_time_grid_sizes() {
        let grid = SolverType::TimeEvolution { total_time: 100.0, time_steps: 9999 }
            .time_grid()
            .unwrap();
        assert_eq!(grid.len(), 10000);
        assert_eq!(grid.end(), 100.0);

        let single = SolverType::Analytical { evaluation_time: Some(3.0) }.time_grid().unwrap();
        assert_eq!(single.points(), &[3.0]);
    }

    #[test]
    fn test_simulation_result_series() {
        let states: Vec<PhysicalState> = [1.0, 2.0, 3.0]
            .iter()
            .map(|q| PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(*q)))
            .collect();
        let final_state = states[2].clone();
        let mut result = SimulationResult::new(vec![0.0, 1.0, 2.0], states, final_state);
        result.add_metadata("solver", "test");

        assert_eq!(result.len(), 3);
        assert_eq!(result.quantity_series(PhysicalQuantity::Mass).unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(result.quantity_series(PhysicalQuantity::Concentration).is_err());
        assert_eq!(result.metadata.get("solver"), Some(&"test".to_string()));
    }
}
