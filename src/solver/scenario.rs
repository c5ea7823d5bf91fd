//! Simulation scenario definition
//!
//! A scenario combines a physical model with its initial conditions.
use crate::physics::traits::PhysicalModel;
use crate::solver::boundary::DomainBoundaries;

/// Simulation scenario
///
/// This is the "WHAT to solve" (not "HOW to solve"). The same scenario can
/// be handed to the analytical solver and to any numerical solver.
///
/// # Examples
///
/// ```rust
/// use sugar_rs::models::{MixingTank, TankParameters};
/// use sugar_rs::solver::Scenario;
///
/// let tank = MixingTank::new(TankParameters::new(1000.0, 10.0, 5.0));
/// let scenario = Scenario::from_model(Box::new(tank));
/// assert_eq!(scenario.get_model_name(), "Mixing Tank");
/// assert!(scenario.validate().is_ok());
/// ```
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Conditions and boundaries
    pub conditions: DomainBoundaries
}

impl Scenario {

    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, conditions: DomainBoundaries) -> Self {
        Self { model, conditions }
    }

    /// Scenario starting from the model's own initial state at t = 0
    pub fn from_model(model: Box<dyn PhysicalModel>) -> Self {
        let conditions = DomainBoundaries::temporal(model.setup_initial_state());
        Self::new(model, conditions)
    }

    /// Verifying scenario content
    pub fn validate(&self) -> Result<(), String> {
        self.conditions.validate()
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
        .field("name", &self.get_model_name())
        .field("points", &self.model.points())
        .field("Boundaries / conditions", &self.conditions)
        .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalQuantity, PhysicalState};

    struct MockModel;

    impl PhysicalModel for MockModel {
        fn points(&self) -> usize {
            10
        }

        fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
            state.clone()
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::uniform_vector(10, 1.0))
        }

        fn name(&self) -> &str {
            "MockModel"
        }
    }

    #[test]
    fn test_scenario_creation() {
        let scenario = Scenario::new(Box::new(MockModel), DomainBoundaries::default());
        assert_eq!(scenario.get_model_name(), "MockModel");
        assert!(scenario.validate().is_err());
    }

    #[test]
    fn test_scenario_from_model_uses_initial_state() {
        let scenario = Scenario::from_model(Box::new(MockModel));
        assert!(scenario.validate().is_ok());
        let initial = scenario.conditions.initial_condition().unwrap();
        assert_eq!(initial.dimension(), 10);
    }

    #[test]
    fn test_debug_output_names_model() {
        let scenario = Scenario::from_model(Box::new(MockModel));
        assert!(format!("{:?}", scenario).contains("MockModel"));
    }
}
