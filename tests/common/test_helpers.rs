//! Helper functions for integration tests

use sugar_rs::models::{MixingTank, TankParameters};
use sugar_rs::physics::{PhysicalModel, PhysicalQuantity, PhysicalState};
use sugar_rs::solver::{DomainBoundaries, Scenario, SimulationResult};

/// Assert that two physical states are close (within tolerance)
pub fn assert_states_close(
    state1: &PhysicalState,
    state2: &PhysicalState,
    tolerance: f64,
    message: &str,
) {
    for (quantity, data1) in state1.iter() {
        let data2 = state2
            .get(*quantity)
            .unwrap_or_else(|| panic!("{}: {} missing in second state", message, quantity));

        assert_eq!(data1.len(), data2.len(), "{}: Dimension mismatch", message);

        for (i, (v1, v2)) in data1.values().zip(data2.values()).enumerate() {
            let diff = (v1 - v2).abs();
            assert!(
                diff < tolerance,
                "{}: {}[{}] differs by {} (tolerance {})",
                message, quantity, i, diff, tolerance
            );
        }
    }
}

/// Scenario starting from the model's own initial state
pub fn create_simple_scenario(model: Box<dyn PhysicalModel>) -> Scenario {
    let initial = model.setup_initial_state();
    let boundaries = DomainBoundaries::temporal(initial);
    Scenario::new(model, boundaries)
}

pub fn tank_scenario(q0: f64, x: f64, r: f64) -> Scenario {
    create_simple_scenario(Box::new(MixingTank::new(TankParameters::new(q0, x, r))))
}

/// Final sugar mass of a tank run
pub fn final_mass(result: &SimulationResult) -> f64 {
    result
        .final_state
        .scalar(PhysicalQuantity::Mass)
        .expect("result holds no mass")
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Largest relative error of a mass trajectory against the tank closed form
pub fn max_error_against_closed_form(result: &SimulationResult, params: &TankParameters) -> f64 {
    result
        .quantity_series(PhysicalQuantity::Mass)
        .expect("result holds no mass")
        .iter()
        .zip(result.time_points.iter())
        .map(|(q, t)| relative_error(*q, MixingTank::closed_form(params, *t)))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
