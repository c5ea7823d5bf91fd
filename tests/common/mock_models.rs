//! Mock physical models for testing
//!
//! These models have known analytical solutions, making them
//! ideal for validating numerical solver accuracy.

use sugar_rs::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// Exponential decay model: dy/dt = -k*y, y(0) = 1 on every point
///
/// Analytical solution: y(t) = exp(-k*t)
pub struct ExponentialDecay {
    pub points: usize,
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(points: usize, decay_rate: f64) -> Self {
        Self { points, decay_rate }
    }

    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn points(&self) -> usize {
        self.points
    }

    fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
        let mut result = state.clone();

        if let Some(conc) = result.get_mut(PhysicalQuantity::Concentration) {
            conc.apply(|y| -self.decay_rate * y);
        }

        result
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(
            PhysicalQuantity::Concentration,
            PhysicalData::uniform_vector(self.points, 1.0),
        )
    }

    fn analytical_state(&self, time: f64, initial: &PhysicalState) -> Option<PhysicalState> {
        let mut values = initial.get(PhysicalQuantity::Concentration)?.clone();
        values.apply(|y0| self.analytical_solution(time, y0));
        Some(PhysicalState::new(PhysicalQuantity::Concentration, values))
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Logistic Growth: dy/dt = r*y*(1 - y/K)
// =================================================================================================

/// Nonlinear scalar model with a closed form
///
/// y(t) = K / (1 + (K/y₀ − 1)·e^(−r·t))
pub struct LogisticGrowth {
    pub rate: f64,
    pub capacity: f64,
    pub initial: f64,
}

impl LogisticGrowth {
    pub fn new(rate: f64, capacity: f64, initial: f64) -> Self {
        Self { rate, capacity, initial }
    }

    pub fn analytical_solution(&self, t: f64) -> f64 {
        self.capacity / (1.0 + (self.capacity / self.initial - 1.0) * (-self.rate * t).exp())
    }
}

impl PhysicalModel for LogisticGrowth {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
        let y = state.scalar(PhysicalQuantity::Mass).unwrap_or(0.0);
        PhysicalState::new(
            PhysicalQuantity::Mass,
            PhysicalData::Scalar(self.rate * y * (1.0 - y / self.capacity)),
        )
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(self.initial))
    }

    fn name(&self) -> &str {
        "Logistic Growth"
    }
}

// =================================================================================================
// Constant Growth: dy/dt = c
// =================================================================================================

/// Constant growth model: dy/dt = c, no closed form exposed
///
/// Every solver is exact on it.
pub struct ConstantGrowth {
    pub growth_rate: f64,
}

impl ConstantGrowth {
    pub fn new(growth_rate: f64) -> Self {
        Self { growth_rate }
    }
}

impl PhysicalModel for ConstantGrowth {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, _time: f64, _state: &PhysicalState) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(self.growth_rate))
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(0.0))
    }

    fn name(&self) -> &str {
        "Constant Growth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_decay_analytical() {
        let model = ExponentialDecay::new(5, 0.5);
        assert!((model.analytical_solution(0.0, 1.0) - 1.0).abs() < 1e-10);
        assert!((model.analytical_solution(1.0, 1.0) - 0.6065306597).abs() < 1e-6);
    }

    #[test]
    fn test_logistic_limits() {
        let model = LogisticGrowth::new(1.0, 10.0, 1.0);
        assert!((model.analytical_solution(0.0) - 1.0).abs() < 1e-12);
        assert!((model.analytical_solution(100.0) - 10.0).abs() < 1e-9);
    }
}
