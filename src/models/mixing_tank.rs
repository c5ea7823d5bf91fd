//! Well-mixed sugar tank
//!
//! # Physical Model
//!
//! A tank of constant volume V = 100 L is fed with sugar water of
//! concentration X (g/L) at R L/min, and drained at the same rate. With Q(t)
//! the dissolved sugar mass (g), the outflow concentration is Q/V, so
//!
//! ```text
//! dQ/dt = R·X − R·Q/V = R·(X − Q/100)
//! ```
//!
//! # Closed Form
//!
//! The equation is linear with constant coefficients:
//!
//! ```text
//! Q(t) = V·X + (Q0 − V·X)·exp(−R·t/V)
//! ```
//!
//! - Q(t) → V·X as t → ∞ whenever R > 0
//! - R = 0 gives Q(t) = Q0
//! - Q0 = V·X gives a flat line
//!
//! # State Layout
//!
//! The state carries one scalar, `PhysicalQuantity::Mass`.

use crate::models::TankParameters;
use crate::physics::{PhysicalData, PhysicalModel, PhysicalQuantity, PhysicalState};

/// Tank volume in liters
pub const TANK_VOLUME: f64 = 100.0;

/// Sugar mass balance in a constant-volume stirred tank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixingTank {
    parameters: TankParameters,
}

impl MixingTank {
    pub fn new(parameters: TankParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &TankParameters {
        &self.parameters
    }

    /// Q(t) = 100·X + (Q0 − 100·X)·e^(−R·t/100)
    ///
    /// Pure and defined for every real input. The result may overflow to
    /// infinity for large negative R·t; callers that need finite values
    /// check for it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sugar_rs::models::{MixingTank, TankParameters};
    ///
    /// let params = TankParameters::new(1000.0, 10.0, 5.0);
    /// assert_eq!(MixingTank::closed_form(&params, 0.0), 1000.0);
    /// ```
    pub fn closed_form(parameters: &TankParameters, time: f64) -> f64 {
        let equilibrium = Self::steady_state(parameters);
        let decay = (-parameters.flow_rate * time / TANK_VOLUME).exp();
        equilibrium + (parameters.initial_quantity - equilibrium) * decay
    }

    /// dQ/dt = R·X − (R/100)·Q
    pub fn derivative(parameters: &TankParameters, quantity: f64) -> f64 {
        parameters.flow_rate * parameters.inflow_concentration
            - parameters.flow_rate / TANK_VOLUME * quantity
    }

    /// Long-time limit 100·X
    pub fn steady_state(parameters: &TankParameters) -> f64 {
        TANK_VOLUME * parameters.inflow_concentration
    }

    /// Relaxation time V/R, `None` when the tank is not flushed
    pub fn time_constant(parameters: &TankParameters) -> Option<f64> {
        if parameters.flow_rate == 0.0 {
            None
        } else {
            Some(TANK_VOLUME / parameters.flow_rate)
        }
    }

    fn mass_state(quantity: f64) -> PhysicalState {
        let mut state = PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(quantity));
        state.set_metadata("volume".to_string(), TANK_VOLUME);
        state
    }
}

impl PhysicalModel for MixingTank {
    fn points(&self) -> usize {
        1
    }

    fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
        let mut slope = state
            .get(PhysicalQuantity::Mass)
            .cloned()
            .unwrap_or(PhysicalData::Scalar(0.0));

        slope.apply(|q| Self::derivative(&self.parameters, q));

        PhysicalState::new(PhysicalQuantity::Mass, slope)
    }

    fn setup_initial_state(&self) -> PhysicalState {
        Self::mass_state(self.parameters.initial_quantity)
    }

    fn analytical_state(&self, time: f64, initial: &PhysicalState) -> Option<PhysicalState> {
        let mut quantity = initial.get(PhysicalQuantity::Mass)?.clone();
        quantity.apply(|q0| {
            let parameters = TankParameters { initial_quantity: q0, ..self.parameters };
            Self::closed_form(&parameters, time)
        });

        let mut state = PhysicalState::new(PhysicalQuantity::Mass, quantity);
        state.set_metadata("volume".to_string(), TANK_VOLUME);
        Some(state)
    }

    fn name(&self) -> &str {
        "Mixing Tank"
    }

    fn description(&self) -> Option<&str> {
        Some("dQ/dt = R(X - Q/100), constant 100 L volume")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> TankParameters {
        TankParameters::new(1000.0, 10.0, 5.0)
    }

    #[test]
    fn test_closed_form_at_origin_is_initial_quantity() {
        assert_eq!(MixingTank::closed_form(&base(), 0.0), 1000.0);
    }

    #[test]
    fn test_closed_form_reaches_steady_state() {
        let params = TankParameters::new(0.0, 10.0, 5.0);
        assert_relative_eq!(MixingTank::closed_form(&params, 1000.0), 1000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_flow_keeps_initial_quantity() {
        let params = TankParameters::new(321.0, 10.0, 0.0);
        for t in [0.0, 1.0, 50.0, 1e6] {
            assert_eq!(MixingTank::closed_form(&params, t), 321.0);
        }
        assert_eq!(MixingTank::time_constant(&params), None);
    }

    #[test]
    fn test_equilibrium_start_is_flat() {
        let params = TankParameters::new(500.0, 5.0, 12.0);
        for t in [0.0, 3.0, 90.0] {
            assert_relative_eq!(MixingTank::closed_form(&params, t), 500.0);
        }
        assert_eq!(MixingTank::derivative(&params, 500.0), 0.0);
    }

    #[test]
    fn test_closed_form_solves_the_ode() {
        // Central difference of the closed form matches the right-hand side
        let params = TankParameters::new(200.0, 3.0, 7.0);
        let h = 1e-5;
        for t in [0.5, 10.0, 40.0] {
            let numeric = (MixingTank::closed_form(&params, t + h)
                - MixingTank::closed_form(&params, t - h))
                / (2.0 * h);
            let q = MixingTank::closed_form(&params, t);
            assert_relative_eq!(numeric, MixingTank::derivative(&params, q), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_model_state_layout() {
        let tank = MixingTank::new(base());
        let initial = tank.setup_initial_state();

        assert_eq!(initial.scalar(PhysicalQuantity::Mass), Some(1000.0));
        assert_eq!(initial.get_metadata("volume"), Some(TANK_VOLUME));

        // R·X − R/100·Q = 50 − 50 = 0 at Q = 1000
        let slope = tank.compute_physics(0.0, &initial);
        assert_eq!(slope.scalar(PhysicalQuantity::Mass), Some(0.0));
    }

    #[test]
    fn test_model_exposes_closed_form() {
        let tank = MixingTank::new(TankParameters::new(0.0, 10.0, 5.0));
        let state = tank.analytical_state(20.0, &tank.setup_initial_state()).unwrap();
        let expected = 1000.0 * (1.0 - (-1.0_f64).exp());
        assert_relative_eq!(state.scalar(PhysicalQuantity::Mass).unwrap(), expected);
        assert_eq!(state.get_metadata("volume"), Some(TANK_VOLUME));
        assert_eq!(MixingTank::time_constant(tank.parameters()), Some(20.0));
    }

    #[test]
    fn test_closed_form_follows_given_initial_state() {
        // Parameters say Q0 = 0; the state handed in starts at 2000 g
        let tank = MixingTank::new(TankParameters::new(0.0, 10.0, 5.0));
        let initial = MixingTank::mass_state(2000.0);

        let at_start = tank.analytical_state(0.0, &initial).unwrap();
        assert_eq!(at_start.scalar(PhysicalQuantity::Mass), Some(2000.0));

        let later = tank.analytical_state(20.0, &initial).unwrap();
        let expected = 1000.0 + 1000.0 * (-1.0_f64).exp();
        assert_relative_eq!(later.scalar(PhysicalQuantity::Mass).unwrap(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_closed_form_needs_a_mass() {
        let tank = MixingTank::new(base());
        let other = PhysicalState::new(PhysicalQuantity::Concentration, PhysicalData::Scalar(1.0));
        assert!(tank.analytical_state(1.0, &other).is_none());
    }
}
