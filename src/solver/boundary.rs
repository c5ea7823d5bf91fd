//! Initial conditions of a time-dependent problem
//!
//! A well-mixed tank has no spatial extent, so its domain is the time axis
//! alone. The boundary data is the state at the start of that axis and the
//! instant that axis starts at.

use crate::physics::PhysicalState;

/// Temporal domain of an ODE problem
///
/// # Examples
///
/// ```rust
/// use sugar_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
/// use sugar_rs::solver::DomainBoundaries;
///
/// let initial = PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(1000.0));
/// let boundaries = DomainBoundaries::temporal(initial);
///
/// assert!(boundaries.validate().is_ok());
/// assert_eq!(boundaries.start_time(), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainBoundaries {
    start_time: f64,
    initial: Option<PhysicalState>,
}

impl DomainBoundaries {

    // ====================================== Factory methods ======================================

    /// Temporal-only domain starting at t = 0
    pub fn temporal(initial: PhysicalState) -> Self {
        Self {
            start_time: 0.0,
            initial: Some(initial),
        }
    }

    /// Builder: shift the start of the time axis
    pub fn starting_at(mut self, start_time: f64) -> Self {
        self.start_time = start_time;
        self
    }

    // ========================================== Queries ==========================================

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// State at `start_time`
    pub fn initial_condition(&self) -> Option<&PhysicalState> {
        self.initial.as_ref()
    }

    /// Check the initial state exists and holds finite values
    pub fn validate(&self) -> Result<(), String> {
        if !self.start_time.is_finite() {
            return Err(format!("Start time must be finite, got {}", self.start_time));
        }

        let initial = self
            .initial
            .as_ref()
            .ok_or_else(|| "No initial condition found in domain boundaries".to_string())?;

        if initial.dimension() == 0 {
            return Err("Initial condition holds no quantity".to_string());
        }

        for (quantity, data) in initial.iter() {
            if !data.is_finite() {
                return Err(format!("Initial condition for {} is not finite", quantity));
            }
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{PhysicalData, PhysicalQuantity};

    fn mass(q: f64) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(q))
    }

    #[test]
    fn test_temporal_boundaries() {
        let boundaries = DomainBoundaries::temporal(mass(3.0));
        assert!(boundaries.validate().is_ok());
        assert_eq!(boundaries.initial_condition(), Some(&mass(3.0)));
        assert_eq!(boundaries.start_time(), 0.0);
    }

    #[test]
    fn test_default_has_no_initial_condition() {
        let err = DomainBoundaries::default().validate().unwrap_err();
        assert!(err.contains("No initial condition"));
    }

    #[test]
    fn test_empty_initial_state_rejected() {
        let boundaries = DomainBoundaries::temporal(PhysicalState::empty());
        assert!(boundaries.validate().is_err());
    }

    #[test]
    fn test_non_finite_initial_state_rejected() {
        let boundaries = DomainBoundaries::temporal(mass(f64::NAN));
        assert!(boundaries.validate().unwrap_err().contains("Mass"));
    }

    #[test]
    fn test_builders() {
        let boundaries = DomainBoundaries::temporal(mass(0.0)).starting_at(2.0);
        assert_eq!(boundaries.start_time(), 2.0);
        assert_eq!(boundaries.initial_condition(), Some(&mass(0.0)));
        assert!(DomainBoundaries::temporal(mass(0.0)).starting_at(f64::NAN).validate().is_err());
    }
}
