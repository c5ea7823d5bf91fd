//! Tank parameters and the swept-parameter identifiers
//!
//! Three numbers define one tank run: the initial sugar quantity Q0, the
//! inflow concentration X and the flow rate R. A sweep varies exactly one of
//! them; [`SweptParameter`] names which.

use std::fmt;

/// Parameters of a single mixing-tank run
///
/// No sign constraint is enforced: negative or zero values are evaluated as
/// given, which is what the closed form does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankParameters {
    /// Q0: sugar quantity in the tank at t = 0 (g)
    pub initial_quantity: f64,

    /// X: sugar concentration of the inflow (g/L)
    pub inflow_concentration: f64,

    /// R: inflow and outflow rate (L/min)
    pub flow_rate: f64,
}

impl TankParameters {
    pub fn new(initial_quantity: f64, inflow_concentration: f64, flow_rate: f64) -> Self {
        Self { initial_quantity, inflow_concentration, flow_rate }
    }

    /// Copy of `self` with `parameter` overwritten by `value`
    ///
    /// # Example
    ///
    /// ```rust
    /// use sugar_rs::models::{SweptParameter, TankParameters};
    ///
    /// let base = TankParameters::new(1000.0, 10.0, 5.0);
    /// let faster = base.with(SweptParameter::FlowRate, 15.0);
    /// assert_eq!(faster.flow_rate, 15.0);
    /// assert_eq!(base.flow_rate, 5.0);
    /// ```
    pub fn with(mut self, parameter: SweptParameter, value: f64) -> Self {
        match parameter {
            SweptParameter::InitialQuantity => self.initial_quantity = value,
            SweptParameter::InflowConcentration => self.inflow_concentration = value,
            SweptParameter::FlowRate => self.flow_rate = value,
        }
        self
    }

    /// Current value of `parameter`
    pub fn get(&self, parameter: SweptParameter) -> f64 {
        match parameter {
            SweptParameter::InitialQuantity => self.initial_quantity,
            SweptParameter::InflowConcentration => self.inflow_concentration,
            SweptParameter::FlowRate => self.flow_rate,
        }
    }

    /// Reject NaN and infinite inputs
    pub fn validate(&self) -> Result<(), String> {
        for parameter in SweptParameter::ALL {
            let value = self.get(parameter);
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", parameter.symbol(), value));
            }
        }
        Ok(())
    }
}

impl fmt::Display for TankParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Q0={} g, X={} g/L, R={} L/min",
            self.initial_quantity, self.inflow_concentration, self.flow_rate
        )
    }
}

/// The parameter varied by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweptParameter {
    /// R
    FlowRate,
    /// Q0
    InitialQuantity,
    /// X
    InflowConcentration,
}

impl SweptParameter {
    pub const ALL: [SweptParameter; 3] = [
        SweptParameter::InitialQuantity,
        SweptParameter::InflowConcentration,
        SweptParameter::FlowRate,
    ];

    /// Short symbol used in legends and CSV headers
    pub fn symbol(&self) -> &'static str {
        match self {
            SweptParameter::FlowRate => "R",
            SweptParameter::InitialQuantity => "Q0",
            SweptParameter::InflowConcentration => "X",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SweptParameter::FlowRate => "L/min",
            SweptParameter::InitialQuantity => "g",
            SweptParameter::InflowConcentration => "g/L",
        }
    }

    /// Legend label of one curve, e.g. `R=5`
    pub fn label(&self, value: f64) -> String {
        format!("{}={}", self.symbol(), value)
    }
}

impl fmt::Display for SweptParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overwrites_only_one_parameter() {
        let base = TankParameters::new(1000.0, 10.0, 5.0);

        let q = base.with(SweptParameter::InitialQuantity, 0.0);
        assert_eq!(q, TankParameters::new(0.0, 10.0, 5.0));

        let x = base.with(SweptParameter::InflowConcentration, 2.5);
        assert_eq!(x, TankParameters::new(1000.0, 2.5, 5.0));

        let r = base.with(SweptParameter::FlowRate, 15.0);
        assert_eq!(r, TankParameters::new(1000.0, 10.0, 15.0));
    }

    #[test]
    fn test_get_matches_fields() {
        let p = TankParameters::new(1.0, 2.0, 3.0);
        assert_eq!(p.get(SweptParameter::InitialQuantity), 1.0);
        assert_eq!(p.get(SweptParameter::InflowConcentration), 2.0);
        assert_eq!(p.get(SweptParameter::FlowRate), 3.0);
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(TankParameters::new(1.0, 2.0, 3.0).validate().is_ok());
        assert!(TankParameters::new(-1.0, 0.0, -3.0).validate().is_ok());

        let err = TankParameters::new(1.0, f64::NAN, 3.0).validate().unwrap_err();
        assert!(err.contains("X"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(SweptParameter::FlowRate.label(5.0), "R=5");
        assert_eq!(SweptParameter::InitialQuantity.label(1000.0), "Q0=1000");
        assert_eq!(SweptParameter::InflowConcentration.label(2.5), "X=2.5");
    }
}
