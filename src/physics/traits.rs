//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all physical models
//! - `PhysicalState`: flexible state container
//! - `PhysicalQuantity`: type-safe quantity identifiers

use crate::physics::PhysicalData;
use std::collections::HashMap;
use std::fmt;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities
///
/// # Example
/// ```
/// use sugar_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let salt = PhysicalQuantity::Custom("Salt");
/// let mut state = PhysicalState::empty();
/// state.set(salt, PhysicalData::Scalar(3.0));
/// assert_eq!(state.get(salt), Some(&PhysicalData::Scalar(3.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Dissolved mass (g)
    Mass,

    /// Concentration (g/L)
    Concentration,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalQuantity::Mass => write!(f, "Mass"),
            PhysicalQuantity::Concentration => write!(f, "Concentration"),
            PhysicalQuantity::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Physical State (Flexible State Container)
// =================================================================================================

/// Physical state of the system
///
/// Holds every tracked quantity at one instant. Solvers treat a state as a
/// vector space element: `state + derivative * dt` is the basic update.
///
/// # Example
/// ```
/// use sugar_rs::physics::{PhysicalData, PhysicalQuantity, PhysicalState};
///
/// let state = PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(100.0));
/// let next = state.clone() + state * 0.5;
/// assert_eq!(next.get(PhysicalQuantity::Mass).unwrap().as_scalar(), 150.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalState {
    /// Physical quantities stored in a dictionary
    pub(crate) quantities: HashMap<PhysicalQuantity, PhysicalData>,

    /// Scalar metadata (optional)
    metadata: HashMap<String, f64>,
}

impl PhysicalState {
    /// Create a new state with primary quantity
    pub fn new(quantity: PhysicalQuantity, value: PhysicalData) -> Self {
        let mut quantities = HashMap::new();
        quantities.insert(quantity, value);

        Self {
            quantities,
            metadata: HashMap::new(),
        }
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self {
            quantities: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    /// Get a quantity by type
    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&PhysicalData> {
        self.quantities.get(&quantity)
    }

    /// Get mutable reference to a quantity
    pub fn get_mut(&mut self, quantity: PhysicalQuantity) -> Option<&mut PhysicalData> {
        self.quantities.get_mut(&quantity)
    }

    /// Set a quantity
    pub fn set(&mut self, quantity: PhysicalQuantity, value: PhysicalData) {
        self.quantities.insert(quantity, value);
    }

    /// Scalar view of a quantity: the value itself, or the first vector entry
    pub fn scalar(&self, quantity: PhysicalQuantity) -> Option<f64> {
        self.get(quantity).and_then(PhysicalData::first)
    }

    /// Iterate over `(quantity, data)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&PhysicalQuantity, &PhysicalData)> {
        self.quantities.iter()
    }

    /// Total number of stored values over all quantities
    pub fn dimension(&self) -> usize {
        self.quantities.values().map(PhysicalData::len).sum()
    }

    /// Get a metadata
    pub fn get_metadata(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).copied()
    }

    /// Set a metadata
    pub fn set_metadata(&mut self, key: String, value: f64) {
        self.metadata.insert(key, value);
    }

    /// Combine with another state quantity by quantity
    ///
    /// Quantities present in only one of the two states are kept unchanged
    /// (on the left) or copied through `f(0, value)` (on the right).
    pub fn combine<F>(&self, other: &PhysicalState, f: F) -> PhysicalState
    where
        F: Fn(f64, f64) -> f64,
    {
        let mut result = self.clone();
        for (quantity, value) in &other.quantities {
            let combined = match self.quantities.get(quantity) {
                Some(existing) => existing.zip_with(value, &f),
                None => value.filled_like(0.0).zip_with(value, &f),
            };
            result.quantities.insert(*quantity, combined);
        }
        result
    }
}

// Operator overloading for numerical operations

impl std::ops::Add for PhysicalState {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (quantity, value) in rhs.quantities {
            if let Some(existing_value) = self.get_mut(quantity) {
                *existing_value += value;
            } else {
                self.quantities.insert(quantity, value);
            }
        }
        self
    }
}

impl std::ops::Sub for PhysicalState {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.combine(&rhs, |a, b| a - b)
    }
}

impl std::ops::Mul<f64> for PhysicalState {
    type Output = Self;

    fn mul(mut self, scalar: f64) -> Self::Output {
        for data in self.quantities.values_mut() {
            data.apply(|x| x * scalar);
        }
        self
    }
}

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Computes the right-hand side of a system at a given time and state.
/// Does NOT solve it (that's the Solver's job).
///
/// The model provides the "physics" (equations), the Solver provides
/// the "numerics" (method to solve them).
///
/// Models with a known closed-form solution expose it through
/// [`analytical_state`](PhysicalModel::analytical_state); solvers that need
/// it (the analytical solver, accuracy tests) fall back to an error when a
/// model does not provide one.
pub trait PhysicalModel: Send + Sync {

    /// Number of points per quantity
    fn points(&self) -> usize;

    /// Right-hand side f(t, y) of dy/dt = f(t, y)
    ///
    /// # Arguments
    /// * `time` - Current time
    /// * `state` - Current physical state of the system
    fn compute_physics(&self, time: f64, state: &PhysicalState) -> PhysicalState;

    /// Creates the initial state y(0) for this physical model
    fn setup_initial_state(&self) -> PhysicalState;

    /// Exact state `time` after starting from `initial`, when the model has
    /// a closed form
    ///
    /// The initial state is the one the scenario actually starts from, which
    /// need not be [`setup_initial_state`](PhysicalModel::setup_initial_state).
    fn analytical_state(&self, _time: f64, _initial: &PhysicalState) -> Option<PhysicalState> {
        None
    }

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}
