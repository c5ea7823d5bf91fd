//! Physical data values
//!
//! A quantity tracked by a model is either a single number (a well-mixed tank
//! holds one sugar mass) or a vector of numbers (one value per compartment or
//! per test point). Solvers only ever combine data with `+`, `-` and scalar
//! `*`, so this module carries exactly those operations plus the reductions
//! the adaptive step-size control needs.

use nalgebra::DVector;
use std::fmt;

/// Scalar or vector payload of a physical quantity
///
/// # Examples
///
/// ```rust
/// use sugar_rs::physics::PhysicalData;
///
/// let mass = PhysicalData::Scalar(250.0);
/// let doubled = mass * 2.0;
/// assert_eq!(doubled.as_scalar(), 500.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicalData {
    /// Single value, e.g. the sugar mass in one tank
    Scalar(f64),

    /// One value per point
    Vector(DVector<f64>),
}

impl PhysicalData {

    // ======================================= constructors =======================================

    pub fn from_scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::Vector(DVector::from_vec(values))
    }

    /// Vector of `size` identical values
    pub fn uniform_vector(size: usize, value: f64) -> Self {
        Self::Vector(DVector::from_element(size, value))
    }

    /// Same shape as `self`, every entry set to `value`
    pub fn filled_like(&self, value: f64) -> Self {
        match self {
            PhysicalData::Scalar(_) => PhysicalData::Scalar(value),
            PhysicalData::Vector(v) => PhysicalData::uniform_vector(v.len(), value),
        }
    }

    // ========================================== Queries ==========================================

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Number of stored values (1 for a scalar)
    pub fn len(&self) -> usize {
        match self {
            PhysicalData::Scalar(_) => 1,
            PhysicalData::Vector(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the stored values, scalar or vector alike
    pub fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            PhysicalData::Scalar(x) => Box::new(std::iter::once(*x)),
            PhysicalData::Vector(v) => Box::new(v.iter().copied()),
        }
    }

    /// `true` when every value is finite
    pub fn is_finite(&self) -> bool {
        self.values().all(f64::is_finite)
    }

    // ======================================== Extractions ========================================

    /// Extract as a scalar (panic if not)
    pub fn as_scalar(&self) -> f64 {
        match self {
            PhysicalData::Scalar(value) => *value,
            _ => panic!("Not a scalar value"),
        }
    }

    pub fn try_as_scalar(&self) -> Option<f64> {
        match self {
            PhysicalData::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Extract as a DVector (panic if not)
    pub fn as_vector(&self) -> &DVector<f64> {
        match self {
            PhysicalData::Vector(value) => value,
            _ => panic!("Not a vector value"),
        }
    }

    pub fn try_as_vector(&self) -> Option<&DVector<f64>> {
        match self {
            PhysicalData::Vector(value) => Some(value),
            _ => None,
        }
    }

    /// First stored value; the sugar mass for a single tank
    pub fn first(&self) -> Option<f64> {
        self.values().next()
    }

    // ====================================== Apply functions ======================================

    /// Apply `f` to every value in place
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        match self {
            PhysicalData::Scalar(value) => *value = f(*value),
            PhysicalData::Vector(value) => value.iter_mut().for_each(|x| *x = f(*x)),
        }
    }

    /// Combine two data of the same shape element-wise
    ///
    /// Scalars broadcast against vectors, as in the arithmetic operators.
    pub fn zip_with<F>(&self, other: &PhysicalData, f: F) -> PhysicalData
    where
        F: Fn(f64, f64) -> f64,
    {
        use PhysicalData::*;
        match (self, other) {
            (Scalar(x), Scalar(y)) => Scalar(f(*x, *y)),
            (Scalar(x), Vector(y)) => Vector(y.map(|e| f(*x, e))),
            (Vector(x), Scalar(y)) => Vector(x.map(|e| f(e, *y))),
            (Vector(x), Vector(y)) => {
                assert_eq!(x.len(), y.len(), "Vector length must match");
                Vector(x.zip_map(y, |a, b| f(a, b)))
            }
        }
    }
}

// ================================== Simple arithmetic functions ==================================

impl std::ops::Add for PhysicalData {
    type Output = PhysicalData;
    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl std::ops::Sub for PhysicalData {
    type Output = PhysicalData;
    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl std::ops::Mul<f64> for PhysicalData {
    type Output = PhysicalData;
    fn mul(self, scalar: f64) -> Self::Output {
        match self {
            PhysicalData::Scalar(x) => PhysicalData::Scalar(x * scalar),
            PhysicalData::Vector(x) => PhysicalData::Vector(x * scalar),
        }
    }
}

impl std::ops::Mul<PhysicalData> for f64 {
    type Output = PhysicalData;
    fn mul(self, rhs: PhysicalData) -> Self::Output {
        rhs * self
    }
}

impl std::ops::AddAssign for PhysicalData {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.zip_with(&rhs, |a, b| a + b);
    }
}

// ======================== Display ============================

impl fmt::Display for PhysicalData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalData::Scalar(value) => write!(f, "Scalar ({})", value),
            PhysicalData::Vector(value) => write!(f, "Vector [{}]", value.len()),
        }
    }
}

// ==================== Tests ====================
