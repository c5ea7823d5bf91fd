//! Output time grids
//!
//! Every solver reports its solution on a [`TimeGrid`]: a non-empty,
//! non-negative, strictly increasing list of instants. Uniform grids are
//! built with `ndarray`'s `linspace`, the same sampling a plotting script
//! would use.

use ndarray::Array1;

/// Ordered sampling instants
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

impl TimeGrid {
    /// `samples` equally spaced points from 0 to `horizon`, both included
    ///
    /// # Example
    ///
    /// ```rust
    /// use sugar_rs::solver::TimeGrid;
    ///
    /// let grid = TimeGrid::uniform(100.0, 10000).unwrap();
    /// assert_eq!(grid.len(), 10000);
    /// assert_eq!(grid.points()[0], 0.0);
    /// assert_eq!(grid.end(), 100.0);
    /// ```
    pub fn uniform(horizon: f64, samples: usize) -> Result<Self, String> {
        if !(horizon > 0.0) || !horizon.is_finite() {
            return Err(format!("Horizon must be positive and finite, got {}", horizon));
        }
        if samples < 2 {
            return Err(format!("A uniform grid needs at least 2 samples, got {}", samples));
        }

        let mut points = Array1::linspace(0.0, horizon, samples).to_vec();

        // linspace accumulates rounding; pin the end point
        if let Some(last) = points.last_mut() {
            *last = horizon;
        }

        Ok(Self { points })
    }

    /// Grid from caller-supplied instants
    pub fn from_points(points: Vec<f64>) -> Result<Self, String> {
        if points.is_empty() {
            return Err("Time grid must contain at least one point".to_string());
        }
        if let Some(bad) = points.iter().find(|t| !t.is_finite() || **t < 0.0) {
            return Err(format!("Time grid points must be finite and non-negative, got {}", bad));
        }
        if let Some(pair) = points.windows(2).find(|w| w[1] <= w[0]) {
            return Err(format!(
                "Time grid must be strictly increasing, got {} then {}",
                pair[0], pair[1]
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last instant
    pub fn end(&self) -> f64 {
        self.points.last().copied().unwrap_or(0.0)
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.points
    }
}

// =================================================================================================
// Tests
// =================================================================================================
