//! Physical models
//!
//! This module provides the traits and data types every model is written
//! against. A physical model encapsulates the equations of a system; the
//! mixing tank in [`crate::models`] is one of them.
//!
//! # Core Concepts
//!
//! - **Physical Model**: Computes the right-hand side at a given time and state
//! - **Physical State**: Container for all physical quantities (mass, concentration, ...)
//! - **Physical Quantity**: Type-safe identifier for physical variables
//!
//! # Architecture
//!
//! Physical models are **separate from numerical solvers**:
//! - The model provides the **equations** (physics)
//! - The solver provides the **method** to solve them (numerics)
//!
//! # Example
//!
//! ```rust
//! use sugar_rs::physics::{PhysicalModel, PhysicalState, PhysicalQuantity, PhysicalData};
//!
//! struct Leak { rate: f64 }
//!
//! impl PhysicalModel for Leak {
//!     fn points(&self) -> usize { 1 }
//!     fn compute_physics(&self, _time: f64, state: &PhysicalState) -> PhysicalState {
//!         state.clone() * (-self.rate)
//!     }
//!     fn setup_initial_state(&self) -> PhysicalState {
//!         PhysicalState::new(PhysicalQuantity::Mass, PhysicalData::Scalar(1.0))
//!     }
//!     fn name(&self) -> &str { "Leak" }
//! }
//!
//! let model = Leak { rate: 0.5 };
//! let initial_state = model.setup_initial_state();
//! let slope = model.compute_physics(0.0, &initial_state);
//! assert_eq!(slope.scalar(PhysicalQuantity::Mass), Some(-0.5));
//! ```

pub mod traits;
pub mod data;

pub use data::PhysicalData;
pub use traits::{
    PhysicalModel,
    PhysicalQuantity,
    PhysicalState, };
