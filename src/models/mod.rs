//! Physical models for the sugar tank study
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The solver calls `compute_physics` at each stage; the model is only
//! responsible for the mass balance, the solver for the time integration.
//!
//! # Available Models
//!
//! ## [`MixingTank`]
//!
//! Constant-volume stirred tank with sugar-water inflow and outflow at the
//! same rate. Provides both the derivative and the closed-form solution.
//!
//! # Parameters
//!
//! [`TankParameters`] holds Q0, X and R. [`SweptParameter`] identifies which
//! of the three a sweep varies.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod mixing_tank;
pub mod parameters;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use mixing_tank::{MixingTank, TANK_VOLUME};
pub use parameters::{SweptParameter, TankParameters};
