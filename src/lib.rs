//! sugar-rs: mixing-tank sugar simulation
//!
//! Models the sugar quantity Q (g) in a 100 L well-mixed tank fed at rate R
//! (L/min) with concentration X (g/L) and drained at the same rate:
//!
//! ```text
//! dQ/dt = R·(X − Q/100),   Q(0) = Q0
//! Q(t)  = 100·X + (Q0 − 100·X)·e^(−R·t/100)
//! ```
//!
//! and compares the trajectories obtained while one of R, Q0, X is swept.
//!
//! # Architecture
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define equations (what to solve)
//!    - Solvers provide methods (how to solve): closed form, adaptive
//!      Dormand-Prince, RK4, Euler
//!
//! 2. **Computation decoupled from display**
//!    - `ScenarioConfig` → `run_sweep` → `plot_sweep` / `export_sweep_csv` → viewer
//!
//! # Quick Start
//!
//! ```rust
//! use sugar_rs::models::{SweptParameter, TankParameters};
//! use sugar_rs::solver::SolverMethod;
//! use sugar_rs::sweep::run_sweep;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let base = TankParameters::new(1000.0, 10.0, 5.0);
//! let method = SolverMethod::DormandPrince;
//!
//! let result = run_sweep(
//!     &base,
//!     SweptParameter::FlowRate,
//!     &[2.0, 5.0, 10.0, 15.0],
//!     method.build().as_ref(),
//!     &method.configuration(100.0, 1000),
//! )?;
//!
//! for (label, entry) in result.labels().iter().zip(result.entries()) {
//!     println!("{}: Q(100) = {:.2} g", label, entry.series.final_quantity().unwrap_or(f64::NAN));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: model trait and state containers
//! - [`models`]: the mixing tank and its parameters
//! - [`solver`]: analytical and numerical solvers
//! - [`sweep`]: one-parameter sweeps
//! - [`goal`]: goals A / B / C and the run configuration
//! - [`output`]: charts, CSV export, viewer
//! - [`cli`]: interactive session

// Core modules
pub mod physics;

pub mod models;
pub mod solver;

pub mod sweep;
pub mod goal;

pub mod output;
pub mod cli;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use sugar_rs::prelude::*;
    //! ```
    pub use crate::physics::{PhysicalData,
                             PhysicalQuantity,
                             PhysicalState,
                             PhysicalModel};
    pub use crate::models::{MixingTank,
                            SweptParameter,
                            TankParameters};
    pub use crate::solver::{Solver,
                            SolverConfiguration,
                            SolverMethod,
                            SolverType,
                            Scenario,
                            SimulationResult,
                            AnalyticalSolver,
                            DormandPrinceSolver,
                            EulerSolver,
                            RK4Solver};
    pub use crate::sweep::{run_sweep, SweepResult};
    pub use crate::goal::{Goal, RunOptions, ScenarioConfig};
}
