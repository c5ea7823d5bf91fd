//! Visualization of sweep results with `plotters`
//!
//! # Organization
//!
//! - **config**: plot configuration (`PlotConfig`)
//! - **sweep**: one curve per swept value (`plot_sweep`)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sugar_rs::output::visualization::{plot_sweep, PlotConfig};
//!
//! let result = run_sweep(&base, SweptParameter::FlowRate, &[2.0, 5.0], &solver, &config)?;
//!
//! // Default labels
//! plot_sweep(&result, "sweep.png", None)?;
//!
//! // Goal title, SVG output
//! let config = PlotConfig::sweep(Goal::A.title());
//! plot_sweep(&result, "goal_a.svg", Some(&config))?;
//! ```

pub mod config;
pub mod sweep;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use sweep::plot_sweep;
