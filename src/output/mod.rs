//! Output of sweep results
//!
//! - **Visualization**: PNG/SVG charts using plotters
//! - **Export**: CSV data for external analysis
//! - **Viewer**: opening a rendered chart on screen
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── viewer.rs           ← platform viewer
//! ├── visualization/      ← charts
//! │   ├── config.rs
//! │   └── sweep.rs
//! └── export/             ← data files
//!     └── csv.rs
//! ```
//!
//! Nothing here computes: every function takes a finished
//! [`SweepResult`](crate::sweep::SweepResult), so a sweep can be rendered,
//! exported or both without solving again.

pub mod visualization;
pub mod export;
pub mod viewer;

pub use visualization::{plot_sweep, PlotConfig};
pub use export::{export_sweep_csv, CsvConfig, CsvMetadata};
pub use viewer::open_with_default_viewer;
