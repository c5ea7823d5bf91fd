//! Export of sweep results for external analysis
//!
//! | Format | Module  |
//! |--------|---------|
//! | CSV    | [`csv`] |
//!
//! Every exporter takes the [`SweepResult`](crate::sweep::SweepResult) as is
//! and an optional format configuration; `None` means defaults.

pub mod csv;

pub use csv::{export_sweep_csv, CsvConfig, CsvMetadata};
