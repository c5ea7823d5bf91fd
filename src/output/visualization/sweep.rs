//! Sweep plots: sugar quantity against time, one curve per swept value
//!
//! # Example
//!
//! ```rust,no_run
//! use sugar_rs::models::{SweptParameter, TankParameters};
//! use sugar_rs::output::visualization::{plot_sweep, PlotConfig};
//! use sugar_rs::solver::{AnalyticalSolver, SolverConfiguration};
//! use sugar_rs::sweep::run_sweep;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let result = run_sweep(
//!     &TankParameters::new(1000.0, 10.0, 5.0),
//!     SweptParameter::FlowRate,
//!     &[2.0, 5.0, 10.0, 15.0],
//!     &AnalyticalSolver::new(),
//!     &SolverConfiguration::adaptive(100.0, 999),
//! )?;
//!
//! let config = PlotConfig::sweep("Impact of Inflow/Outflow Rate (R)");
//! plot_sweep(&result, "goal_a.png", Some(&config))?;
//! # Ok(())
//! # }
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use crate::output::visualization::config::{PlotConfig, NO_TITLE};
use crate::sweep::SweepResult;

/// Axis bounds of a sweep plot
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotRange {
    time: (f64, f64),
    quantity: (f64, f64),
}

impl PlotRange {
    /// Bounds covering every curve, with a 5 % vertical margin
    ///
    /// A flat set of curves (steady state, R = 0) still gets a visible band.
    fn of(result: &SweepResult) -> Result<Self, String> {
        let (lo, hi) = result
            .quantity_range()
            .ok_or_else(|| "No data to plot".to_string())?;

        if !lo.is_finite() || !hi.is_finite() {
            return Err("Invalid data: NaN or Inf detected in sweep".to_string());
        }

        let span = hi - lo;
        let pad = if span > 1e-12 * hi.abs().max(1.0) {
            0.05 * span
        } else {
            0.05 * hi.abs().max(1.0)
        };

        let t_start = result
            .entries()
            .iter()
            .filter_map(|e| e.series.time.first().copied())
            .fold(f64::INFINITY, f64::min);
        let t_end = result.time_end().unwrap_or(t_start);
        let t_end = if t_end > t_start { t_end } else { t_start + 1.0 };

        Ok(Self {
            time: (t_start, t_end),
            quantity: (lo - pad, hi + pad),
        })
    }
}

/// Plot every run of a sweep on one chart
///
/// The backend follows the extension of `output_path`: `.svg` gives an SVG
/// file, anything else a PNG bitmap. Curves are labeled `"<symbol>=<value>"`.
///
/// # Errors
///
/// Returns `Err` for an empty sweep, non-finite data, or when the backend
/// cannot write the file.
pub fn plot_sweep(
    result: &SweepResult,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if result.is_empty() {
        return Err("No sweep entry to plot".into());
    }

    let default_config = PlotConfig::sweep(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let range = PlotRange::of(result)?;
    let output_path = output_path.as_ref();

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            plot_sweep_impl(root, result, config, range)
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            plot_sweep_impl(root, result, config, range)
        }
    }
}

// =================================================================================================
// Private Plot Implementation
// =================================================================================================

fn time_label(t: &f64) -> String {
    format!("{:.0}", t)
}

fn quantity_label(q: &f64) -> String {
    format!("{:.1}", q)
}

fn plot_sweep_impl<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    result: &SweepResult,
    config: &PlotConfig,
    range: PlotRange,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(
            range.time.0..range.time.1,
            range.quantity.0..range.quantity.1,
        )?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&time_label)
        .y_label_formatter(&quantity_label);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for (idx, (entry, label)) in result.entries().iter().zip(result.labels()).enumerate() {
        let color = config.series_color(idx);

        chart
            .draw_series(LineSeries::new(
                entry
                    .series
                    .time
                    .iter()
                    .zip(entry.series.quantity.iter())
                    .map(|(t, q)| (*t, *q)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    if config.show_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&config.background.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
