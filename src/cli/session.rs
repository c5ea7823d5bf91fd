//! Interactive session: prompts, then sweep and output
//!
//! [`read_scenario`] talks to any `BufRead` / `Write` pair, so scripted
//! input drives it exactly like a terminal. [`execute`] never prompts and
//! never opens a window.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use log::info;

use crate::cli::input::{parse_single, parse_solver, parse_values};
use crate::cli::CliError;
use crate::goal::{Goal, RunOptions, ScenarioConfig};
use crate::models::{MixingTank, SweptParameter, TankParameters};
use crate::output::{export_sweep_csv, plot_sweep, CsvConfig, CsvMetadata, PlotConfig};
use crate::sweep::{run_sweep, SweepResult};

/// Prompts in the order they are asked
const PARAMETER_ORDER: [SweptParameter; 3] = [
    SweptParameter::InitialQuantity,
    SweptParameter::InflowConcentration,
    SweptParameter::FlowRate,
];

const GOAL_PROMPT: &str = "Enter the goal type (A, B, C): ";
const SOLVER_PROMPT: &str = "Enter the solver (analytical, rk45, rk4, euler) [analytical]: ";

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String, CliError> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Ask for the goal, the three parameters and the solver
///
/// Fails on the first invalid answer; nothing is solved or written.
pub fn read_scenario<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    options: RunOptions,
) -> Result<ScenarioConfig, CliError> {
    options.validate().map_err(CliError::InvalidOptions)?;

    let goal: Goal = ask(input, output, GOAL_PROMPT)?.parse()?;

    let mut base = TankParameters::new(0.0, 0.0, 0.0);
    let mut values = Vec::new();

    for parameter in PARAMETER_ORDER {
        let line = ask(input, output, &goal.prompt(parameter))?;

        if goal.is_swept(parameter) {
            values = parse_values(parameter.symbol(), &line)?;
            base = base.with(parameter, values[0]);
        } else {
            base = base.with(parameter, parse_single(parameter.symbol(), &line)?);
        }
    }

    let solver = parse_solver(&ask(input, output, SOLVER_PROMPT)?)?;

    Ok(ScenarioConfig { goal, base, values, solver, options })
}

/// Files written and headline numbers of one run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub goal: Goal,
    pub solver: String,
    pub chart: PathBuf,
    pub csv: Option<PathBuf>,

    /// `(label, Q at the horizon)` per run, in sweep order
    pub final_quantities: Vec<(String, f64)>,

    /// Relaxation time V/R per run, in sweep order; `None` without flow
    pub time_constants: Vec<Option<f64>>,
}

impl RunReport {
    fn new(config: &ScenarioConfig, result: &SweepResult, csv: Option<PathBuf>) -> Self {
        let final_quantities = result
            .labels()
            .into_iter()
            .zip(result.entries())
            .filter_map(|(label, entry)| entry.series.final_quantity().map(|q| (label, q)))
            .collect();

        let time_constants = result
            .entries()
            .iter()
            .map(|entry| {
                let parameters = result.base().with(result.parameter(), entry.value);
                MixingTank::time_constant(&parameters)
            })
            .collect();

        Self {
            goal: config.goal,
            solver: result.solver_name().to_string(),
            chart: config.chart_path(),
            csv,
            final_quantities,
            time_constants,
        }
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Goal {} solved with {}", self.goal, self.solver)?;
        for (index, (label, quantity)) in self.final_quantities.iter().enumerate() {
            write!(f, "  {:<12} Q(end) = {:.3} g", label, quantity)?;
            match self.time_constants.get(index).copied().flatten() {
                Some(tau) => writeln!(f, ", tau = {:.3} min", tau)?,
                None => writeln!(f, ", no flow")?,
            }
        }
        write!(f, "Chart: {}", self.chart.display())?;
        if let Some(csv) = &self.csv {
            write!(f, "\nData:  {}", csv.display())?;
        }
        Ok(())
    }
}

/// Sweep, render and export one configured study
pub fn execute(config: &ScenarioConfig) -> Result<RunReport, CliError> {
    let solver = config.solver.build();
    let result = run_sweep(
        &config.base,
        config.swept(),
        &config.values,
        solver.as_ref(),
        &config.solver_configuration(),
    )?;

    std::fs::create_dir_all(&config.options.output_dir)?;

    let chart = config.chart_path();
    plot_sweep(&result, &chart, Some(&PlotConfig::sweep(config.goal.title())))
        .map_err(|e| CliError::Output(e.to_string()))?;
    info!("Chart written to {}", chart.display());

    let csv = if config.options.export_csv {
        let path = config.csv_path();
        let metadata = CsvMetadata::from_sweep(&result).with_goal(config.goal.to_string());
        export_sweep_csv(&result, &path, Some(&CsvConfig::default().with_metadata(metadata)))
            .map_err(|e| CliError::Output(e.to_string()))?;
        info!("Data written to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(RunReport::new(config, &result, csv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::InputError;
    use crate::solver::SolverMethod;
    use std::io::Cursor;

    fn read(script: &str) -> (Result<ScenarioConfig, CliError>, String) {
        let mut output = Vec::new();
        let config = read_scenario(&mut Cursor::new(script), &mut output, RunOptions::default());
        (config, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_goal_a_session() {
        let (config, transcript) = read("A\n1000\n10\n2 5 10 15\n\n");
        let config = config.unwrap();

        assert_eq!(config.goal, Goal::A);
        assert_eq!(config.values, vec![2.0, 5.0, 10.0, 15.0]);
        assert_eq!(config.base.initial_quantity, 1000.0);
        assert_eq!(config.base.inflow_concentration, 10.0);
        assert_eq!(config.solver, SolverMethod::Analytical);

        assert!(transcript.starts_with("Enter the goal type (A, B, C): "));
        assert!(transcript.contains("Enter the rate values (separate by space): "));
        assert!(transcript.ends_with(SOLVER_PROMPT));
    }

    #[test]
    fn test_goal_b_ignores_extra_single_values() {
        let (config, _) = read("B\n0 500 1500\n10 99\n5 6 7\nrk4\n");
        let config = config.unwrap();

        assert_eq!(config.values, vec![0.0, 500.0, 1500.0]);
        assert_eq!(config.base, TankParameters::new(0.0, 10.0, 5.0));
        assert_eq!(config.solver, SolverMethod::RungeKutta4);
    }

    #[test]
    fn test_unknown_goal_stops_before_parameters() {
        let (config, transcript) = read("D\n1\n2\n3\n");
        assert!(matches!(config, Err(CliError::Input(InputError::UnknownGoal(g))) if g == "D"));
        assert!(!transcript.contains("initial sugar quantity"));
    }

    #[test]
    fn test_malformed_number_fails_fast() {
        let (config, _) = read("C\n1000\n1 two 3\n5\n");
        assert!(matches!(
            config,
            Err(CliError::Input(InputError::InvalidNumber { field: "X", .. }))
        ));
    }

    #[test]
    fn test_end_of_input_is_a_missing_value() {
        let (config, _) = read("A\n1000\n");
        assert!(matches!(config, Err(CliError::Input(InputError::MissingValue("X")))));
    }

    #[test]
    fn test_execute_writes_chart_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        let options = RunOptions::default()
            .with_output_dir(dir.path())
            .with_samples(101)
            .with_display(false);
        let config = read_scenario(&mut Cursor::new("A\n1000\n5\n2 5\nrk45\n"), &mut Vec::<u8>::new(), options).unwrap();

        let report = execute(&config).unwrap();

        assert!(report.chart.ends_with("sugar_goal_a.png"));
        assert!(report.chart.exists());
        let csv = report.csv.clone().unwrap();
        let content = std::fs::read_to_string(csv).unwrap();
        assert!(content.contains("Time (min),R=2 (g),R=5 (g)"));
        assert_eq!(report.final_quantities.len(), 2);
        assert!(report.to_string().contains("Dormand-Prince"));
    }

    #[test]
    fn test_report_lists_time_constants() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScenarioConfig {
            goal: Goal::A,
            base: TankParameters::new(1000.0, 5.0, 0.0),
            values: vec![0.0, 5.0, 20.0],
            solver: SolverMethod::Analytical,
            options: RunOptions::default()
                .with_output_dir(dir.path())
                .with_samples(11)
                .with_csv(false)
                .with_display(false),
        };

        let report = execute(&config).unwrap();
        assert_eq!(report.time_constants, vec![None, Some(20.0), Some(5.0)]);

        let text = report.to_string();
        assert!(text.contains("R=0          Q(end) = 1000.000 g, no flow"), "{}", text);
        assert!(text.contains("R=5          Q(end) = "));
        assert!(text.contains(", tau = 20.000 min"));
        assert!(text.contains(", tau = 5.000 min"));
    }

    #[test]
    fn test_execute_without_csv() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScenarioConfig {
            goal: Goal::C,
            base: TankParameters::new(0.0, 0.0, 5.0),
            values: vec![0.0, 10.0],
            solver: SolverMethod::Analytical,
            options: RunOptions::default().with_output_dir(dir.path()).with_samples(50).with_csv(false),
        };

        let report = execute(&config).unwrap();
        assert!(report.csv.is_none());
        assert!(!dir.path().join("sugar_goal_c.csv").exists());
    }
}
