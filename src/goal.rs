//! Study goals and run configuration
//!
//! Each goal sweeps one tank parameter and holds the two others fixed:
//!
//! | Goal | Swept | Fixed  | Title                                  |
//! |------|-------|--------|----------------------------------------|
//! | A    | R     | Q0, X  | Impact of Inflow/Outflow Rate (R)      |
//! | B    | Q0    | X, R   | Impact of Initial Sugar Quantity (Q0)  |
//! | C    | X     | Q0, R  | Impact of Inflow Concentration (X)     |
//!
//! A [`ScenarioConfig`] is the validated record of one run: built once from
//! input, then handed to the sweep and to the output stages.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::InputError;
use crate::models::{SweptParameter, TankParameters};
use crate::solver::{SolverConfiguration, SolverMethod};

// =================================================================================================
// Goal
// =================================================================================================

/// One of the three sweep studies
///
/// Parsing is exact and case-sensitive; only the surrounding whitespace of a
/// line is ignored.
///
/// ```rust
/// use sugar_rs::goal::Goal;
///
/// assert_eq!(" B\n".parse::<Goal>().unwrap(), Goal::B);
/// assert!("b".parse::<Goal>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    A,
    B,
    C,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::A, Goal::B, Goal::C];

    /// Parameter varied by this goal
    pub fn swept(&self) -> SweptParameter {
        match self {
            Goal::A => SweptParameter::FlowRate,
            Goal::B => SweptParameter::InitialQuantity,
            Goal::C => SweptParameter::InflowConcentration,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Goal::A => "Impact of Inflow/Outflow Rate (R)",
            Goal::B => "Impact of Initial Sugar Quantity (Q0)",
            Goal::C => "Impact of Inflow Concentration (X)",
        }
    }

    /// Output file name without extension, e.g. `sugar_goal_a`
    pub fn file_stem(&self) -> String {
        format!("sugar_goal_{}", self.to_string().to_lowercase())
    }

    /// `true` when `parameter` takes several values under this goal
    pub fn is_swept(&self, parameter: SweptParameter) -> bool {
        self.swept() == parameter
    }

    /// Prompt for one parameter, in the input order Q0, X, R
    pub fn prompt(&self, parameter: SweptParameter) -> String {
        let role = if self.is_swept(parameter) {
            "separate by space"
        } else {
            "Only enter one value"
        };

        let name = match parameter {
            SweptParameter::InitialQuantity => "initial sugar quantity",
            SweptParameter::InflowConcentration => "inflow concentration",
            SweptParameter::FlowRate => "rate",
        };

        format!("Enter the {} values ({}): ", name, role)
    }
}

impl FromStr for Goal {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(Goal::A),
            "B" => Ok(Goal::B),
            "C" => Ok(Goal::C),
            other => Err(InputError::UnknownGoal(other.to_string())),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Goal::A => "A",
            Goal::B => "B",
            Goal::C => "C",
        };
        f.pad(letter)
    }
}

// =================================================================================================
// Run options
// =================================================================================================

/// Settings that do not come from the interactive prompts
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Simulated time span (min)
    pub horizon: f64,

    /// Output samples per curve, both ends included
    pub samples: usize,

    /// Directory receiving the chart and the CSV file
    pub output_dir: PathBuf,

    pub export_csv: bool,

    /// Open the chart in the platform viewer after rendering
    pub display: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            horizon: 100.0,
            samples: 10_000,
            output_dir: PathBuf::from("."),
            export_csv: true,
            display: true,
        }
    }
}

impl RunOptions {
    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_csv(mut self, export_csv: bool) -> Self {
        self.export_csv = export_csv;
        self
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(format!("Horizon must be positive and finite, got {}", self.horizon));
        }
        if self.samples < 2 {
            return Err(format!("At least 2 samples are required, got {}", self.samples));
        }
        Ok(())
    }
}

// =================================================================================================
// Scenario configuration
// =================================================================================================

/// Validated description of one study run
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    pub goal: Goal,

    /// Fixed parameters; the swept one holds the first candidate value
    pub base: TankParameters,

    /// Candidate values of the swept parameter, in input order
    pub values: Vec<f64>,

    pub solver: SolverMethod,

    pub options: RunOptions,
}

impl ScenarioConfig {
    pub fn swept(&self) -> SweptParameter {
        self.goal.swept()
    }

    /// Solver configuration matching the run options
    pub fn solver_configuration(&self) -> SolverConfiguration {
        self.solver.configuration(self.options.horizon, self.options.samples)
    }

    pub fn chart_path(&self) -> PathBuf {
        self.options.output_dir.join(format!("{}.png", self.goal.file_stem()))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.options.output_dir.join(format!("{}.csv", self.goal.file_stem()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_parsing() {
        assert_eq!("A".parse::<Goal>().unwrap(), Goal::A);
        assert_eq!("  C \r\n".parse::<Goal>().unwrap(), Goal::C);

        for bad in ["a", "D", "", "AB", "A B"] {
            match bad.parse::<Goal>() {
                Err(InputError::UnknownGoal(token)) => assert_eq!(token, bad.trim()),
                other => panic!("{:?} parsed as {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_goal_table() {
        assert_eq!(Goal::A.swept(), SweptParameter::FlowRate);
        assert_eq!(Goal::B.swept(), SweptParameter::InitialQuantity);
        assert_eq!(Goal::C.swept(), SweptParameter::InflowConcentration);
        assert_eq!(Goal::B.title(), "Impact of Initial Sugar Quantity (Q0)");
        assert_eq!(Goal::C.file_stem(), "sugar_goal_c");
    }

    #[test]
    fn test_prompts_follow_roles() {
        assert_eq!(
            Goal::A.prompt(SweptParameter::FlowRate),
            "Enter the rate values (separate by space): "
        );
        assert_eq!(
            Goal::A.prompt(SweptParameter::InitialQuantity),
            "Enter the initial sugar quantity values (Only enter one value): "
        );
        assert_eq!(
            Goal::C.prompt(SweptParameter::InflowConcentration),
            "Enter the inflow concentration values (separate by space): "
        );
    }

    #[test]
    fn test_run_options() {
        let options = RunOptions::default();
        assert_eq!(options.horizon, 100.0);
        assert_eq!(options.samples, 10_000);
        assert!(options.validate().is_ok());
        assert!(options.clone().with_samples(1).validate().is_err());
        assert!(options.with_horizon(-1.0).validate().is_err());
    }

    #[test]
    fn test_config_paths_and_solver() {
        let config = ScenarioConfig {
            goal: Goal::B,
            base: TankParameters::new(0.0, 10.0, 5.0),
            values: vec![0.0, 500.0],
            solver: SolverMethod::RungeKutta4,
            options: RunOptions::default().with_output_dir("/tmp/out").with_samples(101),
        };

        assert_eq!(config.chart_path(), PathBuf::from("/tmp/out/sugar_goal_b.png"));
        assert_eq!(config.csv_path(), PathBuf::from("/tmp/out/sugar_goal_b.csv"));
        assert_eq!(config.swept(), SweptParameter::InitialQuantity);
        assert_eq!(config.solver_configuration().solver_type.name(), "TimeEvolution");
    }
}
