//! Parsing of the answers typed at the prompts

use log::warn;
use thiserror::Error;

use crate::solver::SolverMethod;

/// Invalid interactive input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown goal '{0}' (expected A, B or C)")]
    UnknownGoal(String),

    #[error("invalid number '{token}' for {field}")]
    InvalidNumber { field: &'static str, token: String },

    #[error("no value given for {0}")]
    MissingValue(&'static str),

    #[error("{0}")]
    UnknownSolver(String),
}

/// Every whitespace-separated number of `line`
///
/// Fails on the first token that is not a finite number, and on a blank line.
pub fn parse_values(field: &'static str, line: &str) -> Result<Vec<f64>, InputError> {
    let values = line
        .split_whitespace()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(InputError::InvalidNumber { field, token: token.to_string() }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.is_empty() {
        return Err(InputError::MissingValue(field));
    }

    Ok(values)
}

/// First number of `line`; any further value is ignored with a warning
pub fn parse_single(field: &'static str, line: &str) -> Result<f64, InputError> {
    let values = parse_values(field, line)?;

    if values.len() > 1 {
        warn!(
            "{} expects one value, using {} and ignoring {:?}",
            field,
            values[0],
            &values[1..]
        );
    }

    Ok(values[0])
}

/// Solver keyword; a blank answer selects the default method
pub fn parse_solver(line: &str) -> Result<SolverMethod, InputError> {
    if line.trim().is_empty() {
        return Ok(SolverMethod::default());
    }
    line.parse().map_err(InputError::UnknownSolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("R", "2 5 10 15\n"), Ok(vec![2.0, 5.0, 10.0, 15.0]));
        assert_eq!(parse_values("R", "  -1.5e2\t3 "), Ok(vec![-150.0, 3.0]));
    }

    #[test]
    fn test_parse_values_errors() {
        assert_eq!(
            parse_values("X", "1 ten 3"),
            Err(InputError::InvalidNumber { field: "X", token: "ten".to_string() })
        );
        assert_eq!(parse_values("Q0", "   \n"), Err(InputError::MissingValue("Q0")));
        assert!(matches!(parse_values("R", "inf"), Err(InputError::InvalidNumber { .. })));
        assert!(matches!(parse_values("R", "NaN"), Err(InputError::InvalidNumber { .. })));
    }

    #[test]
    fn test_parse_single_keeps_first() {
        assert_eq!(parse_single("Q0", "1000 2000 3000"), Ok(1000.0));
        assert_eq!(parse_single("X", "10"), Ok(10.0));
    }

    #[test]
    fn test_parse_solver() {
        assert_eq!(parse_solver(""), Ok(SolverMethod::Analytical));
        assert_eq!(parse_solver("rk45\n"), Ok(SolverMethod::DormandPrince));
        assert!(matches!(parse_solver("magic"), Err(InputError::UnknownSolver(_))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            InputError::UnknownGoal("D".to_string()).to_string(),
            "unknown goal 'D' (expected A, B or C)"
        );
        assert_eq!(
            InputError::InvalidNumber { field: "R", token: "x".to_string() }.to_string(),
            "invalid number 'x' for R"
        );
    }
}
