//! Scripted interactive sessions, from typed answers to files on disk

use std::io::Cursor;

use sugar_rs::cli::{execute, parse_run_options, read_scenario, CliError, InputError};
use sugar_rs::goal::{Goal, RunOptions};
use sugar_rs::models::TankParameters;
use sugar_rs::solver::SolverMethod;

fn options(dir: &std::path::Path) -> RunOptions {
    RunOptions::default()
        .with_output_dir(dir)
        .with_samples(201)
        .with_display(false)
}

fn session(script: &str, options: RunOptions) -> Result<sugar_rs::goal::ScenarioConfig, CliError> {
    read_scenario(&mut Cursor::new(script), &mut Vec::<u8>::new(), options)
}

#[test]
fn test_goal_a_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = session("A\n1000\n10\n2 5 10 15\n\n", options(dir.path())).unwrap();

    let report = execute(&config).unwrap();

    assert_eq!(report.goal, Goal::A);
    assert_eq!(report.chart, dir.path().join("sugar_goal_a.png"));
    assert!(report.chart.is_file());

    let labels: Vec<&str> = report.final_quantities.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, vec!["R=2", "R=5", "R=10", "R=15"]);

    let csv = std::fs::read_to_string(report.csv.unwrap()).unwrap();
    let mut data = csv.lines().filter(|l| !l.starts_with('#'));
    assert_eq!(data.next(), Some("Time (min),R=2 (g),R=5 (g),R=10 (g),R=15 (g)"));
    assert_eq!(data.count(), 201);
    assert!(csv.contains("# Fixed: Q0=1000 g, X=10 g/L"));
}

#[test]
fn test_goal_b_end_to_end_with_numerical_solver() {
    let dir = tempfile::tempdir().unwrap();
    let config = session("B\n0 500 1500\n10\n5\nrk45\n", options(dir.path())).unwrap();

    assert_eq!(config.base, TankParameters::new(0.0, 10.0, 5.0));
    assert_eq!(config.solver, SolverMethod::DormandPrince);

    let report = execute(&config).unwrap();
    assert!(dir.path().join("sugar_goal_b.png").is_file());
    assert!(dir.path().join("sugar_goal_b.csv").is_file());

    // Every start converges toward 100·X = 1000 g
    for (label, q) in &report.final_quantities {
        assert!((q - 1000.0).abs() < 10.0, "{}: Q(100) = {}", label, q);
    }
}

#[test]
fn test_goal_c_run_without_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = session("C\n1000\n1 10 20\n15\neuler\n", options(dir.path()).with_csv(false)).unwrap();

    let report = execute(&config).unwrap();

    assert!(report.csv.is_none());
    assert!(report.chart.is_file());
    assert!(!dir.path().join("sugar_goal_c.csv").exists());
    assert_eq!(report.final_quantities.len(), 3);
}

#[test]
fn test_output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("runs").join("today");
    let config = session("A\n1000\n10\n5\n\n", options(&nested)).unwrap();

    let report = execute(&config).unwrap();
    assert!(report.chart.starts_with(&nested));
    assert!(report.chart.is_file());
}

#[test]
fn test_goal_letter_is_case_sensitive() {
    let dir = tempfile::tempdir().unwrap();
    for (answer, expected) in [("a", "a"), ("D", "D"), ("", "")] {
        let script = format!("{}\n1000\n10\n5\n", answer);
        let err = session(&script, options(dir.path())).unwrap_err();
        assert!(
            matches!(&err, CliError::Input(InputError::UnknownGoal(g)) if g == expected),
            "answer {:?} gave {:?}",
            answer,
            err
        );
    }

    // Nothing was written
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_extra_values_on_single_prompts_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let config = session("A\n1000 2000\n10 20 30\n2 5\nrk4\n", options(dir.path())).unwrap();

    assert_eq!(config.base.initial_quantity, 1000.0);
    assert_eq!(config.base.inflow_concentration, 10.0);
    assert_eq!(config.values, vec![2.0, 5.0]);

    let report = execute(&config).unwrap();
    assert_eq!(report.final_quantities.len(), 2);
}

#[test]
fn test_unknown_solver_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = session("A\n1000\n10\n5\nleapfrog\n", options(dir.path())).unwrap_err();
    assert!(matches!(err, CliError::Input(InputError::UnknownSolver(_))));
    assert!(err.to_string().contains("leapfrog"));
}

#[test]
fn test_invalid_options_are_rejected_before_prompting() {
    let mut transcript = Vec::new();
    let err = read_scenario(
        &mut Cursor::new("A\n"),
        &mut transcript,
        RunOptions::default().with_samples(1),
    )
    .unwrap_err();

    assert!(matches!(err, CliError::InvalidOptions(_)));
    assert!(transcript.is_empty());
}

#[test]
fn test_horizon_flag_reaches_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["--horizon", "20", "--samples", "41", "--no-display"]
        .iter()
        .map(|a| a.to_string())
        .chain(std::iter::once(dir.path().display().to_string()));
    let options = parse_run_options(args).unwrap();

    let config = session("B\n0\n10\n5\n\n", options).unwrap();
    let report = execute(&config).unwrap();

    // Q(20) = 1000 (1 - e^-1)
    let (_, q) = &report.final_quantities[0];
    assert!((q - 1000.0 * (1.0 - (-1.0_f64).exp())).abs() < 1e-9, "Q(20) = {}", q);
    assert_eq!(report.time_constants, vec![Some(20.0)]);

    let csv = std::fs::read_to_string(report.csv.unwrap()).unwrap();
    let rows: Vec<&str> = csv.lines().filter(|l| !l.starts_with('#')).skip(1).collect();
    assert_eq!(rows.len(), 41);
    assert!(rows[40].starts_with("20"), "last row {}", rows[40]);
}
