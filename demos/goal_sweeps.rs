//! Example: the three tank studies, without prompts
//!
//! Runs goals A, B and C with the classic study values, once with the
//! closed form and once with each numerical solver, and reports how far the
//! numerical curves stray from the exact ones.
//!
//! **Physical System**:
//! - Tank volume: 100 L, well mixed
//! - Inflow: R L/min at X g/L, outflow: R L/min
//! - Q(t) = 100·X + (Q0 − 100·X)·e^(−R·t/100)
//!
//! **Studies**:
//! - Goal A: R ∈ {2, 5, 10, 15} L/min, Q0 = 1000 g, X = 10 g/L
//! - Goal B: Q0 ∈ {0, 500, 1500, 3000} g, X = 10 g/L, R = 5 L/min
//! - Goal C: X ∈ {1, 10, 20, 30} g/L, Q0 = 1000 g, R = 5 L/min
//!
//! Charts and CSV files land in the directory given as first argument, or in
//! the system temporary directory.
//!
//! ```bash
//! cargo run --example goal_sweeps -- ./out
//! ```

use std::path::PathBuf;
use std::time::Instant;

use sugar_rs::cli::execute;
use sugar_rs::goal::{Goal, RunOptions, ScenarioConfig};
use sugar_rs::models::TankParameters;
use sugar_rs::solver::SolverMethod;
use sugar_rs::sweep::run_sweep;

fn study(goal: Goal) -> (TankParameters, Vec<f64>) {
    match goal {
        Goal::A => (TankParameters::new(1000.0, 10.0, 2.0), vec![2.0, 5.0, 10.0, 15.0]),
        Goal::B => (TankParameters::new(0.0, 10.0, 5.0), vec![0.0, 500.0, 1500.0, 3000.0]),
        Goal::C => (TankParameters::new(1000.0, 1.0, 5.0), vec![1.0, 10.0, 20.0, 30.0]),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    println!("═══════════════════════════════════════════════════════");
    println!("  Sugar Tank - Goal Sweeps");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Output directory ======

    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("sugar-rs"));

    let options = RunOptions::default()
        .with_output_dir(&output_dir)
        .with_display(false);

    println!("Simulation:");
    println!("  Horizon : {} min", options.horizon);
    println!("  Samples : {}", options.samples);
    println!("  Output  : {}\n", output_dir.display());

    // =============================================================================================
    // Exact curves: charts and CSV per goal
    // =============================================================================================

    for goal in Goal::ALL {
        let (base, values) = study(goal);
        let config = ScenarioConfig {
            goal,
            base,
            values,
            solver: SolverMethod::Analytical,
            options: options.clone(),
        };

        let report = execute(&config)?;
        println!("{}\n", report);
    }

    // =============================================================================================
    // Numerical solvers against the closed form
    // =============================================================================================

    println!("═══════════════════════════════════════════════════════");
    println!("  Numerical Accuracy (largest |Q - Q_exact| per goal)");
    println!("═══════════════════════════════════════════════════════\n");

    println!("{:<6} {:<8} {:>14} {:>10}", "Goal", "Solver", "Max error (g)", "Time (ms)");
    println!("{:-<42}", "");

    for goal in Goal::ALL {
        let (base, values) = study(goal);

        let exact_method = SolverMethod::Analytical;
        let exact = run_sweep(
            &base,
            goal.swept(),
            &values,
            exact_method.build().as_ref(),
            &exact_method.configuration(options.horizon, options.samples),
        )?;

        for method in [SolverMethod::DormandPrince, SolverMethod::RungeKutta4, SolverMethod::Euler] {
            let start = Instant::now();
            let numeric = run_sweep(
                &base,
                goal.swept(),
                &values,
                method.build().as_ref(),
                &method.configuration(options.horizon, options.samples),
            )?;
            let elapsed = start.elapsed().as_secs_f64() * 1000.0;

            let max_error = exact
                .entries()
                .iter()
                .zip(numeric.entries())
                .flat_map(|(a, b)| {
                    a.series
                        .quantity
                        .iter()
                        .zip(b.series.quantity.iter())
                        .map(|(qa, qb)| (qa - qb).abs())
                })
                .fold(0.0, f64::max);

            println!("{:<6} {:<8} {:>14.3e} {:>10.2}", goal, method, max_error, elapsed);
        }
    }

    println!("\nDone.");

    Ok(())
}
