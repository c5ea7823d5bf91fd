//! Dormand-Prince 5(4) adaptive solver
//!
//! # Mathematical Background
//!
//! Seven-stage explicit Runge-Kutta pair (Dormand & Prince, 1980). The
//! fifth-order solution advances the state, the embedded fourth-order one
//! estimates the local error. The last stage is evaluated at the new point,
//! so it doubles as the first stage of the next step (FSAL): six function
//! evaluations per accepted step.
//!
//! # Step Size Control
//!
//! With `sk = atol + rtol·max(|yₙ|, |yₙ₊₁|)` the scaled error is
//!
//! ```text
//! err = sqrt( mean( (errᵢ / skᵢ)² ) )
//! ```
//!
//! A step is accepted when `err ≤ 1`. The next step uses the stabilised
//! (PI) controller of Hairer & Wanner:
//!
//! ```text
//! fac = err^(1/5 − 0.75·β) / err_prev^β / 0.9,   clamped to [0.1, 5]
//! h_new = h / fac
//! ```
//!
//! The first step comes from the usual initial-step heuristic (one explicit
//! Euler probe, local second-derivative estimate).
//!
//! # Dense Output
//!
//! Accepted steps rarely land on the output grid. Every accepted step builds
//! the fourth-order continuous extension of the pair and evaluates it at the
//! grid points it covers, so the result is reported exactly on the requested
//! instants without shortening steps.
//!
//! # Example
//!
//! ```rust
//! use sugar_rs::models::{MixingTank, TankParameters};
//! use sugar_rs::solver::{DormandPrinceSolver, Scenario, Solver, SolverConfiguration};
//!
//! # fn main() -> Result<(), String> {
//! let scenario = Scenario::from_model(Box::new(MixingTank::new(TankParameters::new(0.0, 10.0, 5.0))));
//! let config = SolverConfiguration::adaptive(100.0, 9999);
//! let result = DormandPrinceSolver::new().solve(&scenario, &config)?;
//! assert_eq!(result.len(), 10_000);
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::physics::{PhysicalModel, PhysicalState};
use crate::solver::{prepare_run, validate_state};
use crate::solver::{Scenario, SimulationResult, Solver, SolverConfiguration, SolverType};

// =================================================================================================
// Butcher tableau
// =================================================================================================

const C2: f64 = 0.2;
const C3: f64 = 0.3;
const C4: f64 = 0.8;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 0.2;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;
const A71: f64 = 35.0 / 384.0;
const A73: f64 = 500.0 / 1113.0;
const A74: f64 = 125.0 / 192.0;
const A75: f64 = -2187.0 / 6784.0;
const A76: f64 = 11.0 / 84.0;

// Difference between the 5th and 4th order weights
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

// Dense output
const D1: f64 = -12715105075.0 / 11282082432.0;
const D3: f64 = 87487479700.0 / 32700410799.0;
const D4: f64 = -10690763975.0 / 1880347072.0;
const D5: f64 = 701980252875.0 / 199316789632.0;
const D6: f64 = -1453857185.0 / 822651844.0;
const D7: f64 = 69997945.0 / 29380423.0;

// =================================================================================================
// Controller settings
// =================================================================================================

const SAFETY: f64 = 0.9;
const BETA: f64 = 0.04;
/// Lower bound of h_new / h
const FAC_MIN: f64 = 0.2;
/// Upper bound of h_new / h
const FAC_MAX: f64 = 10.0;
const ORDER: i32 = 5;

// =================================================================================================
// Dormand-Prince Solver
// =================================================================================================

/// Adaptive Dormand-Prince RK5(4) solver with dense output
///
/// Accepts `Adaptive` configurations only. Fails with an error, never a
/// panic, when the step budget is exhausted, the step size underflows or the
/// state stops being finite.
#[derive(Debug, Clone, Copy, Default)]
pub struct DormandPrinceSolver;

impl DormandPrinceSolver {
    pub fn new() -> Self {
        Self
    }
}

/// Counters reported in the result metadata
#[derive(Debug, Default)]
struct StepStatistics {
    accepted: usize,
    rejected: usize,
    evaluations: usize,
}

/// `base + Σ coefᵢ · termᵢ`
fn combine(base: &PhysicalState, terms: &[(f64, &PhysicalState)]) -> PhysicalState {
    terms
        .iter()
        .fold(base.clone(), |acc, (coef, term)| acc + (*term).clone() * *coef)
}

/// `Σ coefᵢ · termᵢ`
fn weighted(terms: &[(f64, &PhysicalState)]) -> PhysicalState {
    combine(&PhysicalState::empty(), terms)
}

/// RMS of `numerator / (atol + rtol·max(|a|, |b|))` over every stored value
fn scaled_norm(
    numerator: &PhysicalState,
    a: &PhysicalState,
    b: &PhysicalState,
    rtol: f64,
    atol: f64,
) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for (quantity, values) in numerator.iter() {
        let (Some(a_values), Some(b_values)) = (a.get(*quantity), b.get(*quantity)) else {
            continue;
        };
        for ((e, ya), yb) in values.values().zip(a_values.values()).zip(b_values.values()) {
            let sk = atol + rtol * ya.abs().max(yb.abs());
            sum += (e / sk) * (e / sk);
            count += 1;
        }
    }

    if count == 0 { 0.0 } else { (sum / count as f64).sqrt() }
}

/// Initial step size guess
///
/// Balances ‖y‖/‖f‖ against a local estimate of the second derivative
/// obtained from one explicit Euler probe.
fn initial_step(
    model: &dyn PhysicalModel,
    t0: f64,
    y0: &PhysicalState,
    f0: &PhysicalState,
    h_max: f64,
    rtol: f64,
    atol: f64,
) -> f64 {
    let zero = PhysicalState::empty().combine(y0, |_, _| 0.0);

    let dnf = scaled_norm(f0, y0, &zero, rtol, atol);
    let dny = scaled_norm(y0, y0, &zero, rtol, atol);

    let mut h = if dnf <= 1e-5 || dny <= 1e-5 {
        1.0e-6
    } else {
        0.01 * dny / dnf
    };
    h = h.min(h_max);

    let y1 = combine(y0, &[(h, f0)]);
    let f1 = model.compute_physics(t0 + h, &y1);
    let df = f1 - f0.clone();
    let der2 = scaled_norm(&df, y0, &zero, rtol, atol) / h;

    let der12 = der2.abs().max(dnf);
    let h1 = if der12 <= 1.0e-15 {
        (1.0e-6_f64).max(h * 1.0e-3)
    } else {
        (0.01 / der12).powf(1.0 / ORDER as f64)
    };

    (100.0 * h).min(h1).min(h_max)
}

/// Continuous extension of one accepted step
struct DenseStep {
    t: f64,
    h: f64,
    cont: [PhysicalState; 5],
}

impl DenseStep {
    fn evaluate(&self, time: f64) -> PhysicalState {
        let theta = (time - self.t) / self.h;
        let theta1 = 1.0 - theta;
        let [c0, c1, c2, c3, c4] = &self.cont;

        // c0 + θ(c1 + (1−θ)(c2 + θ(c3 + (1−θ)c4)))
        let inner = combine(c3, &[(theta1, c4)]);
        let inner = combine(c2, &[(theta, &inner)]);
        let inner = combine(c1, &[(theta1, &inner)]);
        combine(c0, &[(theta, &inner)])
    }
}

impl Solver for DormandPrinceSolver {
    fn solve(
        &self,
        scenario: &Scenario,
        config: &SolverConfiguration,
    ) -> Result<SimulationResult, String> {

        // ====== Step 1: Validation ======

        let (total_time, time_steps, rtol, atol, max_steps) = match &config.solver_type {
            SolverType::Adaptive {
                total_time,
                time_steps,
                relative_tolerance,
                absolute_tolerance,
                max_steps,
            } => (*total_time, *time_steps, *relative_tolerance, *absolute_tolerance, *max_steps),
            other => {
                return Err(format!(
                    "DormandPrinceSolver only supports Adaptive configuration, got {}",
                    other.name()
                ));
            }
        };

        let (mut y, time_points) = prepare_run(scenario, config)?;
        let model = scenario.model.as_ref();

        let t_start = time_points[0];
        let t_end = time_points[time_points.len() - 1];
        let h_max = t_end - t_start;

        // ====== Step 2: Setup ======

        let mut state_trajectory = Vec::with_capacity(time_points.len());
        state_trajectory.push(y.clone());
        let mut next_output = 1;

        let mut stats = StepStatistics::default();
        let mut t = t_start;

        let mut k1 = model.compute_physics(t, &y);
        stats.evaluations += 1;

        let mut h = initial_step(model, t, &y, &k1, h_max, rtol, atol);
        stats.evaluations += 1;

        let mut err_previous: f64 = 1.0e-4;
        let mut last = false;
        let mut reject = false;

        debug!(
            "Dormand-Prince on {}: t in [{}, {}], rtol {}, atol {}, h0 {}",
            scenario.get_model_name(), t_start, t_end, rtol, atol, h
        );

        // ====== Step 3: Integration ======

        loop {
            if stats.accepted + stats.rejected >= max_steps {
                return Err(format!(
                    "Dormand-Prince exceeded {} steps at t = {} (increase max_steps or relax tolerances)",
                    max_steps, t
                ));
            }

            if 0.1 * h.abs() <= t.abs() * f64::EPSILON || h <= 0.0 {
                return Err(format!("Dormand-Prince step size too small (h = {}) at t = {}", h, t));
            }

            if t + 1.01 * h >= t_end {
                h = t_end - t;
                last = true;
            }

            // ====== Stages ======

            let k2 = model.compute_physics(t + C2 * h, &combine(&y, &[(h * A21, &k1)]));
            let k3 = model.compute_physics(
                t + C3 * h,
                &combine(&y, &[(h * A31, &k1), (h * A32, &k2)]),
            );
            let k4 = model.compute_physics(
                t + C4 * h,
                &combine(&y, &[(h * A41, &k1), (h * A42, &k2), (h * A43, &k3)]),
            );
            let k5 = model.compute_physics(
                t + C5 * h,
                &combine(&y, &[(h * A51, &k1), (h * A52, &k2), (h * A53, &k3), (h * A54, &k4)]),
            );
            let k6 = model.compute_physics(
                t + h,
                &combine(
                    &y,
                    &[(h * A61, &k1), (h * A62, &k2), (h * A63, &k3), (h * A64, &k4), (h * A65, &k5)],
                ),
            );
            let y_new = combine(
                &y,
                &[(h * A71, &k1), (h * A73, &k3), (h * A74, &k4), (h * A75, &k5), (h * A76, &k6)],
            );
            let k7 = model.compute_physics(t + h, &y_new);
            stats.evaluations += 6;

            let error_estimate = weighted(&[
                (h * E1, &k1), (h * E3, &k3), (h * E4, &k4),
                (h * E5, &k5), (h * E6, &k6), (h * E7, &k7),
            ]);

            let err = scaled_norm(&error_estimate, &y, &y_new, rtol, atol);

            if !err.is_finite() {
                validate_state(&y_new, stats.accepted + 1)?;
                return Err(format!("Dormand-Prince error estimate is not finite at t = {}", t));
            }

            // ====== Step size proposal ======

            let expo = 1.0 / ORDER as f64 - 0.75 * BETA;
            let fac11 = err.powf(expo);
            let fac = (fac11 / err_previous.powf(BETA) / SAFETY).clamp(1.0 / FAC_MAX, 1.0 / FAC_MIN);
            let mut h_new = h / fac;

            if err <= 1.0 {

                // ====== Accepted ======

                stats.accepted += 1;
                err_previous = err.max(1.0e-4);
                validate_state(&y_new, stats.accepted)?;

                let y_diff = y_new.clone() - y.clone();
                let bspl = combine(&y_diff, &[(-h, &k1)]) * -1.0;
                let cont3 = combine(&y_diff, &[(-h, &k7), (-1.0, &bspl)]);
                let cont4 = weighted(&[
                    (h * D1, &k1), (h * D3, &k3), (h * D4, &k4),
                    (h * D5, &k5), (h * D6, &k6), (h * D7, &k7),
                ]);

                let dense = DenseStep {
                    t,
                    h,
                    cont: [y.clone(), y_diff, bspl, cont3, cont4],
                };

                let t_next = if last { t_end } else { t + h };

                while next_output < time_points.len() && time_points[next_output] <= t_next {
                    let output_time = time_points[next_output];
                    let state = if output_time == t_next { y_new.clone() } else { dense.evaluate(output_time) };
                    validate_state(&state, next_output)?;
                    state_trajectory.push(state);
                    next_output += 1;
                }

                k1 = k7;
                y = y_new;
                t = t_next;

                if last {
                    break;
                }

                h_new = h_new.min(h_max);
                if reject {
                    h_new = h_new.min(h);
                    reject = false;
                }
            } else {

                // ====== Rejected ======

                h_new = h / (1.0 / FAC_MIN).min(fac11 / SAFETY);
                reject = true;
                last = false;
                if stats.accepted >= 1 {
                    stats.rejected += 1;
                }
            }

            h = h_new;
        }

        // Grid points at the very end can only be missed through rounding
        while state_trajectory.len() < time_points.len() {
            state_trajectory.push(y.clone());
        }

        debug!(
            "Dormand-Prince finished: {} accepted, {} rejected, {} evaluations",
            stats.accepted, stats.rejected, stats.evaluations
        );

        // ====== Step 4: Build Result ======

        let mut result = SimulationResult::new(time_points, state_trajectory, y);

        result.add_metadata("solver", "Dormand-Prince 5(4)");
        result.add_metadata("time steps", &time_steps.to_string());
        result.add_metadata("total time", &total_time.to_string());
        result.add_metadata("relative tolerance", &rtol.to_string());
        result.add_metadata("absolute tolerance", &atol.to_string());
        result.add_metadata("accepted steps", &stats.accepted.to_string());
        result.add_metadata("rejected steps", &stats.rejected.to_string());
        result.add_metadata("function evaluations", &stats.evaluations.to_string());

        Ok(result)
    }

    fn name(&self) -> &str {
        "Dormand-Prince (RK45)"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
