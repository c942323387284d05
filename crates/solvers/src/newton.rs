//! Newton-Raphson inversion of a black-box function, one value at a time.
//!
//! # Algorithm
//!
//! To find `x` with `f(x) = y`, start from `x₀ = y` and iterate
//!
//! ```text
//! x_{n+1} = x_n - (f(x_n) - y) / f'(x_n)
//! ```
//!
//! where `f'` is a [`CentralDifference`] estimate. The solve converges when
//! `|x_{n+1} - x_n| <= x_tol`.
//!
//! The initial guess `x₀ = y` suits functions that map their domain onto a
//! similar numeric range (such as `x²` near one). For functions whose input
//! and output scales differ widely it may converge slowly or not at all.
//!
//! # Failure Modes
//!
//! - A zero or non-finite derivative, or a non-finite `f`, makes the step
//!   non-finite: the solver returns [`Error::NonFiniteStep`].
//! - Oscillation or divergence: the solver stops after
//!   [`Config::max_iters`] iterations with [`Status::MaxIters`].
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration. Observers can return
//! [`Action::StopEarly`] to halt with the newest guess.

mod action;
mod error;
mod event;
mod solution;


pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use fxinv_core::{Evaluate, Observer};
use log::{debug, trace};
use num_traits::Float;

use crate::{CentralDifference, Config, LengthMismatch, Outcome, Report, as_f64};

/// Finds `x` such that `f(x) ≈ y` using Newton-Raphson iteration.
///
/// The observer receives an [`Event`] for every iteration.
///
/// # Errors
///
/// Returns [`Error::NonFiniteStep`] if an iteration produces a non-finite
/// guess.
pub fn solve<E, T, Obs>(
    f: &E,
    y: T,
    config: &Config<T>,
    mut observer: Obs,
) -> Result<Solution<T>, Error>
where
    E: Evaluate<T>,
    T: Float,
    Obs: Observer<Event<T>, Action>,
{
    let diff = CentralDifference::new(config.derivative_step());

    let mut x = y;
    let mut step = T::nan();

    for iter in 1..=config.max_iters() {
        let residual = f.eval(x) - y;
        let derivative = diff.estimate(f, x);
        let next = x - residual / derivative;

        if !next.is_finite() {
            debug!(
                "newton: non-finite step at x = {} (residual = {}, derivative = {})",
                as_f64(x),
                as_f64(residual),
                as_f64(derivative),
            );
            return Err(Error::NonFiniteStep {
                x: as_f64(x),
                residual: as_f64(residual),
                derivative: as_f64(derivative),
            });
        }

        step = next - x;
        trace!("newton iter {iter}: x = {}, step = {}", as_f64(next), as_f64(step));

        let event = Event {
            iter,
            x,
            residual,
            derivative,
            next,
        };
        x = next;

        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                x,
                step,
                iters: iter,
            });
        }

        if step.abs() <= config.x_tol() {
            return Ok(Solution {
                status: Status::Converged,
                x,
                step,
                iters: iter,
            });
        }
    }

    debug!(
        "newton: no convergence for y = {} after {} iterations (last step = {})",
        as_f64(y),
        config.max_iters(),
        as_f64(step),
    );
    Ok(Solution {
        status: Status::MaxIters,
        x,
        step,
        iters: config.max_iters(),
    })
}

/// Runs [`solve`] without observation.
///
/// # Errors
///
/// Returns [`Error::NonFiniteStep`] if an iteration produces a non-finite
/// guess.
pub fn solve_unobserved<E, T>(f: &E, y: T, config: &Config<T>) -> Result<Solution<T>, Error>
where
    E: Evaluate<T>,
    T: Float,
{
    solve(f, y, config, ())
}

/// Solves every element of `inputs` independently, writing into `outputs`.
///
/// Each element runs its own Newton loop and stops as soon as it converges.
/// Elements that fail with [`Error::NonFiniteStep`] are written as NaN and
/// reported as [`Outcome::NonFinite`].
///
/// With a batched function, the two derivative probes of each iteration are
/// evaluated in a single call.
///
/// # Errors
///
/// Returns [`LengthMismatch`] if `inputs` and `outputs` differ in length.
pub fn solve_each<E, T>(
    f: &E,
    inputs: &[T],
    outputs: &mut [T],
    config: &Config<T>,
) -> Result<Report, LengthMismatch>
where
    E: Evaluate<T>,
    T: Float,
{
    LengthMismatch::check(inputs.len(), outputs.len())?;

    let mut report = Report::scalar(inputs.len());
    for (&y, out) in inputs.iter().zip(outputs.iter_mut()) {
        let outcome = match solve_unobserved(f, y, config) {
            Ok(solution) => {
                *out = solution.x;
                Outcome::from(solution.status)
            }
            Err(Error::NonFiniteStep { .. }) => {
                *out = T::nan();
                Outcome::NonFinite
            }
        };
        report.push_scalar(outcome);
    }

    Ok(report)
}
