//! Newton-Raphson inversion of many values in fixed-width lane groups.
//!
//! # Algorithm
//!
//! The input slice is split into `n / W` groups of `W` lanes plus a tail of
//! `n % W` elements. Each group runs the same Newton iteration as
//! [`newton`](crate::newton), but over all `W` lanes at once:
//!
//! 1. Evaluate `f` at every lane's guess and at both derivative probes,
//!    one [`Evaluate::eval_many`] call per quantity. A [`Batched`] function
//!    sees three calls of length `W` per iteration; a [`Scalar`] function is
//!    called once per lane instead.
//! 2. Compute residual, derivative, next guess and step lane by lane.
//! 3. Commit the next guess only into lanes that are still active. A lane
//!    whose step is within tolerance, or not finite, goes inactive.
//!
//! The group keeps iterating while any lane is active, up to
//! [`Config::max_iters`]. Converged lanes are still recomputed (the loop body
//! has no per-lane control flow) but their values no longer change, so every
//! element gets exactly what [`newton::solve`](crate::newton::solve) would
//! return for it.
//!
//! The tail is never padded into a partial group. It goes through
//! [`newton::solve_each`](crate::newton::solve_each).
//!
//! # Trade-offs
//!
//! Lockstep iteration trades wasted work on early-converging lanes for a
//! branch-free inner loop. Batches whose elements need very different
//! iteration counts pay for the slowest lane in each group.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per lockstep iteration of each group.
//! Observers can return [`Action::StopEarly`] to end the current group.
//!
//! [`Batched`]: fxinv_core::Batched
//! [`Scalar`]: fxinv_core::Scalar

mod action;
mod event;
mod workspace;


pub use action::Action;
pub use event::Event;
pub use workspace::Workspace;

use fxinv_core::{Evaluate, Observer};
use log::{debug, trace};
use num_traits::Float;

use crate::{CentralDifference, Config, LengthMismatch, Outcome, Report, newton};

/// Default lane width. 64 `f32` lanes span four 512-bit vector registers.
pub const DEFAULT_LANES: usize = 64;

/// Solves every element of `inputs`, writing into `outputs`.
///
/// Elements in full lane groups are solved in lockstep using `workspace`;
/// the remaining `inputs.len() % W` elements are solved one at a time.
/// Elements with a non-finite Newton step are written as NaN.
///
/// # Errors
///
/// Returns [`LengthMismatch`] if `inputs` and `outputs` differ in length.
pub fn solve_into<E, T, Obs, const W: usize>(
    f: &E,
    inputs: &[T],
    outputs: &mut [T],
    config: &Config<T>,
    workspace: &mut Workspace<T, W>,
    mut observer: Obs,
) -> Result<Report, LengthMismatch>
where
    E: Evaluate<T>,
    T: Float,
    Obs: Observer<Event, Action>,
{
    LengthMismatch::check(inputs.len(), outputs.len())?;

    let diff = CentralDifference::new(config.derivative_step());
    let groups = inputs.len() / W;
    let split = groups * W;

    let (head_in, tail_in) = inputs.split_at(split);
    let (head_out, tail_out) = outputs.split_at_mut(split);

    let mut report = Report::vectorized(groups, W, inputs.len());
    for (group, (targets, out)) in head_in
        .chunks_exact(W)
        .zip(head_out.chunks_exact_mut(W))
        .enumerate()
    {
        let unfinished = solve_group(f, targets, config, &diff, workspace, group, &mut observer);
        workspace.store(out, unfinished, &mut report);
    }

    let tail = newton::solve_each(f, tail_in, tail_out, config)?;
    report.append_tail(tail);

    Ok(report)
}

/// Runs [`solve_into`] without observation.
///
/// # Errors
///
/// Returns [`LengthMismatch`] if `inputs` and `outputs` differ in length.
pub fn solve_into_unobserved<E, T, const W: usize>(
    f: &E,
    inputs: &[T],
    outputs: &mut [T],
    config: &Config<T>,
    workspace: &mut Workspace<T, W>,
) -> Result<Report, LengthMismatch>
where
    E: Evaluate<T>,
    T: Float,
{
    solve_into(f, inputs, outputs, config, workspace, ())
}

/// Iterates one group until every lane is done or the group must stop.
///
/// Returns the outcome for lanes that are still active when it returns.
fn solve_group<E, T, Obs, const W: usize>(
    f: &E,
    targets: &[T],
    config: &Config<T>,
    diff: &CentralDifference<T>,
    workspace: &mut Workspace<T, W>,
    group: usize,
    observer: &mut Obs,
) -> Outcome
where
    E: Evaluate<T>,
    T: Float,
    Obs: Observer<Event, Action>,
{
    workspace.load(targets);

    let mut active = W;
    for iter in 1..=config.max_iters() {
        active = workspace.iterate(f, targets, diff, config.x_tol());
        trace!("batch group {group} iter {iter}: {active} of {} lanes active", W);

        let event = Event {
            group,
            offset: group * W,
            iter,
            active,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Outcome::StoppedByObserver;
        }

        if active == 0 {
            return Outcome::Converged;
        }
    }

    debug!(
        "batch group {group}: {active} of {} lanes unconverged after {} iterations",
        W,
        config.max_iters()
    );
    Outcome::MaxIters
}
