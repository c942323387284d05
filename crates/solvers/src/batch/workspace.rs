use fxinv_core::Evaluate;
use num_traits::Float;

use crate::{CentralDifference, Outcome, Report};

/// Per-lane scratch memory for one lane group of width `W`.
///
/// Every quantity lives in its own contiguous `[T; W]` column, so each
/// lockstep pass is a straight loop over independent lanes that the compiler
/// can vectorize. A workspace holds no state between groups: it is
/// re-initialized from the inputs at the start of each one. Keeping a
/// workspace around and passing it to
/// [`Inverse::solve_into_with`](crate::Inverse::solve_into_with) or
/// [`solve_into`](super::solve_into) reuses the memory across calls.
#[derive(Debug, Clone)]
pub struct Workspace<T, const W: usize> {
    guess: [T; W],
    candidate: [T; W],
    delta: [T; W],
    residual: [T; W],
    derivative: [T; W],
    plus: [T; W],
    minus: [T; W],
    f_plus: [T; W],
    f_minus: [T; W],
    active: [bool; W],
    non_finite: [bool; W],
}

impl<T: Float, const W: usize> Default for Workspace<T, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float, const W: usize> Workspace<T, W> {
    /// Creates a zeroed workspace.
    ///
    /// `W` must be non-zero; a zero-width workspace fails to compile.
    #[must_use]
    pub fn new() -> Self {
        const { assert!(W > 0, "lane width must be non-zero") };

        let zero = [T::zero(); W];
        Self {
            guess: zero,
            candidate: zero,
            delta: zero,
            residual: zero,
            derivative: zero,
            plus: zero,
            minus: zero,
            f_plus: zero,
            f_minus: zero,
            active: [false; W],
            non_finite: [false; W],
        }
    }

    /// Returns the lane width.
    #[must_use]
    pub const fn lanes(&self) -> usize {
        W
    }

    /// Starts a group: every lane's guess is its own target.
    pub(super) fn load(&mut self, targets: &[T]) {
        self.guess.copy_from_slice(targets);
        self.active.fill(true);
        self.non_finite.fill(false);
    }

    /// Runs one lockstep Newton iteration over all lanes.
    ///
    /// Every lane is recomputed, but only lanes that were still active
    /// commit their candidate, so a lane's value freezes on the iteration
    /// it converges. Returns the number of lanes still active.
    #[allow(clippy::needless_range_loop)]
    pub(super) fn iterate<E: Evaluate<T>>(
        &mut self,
        f: &E,
        targets: &[T],
        diff: &CentralDifference<T>,
        x_tol: T,
    ) -> usize {
        let h = diff.step();
        for i in 0..W {
            self.plus[i] = self.guess[i] + h;
            self.minus[i] = self.guess[i] - h;
        }

        f.eval_many(&self.guess, &mut self.residual);
        f.eval_many(&self.plus, &mut self.f_plus);
        f.eval_many(&self.minus, &mut self.f_minus);

        for i in 0..W {
            self.residual[i] = self.residual[i] - targets[i];
        }
        diff.from_probes_many(&self.f_plus, &self.f_minus, &mut self.derivative);
        for i in 0..W {
            self.candidate[i] = self.guess[i] - self.residual[i] / self.derivative[i];
        }
        for i in 0..W {
            self.delta[i] = self.candidate[i] - self.guess[i];
        }

        for i in 0..W {
            let live = self.active[i];
            let finite = self.candidate[i].is_finite();
            let commit = live && finite;

            self.guess[i] = if commit {
                self.candidate[i]
            } else {
                self.guess[i]
            };
            self.non_finite[i] |= live && !finite;
            self.active[i] = commit && self.delta[i].abs() > x_tol;
        }

        self.active_count()
    }

    /// Number of lanes that have neither converged nor failed.
    pub(super) fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Writes lane results to `out` and their outcomes to `report`.
    ///
    /// Lanes still active are reported as `unfinished`.
    pub(super) fn store(&self, out: &mut [T], unfinished: Outcome, report: &mut Report) {
        for (i, slot) in out.iter_mut().enumerate() {
            let (x, outcome) = if self.non_finite[i] {
                (T::nan(), Outcome::NonFinite)
            } else if self.active[i] {
                (self.guess[i], unfinished)
            } else {
                (self.guess[i], Outcome::Converged)
            };
            *slot = x;
            report.push_vectorized(outcome);
        }
    }
}
