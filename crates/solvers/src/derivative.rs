//! Finite-difference derivative estimation.

use fxinv_core::Evaluate;
use num_traits::Float;

/// Centered two-point finite difference with a fixed half-width `h`.
///
/// Estimates `f'(x)` as `(f(x + h) - f(x - h)) / (2h)`. The reciprocal of
/// `2h` is computed once at construction, and every estimate (scalar or
/// lane-wise) uses the same `(plus - minus) * inv_two_h` arithmetic so that
/// the scalar and batch solvers agree bit for bit.
///
/// There is no error path: if `f` is undefined near `x`, the estimate is
/// non-finite and callers decide what to do with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralDifference<T> {
    step: T,
    inv_two_step: T,
}

impl<T: Float> CentralDifference<T> {
    /// Creates an estimator with half-width `step`.
    ///
    /// `step` is assumed to be finite and positive; [`Config`](crate::Config)
    /// enforces this for steps taken from a config.
    #[must_use]
    pub fn new(step: T) -> Self {
        let two = T::one() + T::one();
        Self {
            step,
            inv_two_step: (two * step).recip(),
        }
    }

    /// Returns the half-width `h`.
    #[must_use]
    pub fn step(&self) -> T {
        self.step
    }

    /// Estimates the derivative of `f` at `x`.
    ///
    /// Both probe points go to `f` in a single [`Evaluate::eval_many`] call,
    /// so a batched function sees one call of length two.
    pub fn estimate<E: Evaluate<T>>(&self, f: &E, x: T) -> T {
        let probes = [x + self.step, x - self.step];
        let mut values = probes;
        f.eval_many(&probes, &mut values);
        self.from_probes(values[0], values[1])
    }

    /// Combines already-evaluated `f(x + h)` and `f(x - h)` into a derivative.
    #[must_use]
    pub fn from_probes(&self, plus: T, minus: T) -> T {
        (plus - minus) * self.inv_two_step
    }

    /// Lane-wise [`from_probes`](Self::from_probes) over equal-length slices.
    pub fn from_probes_many(&self, plus: &[T], minus: &[T], out: &mut [T]) {
        debug_assert!(plus.len() == minus.len() && minus.len() == out.len());
        for ((d, &p), &m) in out.iter_mut().zip(plus).zip(minus) {
            *d = self.from_probes(p, m);
        }
    }
}
