use num_traits::Float;
use thiserror::Error;

/// Iteration limit used by [`Config::default`] and [`Config::with_step`].
pub const DEFAULT_MAX_ITERS: usize = 100;

/// Configuration shared by the scalar and batch Newton solvers.
///
/// The derivative step and the convergence tolerance are independent.
/// [`Config::with_step`] ties them together, which reproduces the classic
/// behavior where a single `h` is both the finite-difference half-width and
/// the stopping threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawConfig<T>",
        bound(deserialize = "T: Float + serde::Deserialize<'de>")
    )
)]
pub struct Config<T> {
    derivative_step: T,
    x_tol: T,
    max_iters: usize,
}

/// Errors that can occur when validating a solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("derivative_step must be finite and positive")]
    DerivativeStep,

    #[error("x_tol must be finite and non-negative")]
    Tolerance,
}

impl<T: Float> Default for Config<T> {
    /// Uses `ε^(1/3)` for both the step and the tolerance, which balances
    /// truncation and rounding error in a centered difference.
    fn default() -> Self {
        let h = T::epsilon().cbrt();
        Self {
            derivative_step: h,
            x_tol: h,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

impl<T: Float> Config<T> {
    /// Creates a new config with a validated step and tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `derivative_step` is not finite and positive,
    /// or if `x_tol` is negative or non-finite.
    pub fn new(derivative_step: T, x_tol: T, max_iters: usize) -> Result<Self, ConfigError> {
        if !derivative_step.is_finite() || derivative_step <= T::zero() {
            return Err(ConfigError::DerivativeStep);
        }
        if !x_tol.is_finite() || x_tol < T::zero() {
            return Err(ConfigError::Tolerance);
        }

        Ok(Self {
            derivative_step,
            x_tol,
            max_iters,
        })
    }

    /// Creates a config that uses `h` as both derivative step and tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `h` is not finite and positive.
    pub fn with_step(h: T) -> Result<Self, ConfigError> {
        Self::new(h, h, DEFAULT_MAX_ITERS)
    }

    /// Returns a copy of this config with a different iteration limit.
    #[must_use]
    pub fn with_max_iters(self, max_iters: usize) -> Self {
        Self { max_iters, ..self }
    }

    /// Returns the half-width `h` of the centered difference.
    #[must_use]
    pub fn derivative_step(&self) -> T {
        self.derivative_step
    }

    /// Returns the step-to-step tolerance for convergence.
    #[must_use]
    pub fn x_tol(&self) -> T {
        self.x_tol
    }

    /// Returns the maximum number of Newton iterations per value.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConfig<T> {
    derivative_step: T,
    x_tol: T,
    max_iters: usize,
}

#[cfg(feature = "serde")]
impl<T: Float> TryFrom<RawConfig<T>> for Config<T> {
    type Error = ConfigError;

    fn try_from(raw: RawConfig<T>) -> Result<Self, Self::Error> {
        Self::new(raw.derivative_step, raw.x_tol, raw.max_iters)
    }
}
