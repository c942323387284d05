//! Numerical inversion of black-box scalar functions.
//!
//! Given a function `f` known only through evaluation and a target `y`,
//! the solvers in this crate find `x` with `f(x) ≈ y` using Newton-Raphson
//! iteration driven by a centered finite-difference derivative.
//!
//! # Solvers
//!
//! - [`newton`]: one value at a time, each stopping on its own schedule
//! - [`batch`]: many values in fixed-width lane groups that iterate in
//!   lockstep, with a scalar tail for the remainder
//!
//! [`Inverse`] bundles a function with a [`Config`] and exposes both.
//!
//! # Example
//!
//! ```
//! use fxinv_solvers::{Config, Inverse};
//!
//! let sqrt = Inverse::new(|x: f64| x * x, Config::with_step(1e-6)?);
//!
//! let root = sqrt.solve(2.0)?;
//! assert!((root.x - 2.0_f64.sqrt()).abs() < 1e-6);
//!
//! let inputs: Vec<f64> = (1..=100).map(f64::from).collect();
//! let mut outputs = vec![0.0; inputs.len()];
//! let report = sqrt.solve_into(&inputs, &mut outputs)?;
//! assert!(report.all_converged());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod config;
mod derivative;
mod inverse;
mod report;

pub mod batch;
pub mod newton;

pub use config::{Config, ConfigError, DEFAULT_MAX_ITERS};
pub use derivative::CentralDifference;
pub use inverse::Inverse;
pub use report::{LengthMismatch, Outcome, Report};

pub use fxinv_core::{Batched, Evaluate, Observer, Scalar};

/// Converts a solver value to `f64` for errors and log messages.
pub(crate) fn as_f64<T: num_traits::Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
