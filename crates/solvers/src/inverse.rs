use fxinv_core::{Batched, Evaluate, Observer, Scalar};
use num_traits::Float;

use crate::{
    Config, LengthMismatch, Report,
    batch::{self, DEFAULT_LANES, Workspace},
    newton::{self, Solution},
};

/// Numerical inverse of a black-box function.
///
/// Holds the function and a [`Config`]; every call starts from scratch, so
/// one instance can serve any number of solves, including from several
/// threads at once when the function is `Sync`.
///
/// # Example
///
/// ```
/// use fxinv_solvers::{Config, Inverse, Outcome};
///
/// let sqrt = Inverse::batched(
///     |xs: &[f32], out: &mut [f32]| {
///         for (y, x) in out.iter_mut().zip(xs) {
///             *y = x * x;
///         }
///     },
///     Config::with_step(0.01)?,
/// );
///
/// let inputs: Vec<f32> = (0..70u8).map(f32::from).collect();
/// let mut outputs = vec![0.0; inputs.len()];
/// let report = sqrt.solve_into(&inputs, &mut outputs)?;
///
/// // x² has a zero derivative at 0.
/// assert_eq!(report.outcome(0), Some(Outcome::NonFinite));
/// assert_eq!(report.count(Outcome::Converged), 69);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Inverse<E, T> {
    evaluator: E,
    config: Config<T>,
}

impl<F, T> Inverse<Scalar<F>, T>
where
    F: Fn(T) -> T,
    T: Float,
{
    /// Creates an inverse of a function that evaluates one value per call.
    pub fn new(f: F, config: Config<T>) -> Self {
        Self::from_evaluator(Scalar(f), config)
    }
}

impl<F, T> Inverse<Batched<F>, T>
where
    F: Fn(&[T], &mut [T]),
    T: Float,
{
    /// Creates an inverse of a function that fills an output slice from an
    /// input slice in one call.
    pub fn batched(f: F, config: Config<T>) -> Self {
        Self::from_evaluator(Batched(f), config)
    }
}

impl<E, T> Inverse<E, T>
where
    E: Evaluate<T>,
    T: Float,
{
    /// Creates an inverse of any [`Evaluate`] implementation.
    pub fn from_evaluator(evaluator: E, config: Config<T>) -> Self {
        Self { evaluator, config }
    }

    /// Returns the configuration used by [`solve`](Self::solve) and
    /// [`solve_into`](Self::solve_into).
    #[must_use]
    pub fn config(&self) -> &Config<T> {
        &self.config
    }

    /// Returns the wrapped function.
    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Finds `x` such that `f(x) ≈ y`.
    ///
    /// # Errors
    ///
    /// Returns [`newton::Error::NonFiniteStep`] if an iteration produces a
    /// non-finite guess.
    pub fn solve(&self, y: T) -> Result<Solution<T>, newton::Error> {
        newton::solve_unobserved(&self.evaluator, y, &self.config)
    }

    /// Finds `x` such that `f(x) ≈ y` using a per-call configuration.
    ///
    /// # Errors
    ///
    /// Returns [`newton::Error::NonFiniteStep`] if an iteration produces a
    /// non-finite guess.
    pub fn solve_with(&self, y: T, config: &Config<T>) -> Result<Solution<T>, newton::Error> {
        newton::solve_unobserved(&self.evaluator, y, config)
    }

    /// Finds `x` such that `f(x) ≈ y`, reporting each iteration to `observer`.
    ///
    /// # Errors
    ///
    /// Returns [`newton::Error::NonFiniteStep`] if an iteration produces a
    /// non-finite guess.
    pub fn solve_observed<Obs>(&self, y: T, observer: Obs) -> Result<Solution<T>, newton::Error>
    where
        Obs: Observer<newton::Event<T>, newton::Action>,
    {
        newton::solve(&self.evaluator, y, &self.config, observer)
    }

    /// Inverts every element of `inputs` into `outputs`.
    ///
    /// Uses a stack workspace of [`DEFAULT_LANES`] lanes.
    ///
    /// # Errors
    ///
    /// Returns [`LengthMismatch`] if `inputs` and `outputs` differ in length.
    pub fn solve_into(&self, inputs: &[T], outputs: &mut [T]) -> Result<Report, LengthMismatch> {
        let mut workspace = Workspace::<T, DEFAULT_LANES>::new();
        self.solve_into_with(inputs, outputs, &mut workspace)
    }

    /// Inverts every element of `inputs` into `outputs` using a caller-owned
    /// workspace, whose width sets the lane group size.
    ///
    /// # Errors
    ///
    /// Returns [`LengthMismatch`] if `inputs` and `outputs` differ in length.
    pub fn solve_into_with<const W: usize>(
        &self,
        inputs: &[T],
        outputs: &mut [T],
        workspace: &mut Workspace<T, W>,
    ) -> Result<Report, LengthMismatch> {
        batch::solve_into_unobserved(&self.evaluator, inputs, outputs, &self.config, workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{Outcome, newton::Status};

    #[test]
    fn scalar_and_batched_constructors_agree() {
        let config = Config::with_step(1e-3).unwrap();
        let scalar = Inverse::new(|x: f64| x.powi(3), config);
        let batched = Inverse::batched(
            |xs: &[f64], out: &mut [f64]| {
                for (y, x) in out.iter_mut().zip(xs) {
                    *y = x.powi(3);
                }
            },
            config,
        );

        let a = scalar.solve(27.0).unwrap();
        let b = batched.solve(27.0).unwrap();

        assert_eq!(a, b);
        assert_relative_eq!(a.x, 3.0, epsilon = 1e-3);
        assert!(batched.evaluator().is_batched());
        assert!(!scalar.evaluator().is_batched());
    }

    #[test]
    fn per_call_config_overrides_instance_config() {
        let inverse = Inverse::new(|x: f64| x * x, Config::with_step(0.1).unwrap());
        let tight = Config::with_step(1e-9).unwrap();

        let coarse = inverse.solve(2.0).unwrap();
        let fine = inverse.solve_with(2.0, &tight).unwrap();

        assert!(fine.iters > coarse.iters);
        assert_relative_eq!(fine.x, 2.0_f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(inverse.config().derivative_step(), 0.1);
    }

    #[test]
    fn observed_solve_reports_iterations() {
        let inverse = Inverse::new(|x: f64| x * x, Config::with_step(1e-6).unwrap());

        let mut iters = 0;
        let solution = inverse
            .solve_observed(10.0, |_: &newton::Event<f64>| -> Option<newton::Action> {
                iters += 1;
                None
            })
            .unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert_eq!(iters, solution.iters);
    }

    #[test]
    fn solve_into_uses_default_lanes() {
        let inverse = Inverse::new(|x: f64| x * x, Config::with_step(0.01).unwrap());
        let inputs: Vec<f64> = (1..=130).map(f64::from).collect();
        let mut outputs = vec![0.0; inputs.len()];

        let report = inverse.solve_into(&inputs, &mut outputs).unwrap();

        assert_eq!(report.groups(), 2);
        assert_eq!(report.lanes(), DEFAULT_LANES);
        assert_eq!(report.tail(), 2);
        assert!(report.all_converged());
    }

    #[test]
    fn solve_into_with_custom_width_matches_default() {
        let inverse = Inverse::new(|x: f64| x.exp(), Config::with_step(1e-5).unwrap());
        let inputs: Vec<f64> = (1..=50).map(|i| f64::from(i) * 0.5).collect();
        let mut default_out = vec![0.0; inputs.len()];
        let mut narrow_out = vec![0.0; inputs.len()];
        let mut narrow = Workspace::<f64, 4>::new();

        inverse.solve_into(&inputs, &mut default_out).unwrap();
        let report = inverse
            .solve_into_with(&inputs, &mut narrow_out, &mut narrow)
            .unwrap();

        assert_eq!(report.groups(), 12);
        assert_eq!(report.count(Outcome::Converged), 50);
        assert_eq!(default_out, narrow_out);
    }
}
