use thiserror::Error;

/// Errors that can occur during a Newton solve.
///
/// Values are reported as `f64` regardless of the solver's float type.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    /// The Newton step was not finite.
    ///
    /// This is the outcome for a zero derivative estimate (for example
    /// inverting `x²` at `y = 0`, where both probes cancel) and for any
    /// non-finite value returned by the function.
    #[error("non-finite step at x = {x}: residual = {residual}, derivative = {derivative}")]
    NonFiniteStep {
        x: f64,
        residual: f64,
        derivative: f64,
    },
}
