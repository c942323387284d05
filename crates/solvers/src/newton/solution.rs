/// Indicates whether the solver converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The last step was within the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a Newton solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution<T> {
    /// Final solver status.
    pub status: Status,

    /// Estimate of `x` such that `f(x) ≈ y`.
    pub x: T,

    /// The last Newton step taken, or NaN if no iteration ran.
    pub step: T,

    /// Iteration count when the solver finished.
    pub iters: usize,
}
