/// Iteration event emitted by the Newton solver.
///
/// Emitted once per iteration, after the next guess has been computed and
/// found finite but before the convergence check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<T> {
    /// Iteration counter (1-based).
    pub iter: usize,

    /// Guess at the start of the iteration.
    pub x: T,

    /// `f(x) - y` at the current guess.
    pub residual: T,

    /// Finite-difference derivative at the current guess.
    pub derivative: T,

    /// Guess produced by this iteration.
    pub next: T,
}

impl<T: num_traits::Float> Event<T> {
    /// Returns the Newton step `next - x`.
    #[must_use]
    pub fn step(&self) -> T {
        self.next - self.x
    }
}
