/// Actions an observer can take during a batch solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop iterating the current group.
    ///
    /// Lanes that have not converged are reported as
    /// [`Outcome::StoppedByObserver`](crate::Outcome::StoppedByObserver).
    /// Later groups and the tail are still solved.
    StopEarly,
}
