use thiserror::Error;

use crate::newton::Status;

/// How a single element of a multi-value solve finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Converged according to the configured tolerance.
    Converged,

    /// Reached the iteration limit; the output holds the last guess.
    MaxIters,

    /// Stopped early due to an observer decision; the output holds the last guess.
    StoppedByObserver,

    /// A Newton step was not finite (zero derivative or non-finite `f`);
    /// the output is NaN.
    NonFinite,
}

impl From<Status> for Outcome {
    fn from(status: Status) -> Self {
        match status {
            Status::Converged => Self::Converged,
            Status::MaxIters => Self::MaxIters,
            Status::StoppedByObserver => Self::StoppedByObserver,
        }
    }
}

/// Input and output slices passed to a multi-value solve differ in length.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{inputs} inputs but {outputs} output slots")]
pub struct LengthMismatch {
    pub inputs: usize,
    pub outputs: usize,
}

impl LengthMismatch {
    pub(crate) fn check(inputs: usize, outputs: usize) -> Result<(), Self> {
        if inputs == outputs {
            Ok(())
        } else {
            Err(Self { inputs, outputs })
        }
    }
}

/// Per-element outcomes of a multi-value solve, in input order.
///
/// The first `groups * lanes` elements went through full-width lane groups;
/// the remaining `tail` elements were solved one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    outcomes: Vec<Outcome>,
    groups: usize,
    lanes: usize,
    tail: usize,
}

impl Report {
    /// Starts a report for `groups` lane groups of width `lanes`.
    pub(crate) fn vectorized(groups: usize, lanes: usize, capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
            groups,
            lanes,
            tail: 0,
        }
    }

    /// Starts a report for elements solved one at a time.
    pub(crate) fn scalar(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
            groups: 0,
            lanes: 0,
            tail: 0,
        }
    }

    pub(crate) fn push_vectorized(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    pub(crate) fn push_scalar(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
        self.tail += 1;
    }

    /// Appends the outcomes of a scalar tail solve.
    pub(crate) fn append_tail(&mut self, tail: Report) {
        self.tail += tail.outcomes.len();
        self.outcomes.extend(tail.outcomes);
    }

    /// Returns the outcomes in input order.
    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Returns the outcome for element `index`, if it exists.
    #[must_use]
    pub fn outcome(&self, index: usize) -> Option<Outcome> {
        self.outcomes.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of full-width lane groups.
    #[must_use]
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Width of each lane group (zero when nothing was vectorized).
    #[must_use]
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Number of trailing elements solved by the scalar path.
    #[must_use]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Returns true if element `index` was solved inside a lane group.
    #[must_use]
    pub fn is_vectorized(&self, index: usize) -> bool {
        index < self.groups * self.lanes
    }

    /// Returns true if every element converged.
    #[must_use]
    pub fn all_converged(&self) -> bool {
        self.outcomes.iter().all(|&o| o == Outcome::Converged)
    }

    /// Counts elements with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.iter().filter(|&&o| o == outcome).count()
    }

    /// Iterates over `(index, outcome)` for every element that did not converge.
    pub fn failures(&self) -> impl Iterator<Item = (usize, Outcome)> + '_ {
        self.outcomes
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, o)| o != Outcome::Converged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_outcome() {
        assert_eq!(Outcome::from(Status::Converged), Outcome::Converged);
        assert_eq!(Outcome::from(Status::MaxIters), Outcome::MaxIters);
        assert_eq!(
            Outcome::from(Status::StoppedByObserver),
            Outcome::StoppedByObserver
        );
    }

    #[test]
    fn length_check() {
        assert!(LengthMismatch::check(3, 3).is_ok());
        assert_eq!(
            LengthMismatch::check(3, 2),
            Err(LengthMismatch {
                inputs: 3,
                outputs: 2
            })
        );
    }

    #[test]
    fn tracks_vectorized_and_tail_elements() {
        let mut report = Report::vectorized(1, 2, 3);
        report.push_vectorized(Outcome::Converged);
        report.push_vectorized(Outcome::NonFinite);

        let mut tail = Report::scalar(1);
        tail.push_scalar(Outcome::MaxIters);
        report.append_tail(tail);

        assert_eq!(report.len(), 3);
        assert_eq!(report.groups(), 1);
        assert_eq!(report.lanes(), 2);
        assert_eq!(report.tail(), 1);
        assert!(report.is_vectorized(1));
        assert!(!report.is_vectorized(2));
        assert_eq!(report.outcome(2), Some(Outcome::MaxIters));
        assert_eq!(report.outcome(3), None);
    }

    #[test]
    fn summarizes_failures() {
        let mut report = Report::scalar(4);
        for outcome in [
            Outcome::Converged,
            Outcome::NonFinite,
            Outcome::Converged,
            Outcome::MaxIters,
        ] {
            report.push_scalar(outcome);
        }

        assert!(!report.all_converged());
        assert_eq!(report.count(Outcome::Converged), 2);
        assert_eq!(
            report.failures().collect::<Vec<_>>(),
            vec![(1, Outcome::NonFinite), (3, Outcome::MaxIters)]
        );
    }

    #[test]
    fn empty_report_is_converged() {
        let report = Report::scalar(0);
        assert!(report.is_empty());
        assert!(report.all_converged());
    }
}
