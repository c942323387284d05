/// Receives solver events and may steer the solve.
///
/// `observe` returns `Some(action)` to ask the solver for a solver-specific
/// action (such as stopping early) and `None` to let it carry on.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. `()` is the no-op
/// observer used by the `*_unobserved` entry points.
pub trait Observer<E, A> {
    /// Observes one event and optionally requests an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
