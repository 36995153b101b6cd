/// Control actions an observer can request from a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver early and return the history recorded so far.
    StopEarly,
}

/// Watches the steps a solver records, one call per step.
///
/// A solver hands each step to its observer right after recording it. The
/// observer may return [`Action::StopEarly`] to end the solve there; the
/// result then carries the steps so far and the normal summary.
///
/// Closures `FnMut(&S) -> Option<Action>` implement `Observer`, and `()` is
/// the observer that never acts.
pub trait Observer<S> {
    fn observe(&mut self, step: &S) -> Option<Action>;
}

impl<S, F> Observer<S> for F
where
    F: FnMut(&S) -> Option<Action>,
{
    fn observe(&mut self, step: &S) -> Option<Action> {
        self(step)
    }
}

impl<S> Observer<S> for () {
    fn observe(&mut self, _step: &S) -> Option<Action> {
        None
    }
}

/// Stops a solve once a given number of steps has been recorded.
///
/// Useful for replaying a solve up to a chosen step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopAfter {
    remaining: usize,
}

impl StopAfter {
    #[must_use]
    pub fn new(steps: usize) -> Self {
        Self { remaining: steps }
    }
}

impl<S> Observer<S> for StopAfter {
    fn observe(&mut self, _step: &S) -> Option<Action> {
        self.remaining = self.remaining.saturating_sub(1);
        (self.remaining == 0).then_some(Action::StopEarly)
    }
}
