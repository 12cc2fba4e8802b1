//! Lifecycle hooks - observational callbacks at run boundaries
//!
//! Hooks fire at three points: before any lane starts, after each task
//! outcome is recorded, and when the whole run settles. They observe by
//! reference and cannot alter control flow. Outcomes discarded after a
//! failure has been recorded fire no hook, and an invalid-input rejection
//! happens before execution begins so it fires none either.

use std::sync::Arc;

type StartFn = dyn Fn() + Send + Sync;
type SettleFn<T, E> = dyn Fn(usize, Result<&T, &E>) + Send + Sync;
type DoneFn<T, E> = dyn Fn(Result<&[T], &E>) + Send + Sync;

/// Observational lifecycle callbacks for a run
pub struct Hooks<T, E> {
    on_start: Option<Arc<StartFn>>,
    on_settle: Option<Arc<SettleFn<T, E>>>,
    on_done: Option<Arc<DoneFn<T, E>>>,
}

impl<T, E> Hooks<T, E> {
    /// No hooks
    pub fn new() -> Self {
        Self {
            on_start: None,
            on_settle: None,
            on_done: None,
        }
    }

    /// Invoked once, after normalization, before any lane starts
    pub fn on_start(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_start = Some(Arc::new(hook));
        self
    }

    /// Invoked with the task index and its outcome each time an outcome is
    /// recorded (every success, plus the first failure)
    pub fn on_settle(mut self, hook: impl Fn(usize, Result<&T, &E>) + Send + Sync + 'static) -> Self {
        self.on_settle = Some(Arc::new(hook));
        self
    }

    /// Invoked once when the run settles, with the full ordered results or
    /// the first failure reason
    pub fn on_done(mut self, hook: impl Fn(Result<&[T], &E>) + Send + Sync + 'static) -> Self {
        self.on_done = Some(Arc::new(hook));
        self
    }

    pub(crate) fn start(&self) {
        if let Some(hook) = &self.on_start {
            hook();
        }
    }

    pub(crate) fn settle(&self, index: usize, outcome: Result<&T, &E>) {
        if let Some(hook) = &self.on_settle {
            hook(index, outcome);
        }
    }

    pub(crate) fn done(&self, outcome: Result<&[T], &E>) {
        if let Some(hook) = &self.on_done {
            hook(outcome);
        }
    }
}

impl<T, E> Default for Hooks<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Hooks<T, E> {
    fn clone(&self) -> Self {
        Self {
            on_start: self.on_start.clone(),
            on_settle: self.on_settle.clone(),
            on_done: self.on_done.clone(),
        }
    }
}

impl<T, E> std::fmt::Debug for Hooks<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_start", &self.on_start.is_some())
            .field("on_settle", &self.on_settle.is_some())
            .field("on_done", &self.on_done.is_some())
            .finish()
    }
}
