//! Run configuration

use crate::hooks::Hooks;

/// Execution mode for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One lane; tasks processed strictly one at a time
    Serial,

    /// Up to the configured cap of lanes; unbounded by default
    Parallel,
}

impl Mode {
    /// Number of lanes to start for `total` tasks.
    ///
    /// Serial always runs one lane regardless of any requested cap. Parallel
    /// uses the requested cap when positive, otherwise one lane per task.
    /// Either way the count is clamped to the task count: extra lanes would
    /// only find the cursor already exhausted. An empty task list starts no
    /// lanes at all.
    pub fn effective_concurrency(self, requested: Option<usize>, total: usize) -> usize {
        let lanes = match self {
            Self::Serial => 1,
            Self::Parallel => requested.filter(|&cap| cap > 0).unwrap_or(total),
        };
        lanes.min(total)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// Options for a single run
///
/// `T` and `E` are the success and failure types of the transform, which the
/// lifecycle hooks observe by reference.
pub struct RunOptions<T, E> {
    /// Cap on simultaneously in-flight tasks in parallel mode.
    /// `None` or `Some(0)` means unbounded (one lane per task).
    /// Ignored in serial mode, which always runs one lane.
    pub concurrency: Option<usize>,

    /// Observational lifecycle callbacks; never alter control flow
    pub hooks: Hooks<T, E>,
}

impl<T, E> RunOptions<T, E> {
    /// Options with a concurrency cap and no hooks
    pub fn with_concurrency(cap: usize) -> Self {
        Self {
            concurrency: Some(cap),
            ..Self::default()
        }
    }
}

impl<T, E> Default for RunOptions<T, E> {
    fn default() -> Self {
        Self {
            concurrency: None,
            hooks: Hooks::new(),
        }
    }
}

impl<T, E> Clone for RunOptions<T, E> {
    fn clone(&self) -> Self {
        Self {
            concurrency: self.concurrency,
            hooks: self.hooks.clone(),
        }
    }
}

impl<T, E> std::fmt::Debug for RunOptions<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOptions")
            .field("concurrency", &self.concurrency)
            .field("hooks", &self.hooks)
            .finish()
    }
}
