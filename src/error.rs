//! Run error types

use std::convert::Infallible;
use thiserror::Error;

/// The iterable argument could not be normalized into a task list.
///
/// Produced by the fallible input conversions (e.g. a `serde_json::Value`
/// that is neither an array nor an object). Infallible conversions share the
/// same entry-point bound via `From<Infallible>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expect iterable to be a list or a map, got {got}")]
pub struct InputError {
    /// What the input actually was (e.g. "number", "string", "null")
    pub got: &'static str,
}

impl From<Infallible> for InputError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Errors that can settle a run
#[derive(Debug, Error)]
pub enum RunError<E> {
    /// The iterable argument was not a list or a map
    #[error("expect iterable to be a list or a map, got {got}")]
    InvalidInput { got: &'static str },

    /// A task failed; carries the first failure reason unmodified
    #[error("{0}")]
    Task(E),

    /// Every lane exited without settling the run.
    ///
    /// Only reachable when a lane dies mid-task (a panicking transform);
    /// surfaced instead of hanging the caller forever.
    #[error("run ended without settling")]
    Interrupted,
}

impl<E> RunError<E> {
    /// Extract the original task failure reason, if that is what this is
    pub fn into_task_failure(self) -> Option<E> {
        match self {
            Self::Task(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<E> From<InputError> for RunError<E> {
    fn from(err: InputError) -> Self {
        Self::InvalidInput { got: err.got }
    }
}
