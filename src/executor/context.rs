//! Per-run execution context shared between lanes

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Task values and result slots, guarded together.
///
/// `tasks[i]` is taken exactly once, by the lane that claimed index `i`;
/// `results[i]` is written exactly once, with that task's success value.
struct Cells<V, T> {
    tasks: Vec<Option<V>>,
    results: Vec<Option<T>>,
}

/// Shared mutable state for one run.
///
/// Lanes may execute on different runtime threads, so index claims go
/// through an atomic cursor and the failed flag through an atomic swap; the
/// original's cooperative-scheduler guarantee is not available here.
pub(crate) struct Context<V, T> {
    total: usize,
    cursor: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicBool,
    cells: Mutex<Cells<V, T>>,
}

impl<V, T> Context<V, T> {
    pub(crate) fn new(values: Vec<V>) -> Self {
        let total = values.len();
        let mut results = Vec::with_capacity(total);
        results.resize_with(total, || None);
        Self {
            total,
            cursor: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            failed: AtomicBool::new(false),
            cells: Mutex::new(Cells {
                tasks: values.into_iter().map(Some).collect(),
                results,
            }),
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// Claim the next unclaimed index, or `None` when the run has failed or
    /// the cursor is exhausted. Claim-then-advance is a single `fetch_add`,
    /// so no two lanes can claim the same index.
    pub(crate) fn claim(&self) -> Option<usize> {
        if self.failed.load(Ordering::SeqCst) {
            return None;
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        (index < self.total).then_some(index)
    }

    /// Take the claimed task's value out of its slot
    pub(crate) fn take_value(&self, index: usize) -> V {
        self.lock().tasks[index].take().expect("task claimed exactly once")
    }

    /// Record a success at its slot; true when this was the final task
    pub(crate) fn record(&self, index: usize, value: T) -> bool {
        self.lock().results[index] = Some(value);
        self.completed.fetch_add(1, Ordering::SeqCst) + 1 == self.total
    }

    /// Set the failed flag; true only for the first caller
    pub(crate) fn mark_failed(&self) -> bool {
        !self.failed.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn is_failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    /// Take the completed, ordered result sequence
    pub(crate) fn take_results(&self) -> Vec<T> {
        std::mem::take(&mut self.lock().results)
            .into_iter()
            .map(|slot| slot.expect("every slot recorded before completion"))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Cells<V, T>> {
        self.cells.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
