//! Concurrency-limited executor
//!
//! Drives N lanes over a shared index cursor. Each lane claims the next
//! unclaimed task, awaits its transform, and records the outcome at the
//! task's own position, until the cursor is exhausted or the run has failed.

mod context;
mod core;

pub(crate) use core::execute;
