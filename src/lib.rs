//! lanes - concurrency-limited iteration over asynchronous tasks
//!
//! Iterate over a list- or map-shaped collection of values, invoking an
//! asynchronous transform for each one, either strictly in sequence
//! ([`serial`]) or concurrently with an optional cap ([`parallel`],
//! [`parallel_with`]). Results come back in input order regardless of
//! completion order; the first failure rejects the whole run with its
//! original reason and suppresses all further work.
//!
//! # Core Concepts
//!
//! - **Lanes**: logical workers that repeatedly claim the next unclaimed
//!   task index; the lane count is the concurrency bound
//! - **Positional stability**: result slot `i` always holds the outcome of
//!   task `i`, whatever order tasks finish in
//! - **First failure wins**: one failure rejects the run; in-flight tasks
//!   run to completion but their outcomes are discarded
//! - **Settle exactly once**: every run resolves or rejects a single time,
//!   through a settle-once completion cell
//!
//! # Example
//!
//! ```
//! # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
//! let results = lanes::parallel_with(
//!     vec![1, 2, 3, 4],
//!     |value, _index| async move { Ok::<_, String>(value * 10) },
//!     lanes::RunOptions::with_concurrency(2),
//! )
//! .await
//! .unwrap();
//!
//! assert_eq!(results, vec![10, 20, 30, 40]);
//! # });
//! ```
//!
//! # Modules
//!
//! - [`input`] - the [`Input`] tagged union and iterable conversions
//! - [`config`] - [`Mode`] and [`RunOptions`]
//! - [`hooks`] - observational lifecycle callbacks
//! - [`deferred`] - settle-exactly-once completion cells and the [`Defer`]
//!   capability
//! - [`error`] - [`RunError`] and [`InputError`]

pub mod config;
pub mod deferred;
pub mod error;
mod executor;
pub mod hooks;
pub mod input;
mod run;

pub use config::{Mode, RunOptions};
pub use deferred::{Defer, OneshotDefer, OneshotSettle, OneshotWait, Settle, Unsettled};
pub use error::{InputError, RunError};
pub use hooks::Hooks;
pub use input::Input;
pub use run::{parallel, parallel_with, run, serial, serial_with, through};
