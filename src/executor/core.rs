//! Lane loop and run driver

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::deferred::{Defer, Settle};
use crate::error::RunError;
use crate::hooks::Hooks;

use super::context::Context;

/// Run `lanes` concurrent lanes over `values`, settling exactly once with
/// the ordered results or the first failure.
///
/// The caller has already handled the empty task list and resolved the lane
/// count, so `lanes >= 1` here. Lanes are spawned tasks; once the run has
/// settled, in-flight transforms keep running to completion but their
/// outcomes are discarded.
pub(crate) async fn execute<D, V, F, Fut, T, E>(
    values: Vec<V>,
    lanes: usize,
    transform: F,
    hooks: Hooks<T, E>,
) -> Result<Vec<T>, RunError<E>>
where
    D: Defer,
    V: Send + 'static,
    F: Fn(V, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let context = Arc::new(Context::new(values));
    let transform = Arc::new(transform);
    let (settle, wait) = D::deferred::<Result<Vec<T>, RunError<E>>>();

    debug!(total = context.total(), lanes, "execute: starting lanes");
    for lane_id in 0..lanes {
        tokio::spawn(lane(
            lane_id,
            context.clone(),
            transform.clone(),
            hooks.clone(),
            settle.clone(),
        ));
    }
    // Lanes hold the remaining settle handles; if every lane dies without
    // settling (a panicking transform), the wait side reports it.
    drop(settle);

    wait.await.unwrap_or(Err(RunError::Interrupted))
}

async fn lane<S, V, F, Fut, T, E>(
    lane_id: usize,
    context: Arc<Context<V, T>>,
    transform: Arc<F>,
    hooks: Hooks<T, E>,
    settle: S,
) where
    S: Settle<Result<Vec<T>, RunError<E>>>,
    V: Send + 'static,
    F: Fn(V, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    while let Some(index) = context.claim() {
        debug!(lane_id, index, "lane: claimed task");
        let value = context.take_value(index);

        match (*transform)(value, index).await {
            Ok(output) => {
                if context.is_failed() {
                    debug!(lane_id, index, "lane: run already failed, discarding outcome");
                    break;
                }
                hooks.settle(index, Ok(&output));
                if context.record(index, output) {
                    let results = context.take_results();
                    debug!(lane_id, total = results.len(), "lane: final task recorded, fulfilling");
                    hooks.done(Ok(&results));
                    settle.settle(Ok(results));
                    break;
                }
            }
            Err(reason) => {
                if context.mark_failed() {
                    debug!(lane_id, index, "lane: first failure, rejecting");
                    hooks.settle(index, Err(&reason));
                    hooks.done(Err(&reason));
                    settle.settle(Err(RunError::Task(reason)));
                } else {
                    debug!(lane_id, index, "lane: failure after run already failed, discarding");
                }
                break;
            }
        }
    }
    debug!(lane_id, "lane: exiting");
}
