//! Entry points - mode selection, normalization, and delegation
//!
//! Each call normalizes its iterable into an ordered task list, resolves the
//! effective lane count for its mode, and hands both to the executor. The
//! returned future settles exactly once: with the full ordered results, or
//! with the first failure.

use std::future::Future;

use tracing::debug;

use crate::config::{Mode, RunOptions};
use crate::deferred::{Defer, OneshotDefer};
use crate::error::{InputError, RunError};
use crate::executor::execute;
use crate::input::Input;

/// Identity transform for iterables of already-pending futures.
///
/// ```
/// # use futures::future::{ready, Ready};
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let pending: Vec<Ready<Result<i32, String>>> = vec![ready(Ok(1)), ready(Ok(2))];
/// let results = lanes::parallel(pending, lanes::through).await.unwrap();
/// assert_eq!(results, vec![1, 2]);
/// # });
/// ```
pub fn through<Fut>(value: Fut, _index: usize) -> Fut {
    value
}

/// Iterate over `iterable` serially: one task at a time, in order.
pub async fn serial<I, V, F, Fut, T, E>(iterable: I, transform: F) -> Result<Vec<T>, RunError<E>>
where
    I: TryInto<Input<V>>,
    I::Error: Into<InputError>,
    V: Send + 'static,
    F: Fn(V, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    run::<OneshotDefer, _, _, _, _, _, _>(Mode::Serial, iterable, transform, RunOptions::default()).await
}

/// Iterate over `iterable` serially with explicit options.
///
/// Serial mode always runs one lane; `options.concurrency` is ignored.
pub async fn serial_with<I, V, F, Fut, T, E>(
    iterable: I,
    transform: F,
    options: RunOptions<T, E>,
) -> Result<Vec<T>, RunError<E>>
where
    I: TryInto<Input<V>>,
    I::Error: Into<InputError>,
    V: Send + 'static,
    F: Fn(V, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    run::<OneshotDefer, _, _, _, _, _, _>(Mode::Serial, iterable, transform, options).await
}

/// Iterate over `iterable` concurrently, one lane per task.
pub async fn parallel<I, V, F, Fut, T, E>(iterable: I, transform: F) -> Result<Vec<T>, RunError<E>>
where
    I: TryInto<Input<V>>,
    I::Error: Into<InputError>,
    V: Send + 'static,
    F: Fn(V, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    run::<OneshotDefer, _, _, _, _, _, _>(Mode::Parallel, iterable, transform, RunOptions::default()).await
}

/// Iterate over `iterable` concurrently, capped by `options.concurrency`.
pub async fn parallel_with<I, V, F, Fut, T, E>(
    iterable: I,
    transform: F,
    options: RunOptions<T, E>,
) -> Result<Vec<T>, RunError<E>>
where
    I: TryInto<Input<V>>,
    I::Error: Into<InputError>,
    V: Send + 'static,
    F: Fn(V, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    run::<OneshotDefer, _, _, _, _, _, _>(Mode::Parallel, iterable, transform, options).await
}

/// Generic run driver with an explicit completion-cell implementation.
///
/// The named entry points are thin wrappers over this with
/// [`OneshotDefer`]; substitute `D` to route settlement through a custom
/// deferred-value implementation.
pub async fn run<D, I, V, F, Fut, T, E>(
    mode: Mode,
    iterable: I,
    transform: F,
    options: RunOptions<T, E>,
) -> Result<Vec<T>, RunError<E>>
where
    D: Defer,
    I: TryInto<Input<V>>,
    I::Error: Into<InputError>,
    V: Send + 'static,
    F: Fn(V, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    // Validation failures reject the returned future; an async fn body does
    // not run until polled, so nothing surfaces synchronously.
    let input: Input<V> = iterable.try_into().map_err(|err| {
        let err: InputError = err.into();
        RunError::from(err)
    })?;
    let values = input.into_values();
    let lanes = mode.effective_concurrency(options.concurrency, values.len());
    debug!(%mode, total = values.len(), lanes, "run: starting");

    options.hooks.start();
    if values.is_empty() {
        debug!(%mode, "run: empty task list, resolving immediately");
        options.hooks.done(Ok(&[]));
        return Ok(Vec::new());
    }

    execute::<D, _, _, _, _, _>(values, lanes, transform, options.hooks).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_map_input_doubled_serially() {
        let map = BTreeMap::from([
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("c".to_string(), 3),
        ]);

        let results = serial(map, |value, _| async move { Ok::<_, String>(value * 2) })
            .await
            .unwrap();

        assert_eq!(results, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn test_primitive_json_input_rejects() {
        let result = serial(json!(5), |value: Value, _| async move { Ok::<_, String>(value) }).await;

        assert!(matches!(result, Err(RunError::InvalidInput { got: "number" })));
    }

    #[tokio::test]
    async fn test_empty_input_resolves_without_invoking_transform() {
        let invoked = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicUsize::new(0));
        let (invoked_in, done_in) = (invoked.clone(), done.clone());

        let options = RunOptions {
            hooks: crate::hooks::Hooks::new().on_done(move |outcome| {
                assert_eq!(outcome, Ok(&[][..]));
                done_in.fetch_add(1, Ordering::SeqCst);
            }),
            ..Default::default()
        };

        let results = parallel_with(
            Vec::<i32>::new(),
            move |value, _| {
                invoked_in.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(value) }
            },
            options,
        )
        .await
        .unwrap();

        assert!(results.is_empty());
        assert_eq!(invoked.load(Ordering::SeqCst), 0);
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_serial_ignores_requested_concurrency() {
        let in_flight = Arc::new(AtomicBool::new(false));
        let flag = in_flight.clone();

        let results = serial_with(
            vec![1, 2, 3],
            move |value, _| {
                let flag = flag.clone();
                async move {
                    assert!(!flag.swap(true, Ordering::SeqCst), "serial run overlapped");
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    flag.store(false, Ordering::SeqCst);
                    Ok::<_, String>(value)
                }
            },
            RunOptions::with_concurrency(5),
        )
        .await
        .unwrap();

        assert_eq!(results, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_raw_futures_pass_through() {
        let pending = vec![
            futures::future::ready(Ok::<_, String>("a")),
            futures::future::ready(Ok("b")),
        ];

        let results = parallel(pending, through).await.unwrap();
        assert_eq!(results, vec!["a", "b"]);
    }
}
