//! Settle-exactly-once completion cells
//!
//! A run settles through a deferred value: a pair of a [`Settle`] handle,
//! shared by every lane, and a wait future returned to the caller. The cell
//! accepts exactly one settlement; later attempts report `false` and are
//! discarded. Which cell implementation backs a run is a capability chosen
//! through [`Defer`]; [`OneshotDefer`] on `tokio::sync::oneshot` is the
//! default used by the named entry points.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

/// The deferred value was dropped without ever being settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deferred value dropped without settling")]
pub struct Unsettled;

/// Settling side of a deferred value, shared across lanes
pub trait Settle<T>: Clone + Send + Sync + 'static {
    /// Settle the deferred value. Returns `false` if it was already settled;
    /// the value is dropped in that case.
    fn settle(&self, value: T) -> bool;
}

/// Capability producing settle-exactly-once deferred values.
///
/// Generic parameter on [`crate::run`] for callers substituting their own
/// completion-cell implementation; everything else uses [`OneshotDefer`].
pub trait Defer {
    /// Settling handle for a value of type `T`
    type Settle<T: Send + 'static>: Settle<T>;

    /// Waiting side; yields [`Unsettled`] if every handle is dropped first
    type Wait<T: Send + 'static>: Future<Output = Result<T, Unsettled>> + Send;

    /// Produce a fresh deferred value
    fn deferred<T: Send + 'static>() -> (Self::Settle<T>, Self::Wait<T>);
}

/// Default [`Defer`] implementation backed by a tokio oneshot channel
#[derive(Debug, Clone, Copy)]
pub struct OneshotDefer;

impl Defer for OneshotDefer {
    type Settle<T: Send + 'static> = OneshotSettle<T>;
    type Wait<T: Send + 'static> = OneshotWait<T>;

    fn deferred<T: Send + 'static>() -> (Self::Settle<T>, Self::Wait<T>) {
        let (tx, rx) = oneshot::channel();
        (OneshotSettle(Arc::new(Mutex::new(Some(tx)))), OneshotWait(rx))
    }
}

/// Settling handle for [`OneshotDefer`]
///
/// The sender sits behind a mutex so the first settling lane takes it and
/// every later attempt finds the slot empty.
pub struct OneshotSettle<T>(Arc<Mutex<Option<oneshot::Sender<T>>>>);

impl<T: Send + 'static> Settle<T> for OneshotSettle<T> {
    fn settle(&self, value: T) -> bool {
        let taken = self
            .0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match taken {
            // send fails only when the caller dropped the wait side; the run
            // still counts as settled by this handle
            Some(tx) => {
                let _ = tx.send(value);
                true
            }
            None => {
                debug!("OneshotSettle::settle: already settled, discarding");
                false
            }
        }
    }
}

impl<T> Clone for OneshotSettle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Waiting side for [`OneshotDefer`]
pub struct OneshotWait<T>(oneshot::Receiver<T>);

impl<T> Future for OneshotWait<T> {
    type Output = Result<T, Unsettled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx).map(|result| result.map_err(|_| Unsettled))
    }
}
