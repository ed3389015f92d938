//! Cancellable fetch handle
//!
//! A fetch runs on its own Tokio task. The handle keeps two oneshot channels:
//! one to deliver a cancel reason into the task, one to receive the settled
//! result. Cancelling drops the inner future, which aborts the HTTP request.

use std::future::Future;

use tokio::sync::oneshot;

use crate::error::{FetchError, Result};

/// Cancel side of a fetch
#[derive(Debug)]
pub struct Canceller {
    cancel_tx: Option<oneshot::Sender<String>>,
}

impl Canceller {
    /// Forces the fetch to settle with `FetchError::Cancelled(reason)`.
    ///
    /// No-op once the fetch has settled or after a previous call.
    pub fn cancel(&mut self, reason: impl Into<String>) {
        if let Some(tx) = self.cancel_tx.take() {
            // Err means the task already finished; the result stands.
            let _ = tx.send(reason.into());
        }
    }
}

/// Result side of a fetch
#[derive(Debug)]
pub struct Settlement<T> {
    result_rx: oneshot::Receiver<Result<T>>,
}

impl<T> Settlement<T> {
    pub async fn wait(self) -> Result<T> {
        self.result_rx.await.unwrap_or(Err(FetchError::Aborted))
    }
}

/// Handle to a running fetch
#[derive(Debug)]
pub struct CancellableFetch<T> {
    canceller: Canceller,
    settlement: Settlement<T>,
}

impl<T: Send + 'static> CancellableFetch<T> {
    /// Start `fut` on the runtime and return its handle
    pub fn spawn<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel::<String>();
        let (result_tx, result_rx) = oneshot::channel();

        tokio::spawn(async move {
            // A dropped canceller must not look like a cancellation.
            let cancelled = async move {
                match cancel_rx.await {
                    Ok(reason) => reason,
                    Err(_) => std::future::pending().await,
                }
            };

            let result = tokio::select! {
                biased;

                reason = cancelled => Err(FetchError::Cancelled(reason)),
                result = fut => result,
            };
            let _ = result_tx.send(result);
        });

        CancellableFetch {
            canceller: Canceller { cancel_tx: Some(cancel_tx) },
            settlement: Settlement { result_rx },
        }
    }
}

impl<T> CancellableFetch<T> {
    pub fn cancel(&mut self, reason: impl Into<String>) {
        self.canceller.cancel(reason);
    }

    pub async fn wait(self) -> Result<T> {
        self.settlement.wait().await
    }

    /// Separate the cancel side from the result side
    pub fn into_parts(self) -> (Canceller, Settlement<T>) {
        (self.canceller, self.settlement)
    }
}
