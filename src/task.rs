// ABOUTME: Generic async wrapper submitting facade operations to the runtime worker pool
// ABOUTME: TaskHandle resolves to the operation's result or propagates its failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::JoinHandle;

use crate::errors::{ApiError, ApiResult};

/// Handle to an operation running on the shared worker pool.
///
/// Awaiting the handle yields the operation's result; if the background task
/// panicked or was aborted before completing, awaiting yields
/// [`ApiError::Task`]. There is no ordering guarantee between two submitted
/// operations unless the caller awaits one before submitting the next.
#[derive(Debug)]
pub struct TaskHandle<T> {
    inner: JoinHandle<ApiResult<T>>,
}

impl<T> TaskHandle<T> {
    /// Best-effort cancellation. Has no effect once the operation has
    /// completed; an aborted task resolves to [`ApiError::Task`].
    pub fn abort(&self) {
        self.inner.abort();
    }

    /// Whether the underlying task has finished (successfully or not).
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = ApiResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.inner).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(join_error)) => {
                Poll::Ready(Err(ApiError::Task(join_error.to_string())))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Submit an operation to the shared worker pool and return immediately.
///
/// Submission never blocks the caller; the operation starts running on a
/// background worker as soon as the scheduler picks it up. Every facade's
/// asynchronous variant is built from this.
pub fn submit<T, Fut>(operation: Fut) -> TaskHandle<T>
where
    T: Send + 'static,
    Fut: Future<Output = ApiResult<T>> + Send + 'static,
{
    TaskHandle {
        inner: tokio::spawn(operation),
    }
}
