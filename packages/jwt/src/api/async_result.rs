//! Future returned by the async builder operations

use crate::error::{JwtError, JwtResult};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Resolves to the result of a sign or verify running on the tokio runtime.
///
/// If the task is dropped before it reports back, the future resolves to
/// [`JwtError::TaskFailed`].
#[must_use = "the operation result is only observed by awaiting it"]
pub struct AsyncJwtResult<T> {
    receiver: oneshot::Receiver<JwtResult<T>>,
}

impl<T> AsyncJwtResult<T> {
    pub(crate) fn new(receiver: oneshot::Receiver<JwtResult<T>>) -> Self {
        Self { receiver }
    }

    /// Already resolved to `result`.
    pub(crate) fn ready(result: JwtResult<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self::new(rx)
    }
}

impl<T> Future for AsyncJwtResult<T> {
    type Output = JwtResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::TaskFailed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn forwards_the_sent_result() {
        let (tx, rx) = oneshot::channel();
        tx.send(Ok(7)).unwrap();
        assert_eq!(AsyncJwtResult::new(rx).await, Ok(7));
    }

    #[tokio::test]
    async fn ready_result_resolves_immediately() {
        let result: AsyncJwtResult<()> = AsyncJwtResult::ready(Err(JwtError::MissingAlgorithm));
        assert_eq!(result.await, Err(JwtError::MissingAlgorithm));
    }

    #[tokio::test]
    async fn dropped_sender_is_task_failure() {
        let (tx, rx) = oneshot::channel::<JwtResult<()>>();
        drop(tx);
        assert_eq!(AsyncJwtResult::new(rx).await, Err(JwtError::TaskFailed));
    }
}
