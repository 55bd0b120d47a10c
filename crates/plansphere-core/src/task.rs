//! Supersedable background tasks
//!
//! A [`TaskSlot`] holds at most one in-flight task. Starting a new one cancels
//! the previous, so only the latest request of a kind (itinerary generation,
//! photo analysis) can complete. A superseded task resolves to `None`.

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Holds the cancellation handle of the current in-flight task, if any.
#[derive(Debug, Default)]
pub struct TaskSlot {
    cancel: Option<CancellationToken>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future`, cancelling whatever task previously occupied the slot.
    ///
    /// Returns `Some(output)` if the task ran to completion, `None` if it was
    /// superseded by a later call (or cancelled explicitly) first.
    pub fn supersede<F, T>(&mut self, future: F) -> impl Future<Output = Option<T>>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if let Some(previous) = self.cancel.take() {
            debug!("superseding in-flight task");
            previous.cancel();
        }

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                output = future => Some(output),
            }
        });

        async move {
            match handle.await {
                Ok(output) => output,
                Err(_) => None,
            }
        }
    }

    /// Cancel the current task without starting a new one.
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.cancel.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_task_runs_to_completion() {
        let mut slot = TaskSlot::new();
        let result = slot.supersede(async { 7 }).await;
        assert_eq!(result, Some(7));
    }

    #[tokio::test]
    async fn test_newer_task_supersedes_older() {
        let mut slot = TaskSlot::new();
        let slow = slot.supersede(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "slow"
        });
        let fast = slot.supersede(async { "fast" });

        assert_eq!(fast.await, Some("fast"));
        assert_eq!(slow.await, None);
    }

    #[tokio::test]
    async fn test_explicit_cancel() {
        let mut slot = TaskSlot::new();
        let pending = slot.supersede(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            1
        });
        assert!(slot.is_occupied());
        slot.cancel();
        assert!(!slot.is_occupied());
        assert_eq!(pending.await, None);
    }
}
