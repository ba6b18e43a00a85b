//! Per-request cancellation and deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::{DeckgenError, DeckgenResult};

/// Cancellation token plus optional deadline carried through a workflow.
///
/// Clones share the same token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that never expires and is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context expiring `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_at(Instant::now() + timeout)
    }

    /// Set an absolute deadline.
    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Use an existing token, e.g. one cancelled on client disconnect.
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Fail if the context is already cancelled or past its deadline.
    pub fn check(&self) -> DeckgenResult<()> {
        if self.token.is_cancelled() {
            return Err(DeckgenError::cancelled("request cancelled"));
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(DeckgenError::timeout("request deadline exceeded"));
        }
        Ok(())
    }

    /// Run `fut` until it completes, the token fires, or the deadline passes.
    ///
    /// The future is dropped when it loses the race.
    pub async fn run<F, T>(&self, fut: F) -> DeckgenResult<T>
    where
        F: Future<Output = DeckgenResult<T>>,
    {
        self.check()?;
        let deadline = self.deadline;
        let bounded = async move {
            match deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fut)
                    .await
                    .map_err(|_| DeckgenError::timeout("request deadline exceeded"))?,
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(DeckgenError::cancelled("request cancelled")),
            result = bounded => result,
        }
    }
}
