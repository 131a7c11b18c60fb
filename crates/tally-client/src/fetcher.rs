//! Drives `FetchState` against a transport: per-attempt timeout, fixed-delay
//! sequential retry, then hands the result to a display surface.

use std::time::Duration;

use tally_core::protocol::counter::extract_count;
use tokio::time;

use crate::display::{animate_count, DisplayOptions, DisplaySurface};
use crate::error::ClientError;
use crate::machine::{FetchEvent, FetchState};
use crate::transport::CountTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Deadline for one attempt.
    pub timeout: Duration,
    /// Total attempts, first one included.
    pub max_attempts: u32,
    /// Fixed pause between a failed attempt and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

pub struct CountFetcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: CountTransport> CountFetcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run the flow to a terminal state and return the count.
    pub async fn fetch(&self) -> Result<u64, ClientError> {
        self.fetch_observed(|_| {}).await
    }

    /// Like `fetch`, reporting every state entered (including the first
    /// `Requesting`) to `on_state`.
    pub async fn fetch_observed<F>(&self, mut on_state: F) -> Result<u64, ClientError>
    where
        F: FnMut(&FetchState),
    {
        let max = self.policy.max_attempts.max(1);
        let mut state = FetchState::Idle.next(FetchEvent::Start, max);

        loop {
            on_state(&state);
            let event = match &state {
                FetchState::Idle => FetchEvent::Start,
                FetchState::Requesting { attempt } => {
                    tracing::debug!(attempt, "requesting visitor count");
                    match self.attempt().await {
                        Ok(count) => FetchEvent::AttemptSucceeded(count),
                        Err(e) => FetchEvent::AttemptFailed(e),
                    }
                }
                FetchState::Retrying { attempt, error } => {
                    tracing::warn!(
                        attempt,
                        max_attempts = max,
                        kind = error.kind(),
                        error = %error,
                        delay_ms = self.policy.delay.as_millis() as u64,
                        "visitor count attempt failed, retrying"
                    );
                    time::sleep(self.policy.delay).await;
                    FetchEvent::BackoffElapsed
                }
                FetchState::Success { count, attempts } => {
                    tracing::info!(count, attempts, "visitor count fetched");
                    return Ok(*count);
                }
                FetchState::Failed { attempts, error } => {
                    tracing::error!(
                        attempts,
                        kind = error.kind(),
                        error = %error,
                        "visitor count unavailable, giving up"
                    );
                    return Err(ClientError::ExhaustedRetries {
                        attempts: *attempts,
                        last: Box::new(error.clone()),
                    });
                }
            };
            state = state.next(event, max);
        }
    }

    /// One attempt: the request races the timeout and the loser is dropped.
    async fn attempt(&self) -> Result<u64, ClientError> {
        let body = match time::timeout(self.policy.timeout, self.transport.request_count()).await {
            Ok(res) => res?,
            Err(_) => return Err(ClientError::Timeout(self.policy.timeout)),
        };
        extract_count(&body).ok_or(ClientError::InvalidResponseShape)
    }

    /// Fetch, then animate the count in or show the error indicator.
    pub async fn fetch_and_display<S>(
        &self,
        surface: &mut S,
        display: &DisplayOptions,
    ) -> Result<u64, ClientError>
    where
        S: DisplaySurface + ?Sized,
    {
        match self.fetch().await {
            Ok(count) => {
                animate_count(surface, count, display.animation).await;
                Ok(count)
            }
            Err(e) => {
                surface.show_error(&display.error);
                Err(e)
            }
        }
    }
}
