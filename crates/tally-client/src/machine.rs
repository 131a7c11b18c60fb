//! Fetch-and-display state machine.
//!
//! `Idle -> Requesting -> (Success | Retrying -> Requesting | Failed)`.
//! Transitions are pure so attempt counting and termination can be checked
//! without a network or a clock; `fetcher` drives them.

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    /// `attempt` is 1-based.
    Requesting { attempt: u32 },
    /// Attempt `attempt` failed; waiting out the fixed delay.
    Retrying { attempt: u32, error: ClientError },
    Success { count: u64, attempts: u32 },
    Failed { attempts: u32, error: ClientError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    Start,
    AttemptSucceeded(u64),
    AttemptFailed(ClientError),
    BackoffElapsed,
}

impl FetchState {
    /// Apply one event. Pairs that make no sense leave the state unchanged.
    pub fn next(self, event: FetchEvent, max_attempts: u32) -> FetchState {
        use FetchEvent as E;
        use FetchState as S;

        match (self, event) {
            (S::Idle, E::Start) => S::Requesting { attempt: 1 },
            (S::Requesting { attempt }, E::AttemptSucceeded(count)) => S::Success {
                count,
                attempts: attempt,
            },
            (S::Requesting { attempt }, E::AttemptFailed(error))
                if attempt < max_attempts && error.is_retryable() =>
            {
                S::Retrying { attempt, error }
            }
            (S::Requesting { attempt }, E::AttemptFailed(error)) => S::Failed {
                attempts: attempt,
                error,
            },
            (S::Retrying { attempt, .. }, E::BackoffElapsed) => S::Requesting {
                attempt: attempt + 1,
            },
            (state, event) => {
                tracing::warn!(?state, ?event, "ignored event in fetch state");
                state
            }
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Success { .. } | FetchState::Failed { .. })
    }
}
