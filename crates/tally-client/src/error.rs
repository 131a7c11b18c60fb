//! Client-side failure taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Why one attempt (or the whole fetch) failed.
///
/// Every variant except `ExhaustedRetries` describes a single attempt and is
/// retryable; `ExhaustedRetries` is the terminal outcome of the flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected http status {0}")]
    HttpStatus(u16),
    #[error("response carries no numeric count")]
    InvalidResponseShape,
    #[error("gave up after {attempts} attempts: {last}")]
    ExhaustedRetries { attempts: u32, last: Box<ClientError> },
}

impl ClientError {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ClientError::ExhaustedRetries { .. })
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Timeout(_) | ClientError::Network(_) => "transient_network",
            ClientError::HttpStatus(_) => "http_status",
            ClientError::InvalidResponseShape => "invalid_response_shape",
            ClientError::ExhaustedRetries { .. } => "exhausted_retries",
        }
    }
}
