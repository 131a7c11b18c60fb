//! One request against the counter endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tally_core::error::{Result, TallyError};

use crate::config::RequestMethod;
use crate::error::ClientError;

/// Issues a single increment request and returns the decoded body.
///
/// Implementations do not time out or retry on their own; `CountFetcher`
/// owns both.
#[async_trait]
pub trait CountTransport: Send + Sync {
    async fn request_count(&self) -> std::result::Result<Value, ClientError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    method: reqwest::Method,
}

impl HttpTransport {
    pub fn new(endpoint: &str, method: RequestMethod) -> Result<Self> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|e| TallyError::BadRequest(format!("endpoint is not a valid url: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            method: method.as_reqwest(),
        })
    }
}

#[async_trait]
impl CountTransport for HttpTransport {
    async fn request_count(&self) -> std::result::Result<Value, ClientError> {
        let res = self
            .client
            .request(self.method.clone(), self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        let body: Bytes = res
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(error = %e, "counter response is not json");
            ClientError::InvalidResponseShape
        })
    }
}
