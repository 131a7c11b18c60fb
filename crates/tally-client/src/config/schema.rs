use std::time::Duration;

use serde::Deserialize;
use tally_core::config::Validate;
use tally_core::error::{Result, TallyError};

use crate::display::{parse_hex_color, DisplayOptions, ErrorIndicator};
use crate::fetcher::RetryPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    #[default]
    Post,
    Get,
}

impl RequestMethod {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Get => reqwest::Method::GET,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub method: RequestMethod,

    /// Per-attempt deadline.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Total attempts, first one included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed delay between attempts (no backoff growth).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,

    #[serde(default = "default_error_text")]
    pub error_text: String,

    #[serde(default = "default_error_color")]
    pub error_color: String,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        ClientConfig::validate(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            endpoint: default_endpoint(),
            method: RequestMethod::default(),
            timeout_ms: default_timeout_ms(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            animation_ms: default_animation_ms(),
            error_text: default_error_text(),
            error_color: default_error_color(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::UnsupportedVersion);
        }
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| TallyError::BadRequest(format!("endpoint is not a valid url: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TallyError::BadRequest(
                "endpoint must be an http(s) url".into(),
            ));
        }
        if !(100..=60_000).contains(&self.timeout_ms) {
            return Err(TallyError::BadRequest(
                "timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if !(1..=10).contains(&self.max_attempts) {
            return Err(TallyError::BadRequest(
                "max_attempts must be between 1 and 10".into(),
            ));
        }
        if self.retry_delay_ms > 60_000 {
            return Err(TallyError::BadRequest(
                "retry_delay_ms must be at most 60000".into(),
            ));
        }
        if self.animation_ms > 10_000 {
            return Err(TallyError::BadRequest(
                "animation_ms must be at most 10000".into(),
            ));
        }
        if self.error_text.trim().is_empty() {
            return Err(TallyError::BadRequest("error_text must not be empty".into()));
        }
        if parse_hex_color(&self.error_color).is_none() {
            return Err(TallyError::BadRequest(
                "error_color must be a #rrggbb or #rgb colour".into(),
            ));
        }
        Ok(())
    }

    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(self.timeout_ms),
            max_attempts: self.max_attempts,
            delay: Duration::from_millis(self.retry_delay_ms),
        }
    }

    pub fn display(&self) -> DisplayOptions {
        DisplayOptions {
            animation: Duration::from_millis(self.animation_ms),
            error: ErrorIndicator {
                text: self.error_text.clone(),
                color: self.error_color.clone(),
            },
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/visitor-count".into()
}
fn default_timeout_ms() -> u64 {
    5000
}
fn default_max_attempts() -> u32 {
    3
}
fn default_retry_delay_ms() -> u64 {
    1000
}
fn default_animation_ms() -> u64 {
    1000
}
fn default_error_text() -> String {
    "Error loading count".into()
}
fn default_error_color() -> String {
    "#e74c3c".into()
}
