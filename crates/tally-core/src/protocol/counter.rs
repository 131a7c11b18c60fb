//! Counter endpoint bodies.
//!
//! Success: `{"count": <u64>, "message": "..."}`.
//! Failure: `{"error": "<CLIENT_CODE>", "message": "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TallyError;

/// Singleton partition key of the Counter Record.
pub const DEFAULT_COUNTER_KEY: &str = "visitor-count";

/// Default route of the counter endpoint.
pub const DEFAULT_COUNTER_PATH: &str = "/visitor-count";

pub const SUCCESS_MESSAGE: &str = "Visitor count updated successfully";

/// Field names a client accepts for the count, in priority order.
pub const COUNT_FIELDS: [&str; 5] = ["count", "visit_count", "visitor_count", "visitorCount", "visits"];

/// Body returned after a successful increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CountResponse {
    pub fn updated(count: u64) -> Self {
        Self {
            count,
            message: Some(SUCCESS_MESSAGE.to_string()),
        }
    }
}

/// Body returned on any failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl From<&TallyError> for ErrorResponse {
    fn from(e: &TallyError) -> Self {
        Self {
            error: e.client_code().as_str().to_string(),
            message: e.to_string(),
        }
    }
}

/// Pull the count out of a response body.
///
/// Walks `COUNT_FIELDS` in order; a field counts if it holds a non-negative
/// integer or a string that parses as one. Returns `None` when no field yields
/// a value, which callers treat as an invalid response shape.
pub fn extract_count(body: &Value) -> Option<u64> {
    let obj = body.as_object()?;
    COUNT_FIELDS.iter().find_map(|name| {
        let v = obj.get(*name)?;
        let n = numeric(v);
        if n.is_none() {
            tracing::debug!(field = %name, value = %v, "count field present but not numeric");
        }
        n
    })
}

fn numeric(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn updated_body_shape() {
        let v = serde_json::to_value(CountResponse::updated(42)).unwrap();
        assert_eq!(v, json!({"count": 42, "message": SUCCESS_MESSAGE}));
    }

    #[test]
    fn error_body_uses_client_code() {
        let body = ErrorResponse::from(&TallyError::MethodNotAllowed);
        assert_eq!(body.error, "METHOD_NOT_ALLOWED");
        assert_eq!(body.message, "method not allowed");
    }

    #[test]
    fn extract_prefers_first_numeric_field() {
        assert_eq!(extract_count(&json!({"count": 7, "visits": 9})), Some(7));
        assert_eq!(extract_count(&json!({"count": "abc", "visits": 9})), Some(9));
        assert_eq!(extract_count(&json!({"visitorCount": "12"})), Some(12));
    }

    #[test]
    fn extract_rejects_non_numeric() {
        assert_eq!(extract_count(&json!({"count": null})), None);
        assert_eq!(extract_count(&json!({"count": -1})), None);
        assert_eq!(extract_count(&json!({"count": 1.5})), None);
        assert_eq!(extract_count(&json!({"message": "hi"})), None);
        assert_eq!(extract_count(&json!([1, 2])), None);
    }
}
