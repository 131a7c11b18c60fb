//! CORS middleware.
//!
//! Browsers only expose a response body to script when the response carries
//! the allow-origin header, so the headers go on everything the router emits:
//! success, error, preflight, 404 and 405 alike.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tally_core::error::{Result, TallyError};
use tally_core::protocol::cors;

use crate::app_state::AppState;
use crate::config::CorsSection;

/// Pre-validated header values, built once at startup.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
    allow_methods: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(cfg: &CorsSection) -> Result<Self> {
        Ok(Self {
            allow_origin: header_value("cors.allow_origin", &cfg.allow_origin)?,
            allow_headers: header_value("cors.allow_headers", &cfg.allow_headers)?,
            allow_methods: header_value("cors.allow_methods", &cfg.allow_methods)?,
        })
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            HeaderName::from_static(cors::ALLOW_ORIGIN),
            self.allow_origin.clone(),
        );
        headers.insert(
            HeaderName::from_static(cors::ALLOW_HEADERS),
            self.allow_headers.clone(),
        );
        headers.insert(
            HeaderName::from_static(cors::ALLOW_METHODS),
            self.allow_methods.clone(),
        );
    }
}

fn header_value(name: &str, v: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(v)
        .map_err(|e| TallyError::BadRequest(format!("{name} is not a valid header value: {e}")))
}

pub async fn apply_cors(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    app.cors().apply(res.headers_mut());
    res
}
