//! Counter endpoint handlers.
//!
//! Stateless per request: the handler reads nothing but config and talks to
//! the store through its single atomic increment.

use std::time::Instant;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    Json,
};
use tally_core::error::TallyError;
use tally_core::protocol::counter::CountResponse;

use crate::app_state::AppState;
use crate::http::ApiError;

/// `POST` (and, when enabled, `GET`) on the counter path.
///
/// axum routes HEAD to the GET handler; HEAD must not count as a visit.
pub async fn increment(
    State(app): State<AppState>,
    method: Method,
) -> Result<Json<CountResponse>, ApiError> {
    if method != Method::POST && method != Method::GET {
        return Err(reject(&app, &method));
    }

    let store = app.store();
    let backend = store.backend();
    let key = &app.cfg().storage.key;

    let started = Instant::now();
    let res = store.increment(key).await;
    app.metrics()
        .increment_duration
        .observe(&[("backend", backend)], started.elapsed());

    match res {
        Ok(count) => {
            app.metrics()
                .requests
                .inc(&[("method", method.as_str()), ("outcome", "ok")]);
            tracing::debug!(%method, count, "visitor count updated");
            Ok(Json(CountResponse::updated(count)))
        }
        Err(e) => {
            let code = e.client_code().as_str();
            app.metrics()
                .requests
                .inc(&[("method", method.as_str()), ("outcome", code)]);
            app.metrics().store_errors.inc(&[("backend", backend)]);
            tracing::error!(%method, backend, error = %e, "visitor count update failed");
            Err(ApiError(e))
        }
    }
}

/// CORS preflight. Never touches the store; headers come from the middleware.
pub async fn preflight(State(app): State<AppState>) -> StatusCode {
    app.metrics()
        .requests
        .inc(&[("method", "OPTIONS"), ("outcome", "ok")]);
    StatusCode::OK
}

/// Any other method on the counter path.
pub async fn method_not_allowed(State(app): State<AppState>, method: Method) -> ApiError {
    reject(&app, &method)
}

fn reject(app: &AppState, method: &Method) -> ApiError {
    let e = TallyError::MethodNotAllowed;
    app.metrics()
        .requests
        .inc(&[("method", method.as_str()), ("outcome", e.client_code().as_str())]);
    tracing::debug!(method = %method, "rejected method on counter path");
    ApiError(e)
}
