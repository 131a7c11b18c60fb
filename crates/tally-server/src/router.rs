//! Axum router wiring.
//!
//! Counter path (default `/visitor-count`) plus `/healthz`, `/readyz`,
//! `/metrics`. The CORS middleware wraps everything including the fallback.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, http, ops};

pub fn build_router(state: AppState) -> Router {
    let mut counter = post(http::counter::increment).options(http::counter::preflight);
    if state.cfg().server.allow_get {
        counter = counter.get(http::counter::increment);
    }
    let counter = counter.fallback(http::counter::method_not_allowed);

    Router::new()
        .route(&state.cfg().server.path, counter)
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .fallback(http::error::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            http::cors::apply_cors,
        ))
        .with_state(state)
}
