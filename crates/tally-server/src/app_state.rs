//! Shared application state for the counter service.
//!
//! Holds config, the storage backend, metrics, and the prebuilt CORS header
//! set. Nothing in here caches the count.

use std::sync::Arc;

use tally_core::error::Result;

use crate::config::ServerConfig;
use crate::http::cors::CorsHeaders;
use crate::obs::metrics::ServerMetrics;
use crate::store::{self, CounterStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    store: Arc<dyn CounterStore>,
    cors: CorsHeaders,
    metrics: ServerMetrics,
}

impl AppState {
    /// Build application state, opening the backend named in config.
    pub async fn new(cfg: ServerConfig) -> Result<Self> {
        let store = store::from_config(&cfg.storage).await?;
        Self::with_store(cfg, store)
    }

    /// Build application state around an existing backend.
    pub fn with_store(cfg: ServerConfig, store: Arc<dyn CounterStore>) -> Result<Self> {
        let cors = CorsHeaders::from_config(&cfg.cors)?;
        tracing::info!(
            backend = store.backend(),
            key = %cfg.storage.key,
            path = %cfg.server.path,
            allow_get = cfg.server.allow_get,
            "counter state ready"
        );
        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                store,
                cors,
                metrics: ServerMetrics::default(),
            }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<dyn CounterStore> {
        Arc::clone(&self.inner.store)
    }

    pub fn cors(&self) -> &CorsHeaders {
        &self.inner.cors
    }

    pub fn metrics(&self) -> &ServerMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
