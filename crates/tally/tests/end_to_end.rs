//! Client against a live server over loopback HTTP.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::json;

use tally::client::config::{self as client_config, ClientConfig, RequestMethod};
use tally::client::display::{DisplaySurface, ErrorIndicator};
use tally::client::transport::HttpTransport;
use tally::client::{ClientError, CountFetcher};
use tally::server::{app_state::AppState, config::ServerConfig, router, store::FileStore};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn fast_client(addr: SocketAddr, path: &str) -> ClientConfig {
    let yaml = format!(
        "version: 1\nendpoint: \"http://{addr}{path}\"\ntimeout_ms: 300\nretry_delay_ms: 50\nanimation_ms: 0\n"
    );
    client_config::load_from_str(&yaml).unwrap()
}

fn fetcher(cfg: &ClientConfig) -> CountFetcher<HttpTransport> {
    let transport = HttpTransport::new(&cfg.endpoint, cfg.method).unwrap();
    CountFetcher::new(transport, cfg.policy())
}

#[derive(Default)]
struct Recording {
    texts: Vec<String>,
    error: Option<ErrorIndicator>,
}

impl DisplaySurface for Recording {
    fn set_text(&mut self, text: &str) {
        self.texts.push(text.to_string());
    }

    fn show_error(&mut self, indicator: &ErrorIndicator) {
        self.error = Some(indicator.clone());
    }
}

#[tokio::test]
async fn counts_up_across_visits_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("count.json")).await.unwrap();
    let state = AppState::with_store(ServerConfig::default(), Arc::new(store)).unwrap();
    let addr = spawn(router::build_router(state)).await;

    let cfg = fast_client(addr, "/visitor-count");
    let f = fetcher(&cfg);

    let mut surface = Recording::default();
    assert_eq!(f.fetch_and_display(&mut surface, &cfg.display()).await.unwrap(), 1);
    assert_eq!(surface.texts, vec!["1".to_string()]);

    assert_eq!(f.fetch().await.unwrap(), 2);

    let mut get_cfg = cfg.clone();
    get_cfg.method = RequestMethod::Get;
    assert_eq!(fetcher(&get_cfg).fetch().await.unwrap(), 3);
}

#[tokio::test]
async fn server_errors_exhaust_three_attempts() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new().route(
        "/visitor-count",
        post(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "INTERNAL", "message": "boom"})),
                )
            }
        }),
    );
    let addr = spawn(app).await;

    let cfg = fast_client(addr, "/visitor-count");
    let mut surface = Recording::default();
    let err = fetcher(&cfg)
        .fetch_and_display(&mut surface, &cfg.display())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ExhaustedRetries { attempts: 3, .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
    assert_eq!(surface.error.unwrap().color, "#e74c3c");
}

#[tokio::test]
async fn slow_first_response_times_out_then_recovers() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let app = Router::new().route(
        "/visitor-count",
        post(move || {
            let counter = Arc::clone(&counter);
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
                Json(json!({"count": 5}))
            }
        }),
    );
    let addr = spawn(app).await;

    let cfg = fast_client(addr, "/visitor-count");
    assert_eq!(fetcher(&cfg).fetch().await.unwrap(), 5);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut cfg = fast_client(addr, "/visitor-count");
    cfg.max_attempts = 2;
    let err = fetcher(&cfg).fetch().await.unwrap_err();

    match err {
        ClientError::ExhaustedRetries { attempts, last } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*last, ClientError::Network(_) | ClientError::Timeout(_)));
        }
        other => panic!("unexpected {other:?}"),
    }
}
