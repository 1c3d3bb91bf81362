//! HTTP server.
//!
//! Routes depend on the response mode:
//! - HTML: `GET /` form page, `POST /` form submission
//! - JSON: `GET /` usage info, `POST /check_aqi` JSON lookup
//!
//! Both modes also serve `/status` (JSON counters) and `/metrics` (Prometheus text).

mod client_ip;
mod handlers;
mod types;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::{Config, ResponseMode, SHUTDOWN_GRACE_PERIOD};
use crate::initialization::{init_provider, init_seen_email_store};
use crate::render::renderer_for;
use crate::service::AqiService;
use handlers::{
    form_lookup_handler, index_handler, json_lookup_handler, metrics_handler, status_handler,
};

pub use client_ip::ClientIp;
pub use types::AppState;

/// Path of the JSON lookup endpoint.
pub const JSON_LOOKUP_PATH: &str = "/check_aqi";

/// Builds the router for `state.mode`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = match state.mode {
        ResponseMode::Html => Router::new().route("/", get(index_handler).post(form_lookup_handler)),
        ResponseMode::Json => Router::new()
            .route("/", get(index_handler))
            .route(JSON_LOOKUP_PATH, post(json_lookup_handler)),
    };
    router
        .route("/status", get(status_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Wires the service, provider, store and renderer from `config`.
///
/// # Errors
///
/// Fails if the HTTP client, the upstream base URL or the HTML template is invalid.
pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = init_provider(config).context("Failed to initialize AQI provider")?;
    let seen = init_seen_email_store(config);
    let service = AqiService::new(config, seen, Arc::new(provider));
    let renderer =
        renderer_for(config.mode, config.require_email).context("Failed to load page template")?;
    Ok(Arc::new(AppState::new(
        Arc::new(service),
        Arc::from(renderer),
        config.mode,
    )))
}

/// Serves `state` on `listener` until `shutdown` is cancelled.
///
/// Once cancelled, in-flight requests get `SHUTDOWN_GRACE_PERIOD` to finish.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = build_router(state);
    let signal = shutdown.clone();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move { signal.cancelled().await })
    .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.map_err(|e| anyhow::anyhow!("Server error: {}", e))?;
        }
        _ = shutdown.cancelled() => {
            info!("Shutdown requested, draining in-flight requests");
            match tokio::time::timeout(SHUTDOWN_GRACE_PERIOD, &mut server).await {
                Ok(result) => result.map_err(|e| anyhow::anyhow!("Server error: {}", e))?,
                Err(_) => warn!(
                    "In-flight requests still running after {}s, stopping anyway",
                    SHUTDOWN_GRACE_PERIOD.as_secs()
                ),
            }
        }
    }
    Ok(())
}

/// Binds `config.host:config.port` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if initialization fails or the address cannot be bound.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    if config.api_key.is_none() {
        warn!("AQI_API_KEY is not set; every lookup will answer \"API key not set\"");
    }

    let state = build_state(&config)?;
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    let local = listener.local_addr().context("Failed to read bound address")?;
    info!("AQI checker ({:?} mode) listening on http://{}/", config.mode, local);
    match config.mode {
        ResponseMode::Html => info!("  - Form: http://{}/", local),
        ResponseMode::Json => info!("  - Lookup: POST http://{}{}", local, JSON_LOOKUP_PATH),
    }
    info!("  - Status: http://{}/status", local);
    info!("  - Metrics: http://{}/metrics", local);

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        ctrl_c.cancel();
    });

    serve(listener, state, shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_state_rejects_bad_base_url() {
        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        let err = build_state(&config).err().unwrap();
        assert!(format!("{:#}", err).contains("Invalid upstream base URL"));
    }

    #[tokio::test]
    async fn test_run_server_bind_failure() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: taken.local_addr().unwrap().port(),
            ..Default::default()
        };
        let err = run_server(config).await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind"));
    }

    #[tokio::test]
    async fn test_serve_stops_on_cancel() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let state = build_state(&Config::default()).unwrap();
        let shutdown = CancellationToken::new();
        let handle = tokio::spawn(serve(listener, state, shutdown.clone()));
        shutdown.cancel();
        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server should stop after cancellation")
            .unwrap();
        assert!(result.is_ok());
    }
}
