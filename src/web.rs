use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::ServerConfig;

/// Full application router: API routes under `/api` plus shared layers
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = usize::try_from(config.body_limit_kb)
        .unwrap_or(usize::MAX)
        .saturating_mul(1024);

    Router::new()
        .nest("/api", api::router(state))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let app = app(state, config);
    let addr = format!("{}:{}", config.host, config.port);

    if let (Some(cert), Some(key)) = (&config.tls_cert_path, &config.tls_key_path) {
        return serve_tls(app, &addr, cert, key).await;
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")
}

#[cfg(feature = "tls")]
async fn serve_tls(app: Router, addr: &str, cert: &str, key: &str) -> Result<()> {
    use axum_server::tls_rustls::RustlsConfig;

    let tls = RustlsConfig::from_pem_file(cert, key)
        .await
        .with_context(|| format!("Failed to load TLS certificate {cert} and key {key}"))?;
    let socket_addr = tokio::net::lookup_host(addr)
        .await
        .with_context(|| format!("Failed to resolve {addr}"))?
        .next()
        .with_context(|| format!("No address found for {addr}"))?;

    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(socket_addr, tls)
        .serve(app.into_make_service())
        .await
        .context("Web server failed")
}

#[cfg(not(feature = "tls"))]
async fn serve_tls(_app: Router, _addr: &str, _cert: &str, _key: &str) -> Result<()> {
    anyhow::bail!("TLS is configured but the binary was built without the `tls` feature")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
