//! HTTP boundary: parameter marshalling in, JSON results out. The engine
//! itself stays synchronous; each request gets its own entropy-seeded rng.

use std::net::SocketAddr;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod routes;

/// Build the application router. Split out so tests can drive it without a
/// socket.
pub fn router() -> Router {
    Router::new()
        .route("/api/simulate", post(routes::simulate))
        .route("/api/health", get(routes::health))
        // The original front-end is served from another origin.
        .layer(CorsLayer::permissive())
}

/// Bind and serve until the process is terminated.
pub async fn serve(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("pulse link simulation server listening on http://{addr}");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router()).await?;
    Ok(())
}
