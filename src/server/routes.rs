//! Request handlers for the simulation API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};

use crate::core::simulator;

/// Run one simulation with the posted parameters.
///
/// POST /api/simulate
pub async fn simulate(Json(raw): Json<Value>) -> Response {
    let mut rng = StdRng::from_entropy();

    match simulator::run(&raw, &mut rng) {
        Ok(results) => {
            tracing::info!(
                peak_position = results.peak_position,
                total_counts = results.statistics.total_counts,
                sync_success = results.statistics.sync_success,
                "simulation completed"
            );
            (
                StatusCode::OK,
                Json(json!({ "status": "success", "results": results })),
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!(field = err.field(), "rejected simulation request: {err}");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": err.to_string() })),
            )
                .into_response()
        }
    }
}

/// Liveness probe.
///
/// GET /api/health
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "message": "pulse link simulation server is running"
    }))
}
