//! API health check endpoint.
//!
//! `/health` is used by container orchestrators and CI pipelines to verify
//! that the service is up and answering HTTP. The gateway (`mod.rs`) merges
//! this subrouter into the top-level router so `main.rs` does not need to
//! know about individual endpoints.

use axum::{routing::get, Json, Router};
use serde::Serialize;

// ---

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Deliberately lightweight: reports that the process is serving requests
/// without touching the database.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the
/// gateway router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
