//! Liveness check.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of the health response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: String,
}

/// `GET /health` -- Returns `{"status":"ok"}` with 200 OK.
///
/// Does not check the table or the log bucket.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "HealthCheck",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
    })
}
