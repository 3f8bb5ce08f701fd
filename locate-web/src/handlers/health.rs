//! Health check handlers

use axum::response::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const SERVICE_NAME: &str = "agents-locate-api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "agents-locate-api")]
    pub service: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    summary = "Health check",
    description = "Liveness check that never touches the agents",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}
