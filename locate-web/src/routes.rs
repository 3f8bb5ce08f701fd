//! Route definitions for the Agents Locate API

use crate::{handlers, openapi::ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ingest", post(handlers::ingest_repository))
        .route("/chat", post(handlers::chat_query))
}

/// Swagger UI at `/api/docs`, backed by the document at `/api/openapi.json`
pub fn docs_routes() -> Router<AppState> {
    SwaggerUi::new("/api/docs")
        .url("/api/openapi.json", ApiDoc::openapi())
        .into()
}

/// Create all routes combined
pub fn all_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::health_check))
        .nest("/api", api_routes())
        .merge(docs_routes())
}
