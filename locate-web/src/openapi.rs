//! OpenAPI document for the Agents Locate API

use utoipa::OpenApi;

use crate::error::UnprocessableBody;
use crate::handlers::HealthResponse;
use locate_core::{
    ChatMetadata, ChatRequest, ChatSuccessResponse, ConversationEntry, ErrorResponse,
    FieldViolation, FileSuggestion, IngestRequest, IngestSuccessResponse, ProcessingSummary,
    ValidationErrorResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agents Locate API",
        version = "1.0.0",
        description = "Ingest GitHub repositories and ask natural language questions about them"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        crate::handlers::health_check,
        crate::handlers::ingest_repository,
        crate::handlers::chat_query,
    ),
    components(
        schemas(
            HealthResponse,
            IngestRequest,
            IngestSuccessResponse,
            ProcessingSummary,
            ChatRequest,
            ConversationEntry,
            ChatSuccessResponse,
            FileSuggestion,
            ChatMetadata,
            ErrorResponse,
            ValidationErrorResponse,
            FieldViolation,
            UnprocessableBody,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Ingestion", description = "Repository ingestion"),
        (name = "Chat", description = "Questions about ingested repositories"),
    )
)]
pub struct ApiDoc;

/// Get the OpenAPI document as JSON
pub fn get_openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}

/// Get the OpenAPI document as YAML
pub fn get_openapi_yaml() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&ApiDoc::openapi())
}
