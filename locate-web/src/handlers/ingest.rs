//! Repository ingestion handler

use crate::{
    error::{ApiError, UnprocessableBody},
    extract::ValidatedJson,
    AppState,
};
use axum::{extract::State, response::Json};
use locate_core::{
    log_operation_start, log_operation_success, ErrorResponse, IngestError, IngestRequest,
    IngestSuccessResponse, RequestValidationError, Validate,
};

/// Ingest a GitHub repository
#[utoipa::path(
    post,
    path = "/api/ingest",
    tag = "Ingestion",
    summary = "Ingest a repository",
    description = "Clone, process and index a GitHub repository so it can be queried through /api/chat",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Repository processed and indexed", body = IngestSuccessResponse),
        (status = 400, description = "Repository URL rejected by the agent (INVALID_URL)", body = ErrorResponse),
        (status = 401, description = "Token invalid (INVALID_TOKEN) or required for a private repository (PRIVATE_REPO_NO_TOKEN)", body = ErrorResponse),
        (status = 403, description = "Token lacks repository permissions (INSUFFICIENT_PERMISSIONS)", body = ErrorResponse),
        (status = 404, description = "Repository does not exist (REPO_NOT_FOUND)", body = ErrorResponse),
        (status = 422, description = "Request validation failed (VALIDATION_ERROR), repository too large (REPO_TOO_LARGE) or processing failed (PROCESSING_FAILED)", body = UnprocessableBody),
        (status = 500, description = "Storage failure (STORAGE_ERROR) or unexpected agent error (AGENT_ERROR)", body = ErrorResponse),
        (status = 501, description = "Ingestion agent not connected (NOT_IMPLEMENTED)", body = ErrorResponse)
    )
)]
pub async fn ingest_repository(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<IngestRequest>,
) -> Result<Json<IngestSuccessResponse>, ApiError> {
    log_operation_start!(
        "ingest",
        repository_url = %request.repository_url,
        has_token = request.github_token.is_some(),
        agent = state.agents.ingestion.name()
    );

    let response = state
        .agents
        .ingestion
        .ingest(request)
        .await
        .inspect_err(IngestError::log)?;

    if let Err(errors) = response.validate() {
        let err = IngestError::unexpected(format!(
            "ingestion agent returned a malformed response: {}",
            RequestValidationError::from(errors)
        ));
        err.log();
        return Err(err.into());
    }

    log_operation_success!(
        "ingest",
        repository_id = %response.repository_id,
        files_processed = response.processing_summary.files_processed
    );
    Ok(Json(response))
}
