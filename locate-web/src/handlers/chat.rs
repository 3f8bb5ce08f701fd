//! Chat query handler

use crate::{
    error::{ApiError, UnprocessableBody},
    extract::ValidatedJson,
    AppState,
};
use axum::{extract::State, response::Json};
use locate_core::{
    log_operation_start, log_operation_success, ChatError, ChatRequest, ChatSuccessResponse,
    ErrorResponse, RequestValidationError, Validate,
};

/// Ask a question about an ingested repository
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    summary = "Ask a question",
    description = "Answer a natural language question about a previously ingested repository, with ranked file suggestions",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Question answered", body = ChatSuccessResponse),
        (status = 404, description = "Repository has not been ingested (REPO_NOT_INDEXED)", body = ErrorResponse),
        (status = 422, description = "Request validation failed (VALIDATION_ERROR) or query could not be processed (QUERY_PROCESSING_FAILED)", body = UnprocessableBody),
        (status = 500, description = "Chat agent unavailable (AGENT_UNAVAILABLE) or unexpected agent error (AGENT_ERROR)", body = ErrorResponse),
        (status = 501, description = "Chat agent not connected (NOT_IMPLEMENTED)", body = ErrorResponse)
    )
)]
pub async fn chat_query(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> Result<Json<ChatSuccessResponse>, ApiError> {
    log_operation_start!(
        "chat",
        repository_id = %request.repository_id,
        history = request.history_len(),
        agent = state.agents.chat.name()
    );

    let response = state
        .agents
        .chat
        .chat(request)
        .await
        .inspect_err(ChatError::log)?;

    if let Err(errors) = response.validate() {
        let err = ChatError::unexpected(format!(
            "chat agent returned a malformed response: {}",
            RequestValidationError::from(errors)
        ));
        err.log();
        return Err(err.into());
    }

    log_operation_success!(
        "chat",
        suggestions = response.file_suggestions.len(),
        processing_time_ms = response.metadata.processing_time_ms
    );
    Ok(Json(response))
}
