//! Request and response models
//!
//! Every model carries its wire constraints as `validator` derives so the same
//! declarations guard incoming requests and outgoing collaborator payloads.

use crate::validation::{
    require_finite, Validated, CONVERSATION_ROLE_RE, GITHUB_URL_RE, REPOSITORY_ID_RE,
};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Upper bound on prior turns a chat request may carry.
pub const MAX_CONVERSATION_HISTORY: usize = 10;

/// Upper bound on ranked file suggestions in a chat answer.
pub const MAX_FILE_SUGGESTIONS: usize = 20;

/// Machine-readable code for transport-level validation failures.
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

/// Repository ingestion request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct IngestRequest {
    #[validate(
        length(min = 19, max = 200),
        regex(path = *GITHUB_URL_RE, message = "Must be a valid GitHub repository URL")
    )]
    #[cfg_attr(feature = "openapi", schema(example = "https://github.com/facebook/react"))]
    pub repository_url: String,
    /// GitHub personal access token for private repositories
    #[validate(length(min = 4, max = 200))]
    #[serde(default)]
    pub github_token: Option<String>,
}

impl IngestRequest {
    pub fn new(repository_url: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
            github_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }
}

/// One prior turn of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ConversationEntry {
    #[validate(regex(path = *CONVERSATION_ROLE_RE, message = "Role must be 'user' or 'agent'"))]
    #[cfg_attr(feature = "openapi", schema(example = "user"))]
    pub role: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

impl ConversationEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: "agent".to_string(),
            content: content.into(),
        }
    }
}

/// Natural language query against an ingested repository
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[validate(schema(function = "check_history_bound", skip_on_field_errors = false))]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 5000))]
    #[cfg_attr(feature = "openapi", schema(example = "Where is user authentication handled?"))]
    pub message: String,
    #[validate(regex(path = *REPOSITORY_ID_RE, message = "Must be a repository id of the form repo-xxxxxxxx"))]
    #[cfg_attr(feature = "openapi", schema(example = "repo-a1b2c3d4"))]
    pub repository_id: String,
    #[validate(length(max = 10), nested)]
    #[serde(default)]
    pub conversation_history: Option<Vec<ConversationEntry>>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, repository_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            repository_id: repository_id.into(),
            conversation_history: None,
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationEntry>) -> Self {
        self.conversation_history = Some(history);
        self
    }

    pub fn history_len(&self) -> usize {
        self.conversation_history.as_ref().map_or(0, Vec::len)
    }
}

// Explicit twin of the declarative `length(max = 10)` bound; both must reject the same input.
fn check_history_bound(request: &ChatRequest) -> Result<(), ValidationError> {
    if request.history_len() > MAX_CONVERSATION_HISTORY {
        let mut error = ValidationError::new("history_too_long").with_message(Cow::Borrowed(
            "Conversation history limited to 10 entries",
        ));
        error.add_param(Cow::Borrowed("field"), &"conversation_history");
        error.add_param(Cow::Borrowed("max"), &MAX_CONVERSATION_HISTORY);
        return Err(error);
    }
    Ok(())
}

/// Statistics reported after a repository has been processed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ProcessingSummary {
    #[cfg_attr(feature = "openapi", schema(example = 247))]
    pub files_processed: u64,
    #[validate(range(min = 0.0), custom(function = "require_finite"))]
    #[cfg_attr(feature = "openapi", schema(example = 45.2))]
    pub processing_time_seconds: f64,
}

/// Successful ingestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[validate(schema(function = "check_success_flag", skip_on_field_errors = false))]
pub struct IngestSuccessResponse {
    #[cfg_attr(feature = "openapi", schema(example = true))]
    pub success: bool,
    /// Identifier to pass as `repository_id` in later chat requests
    #[validate(regex(path = *REPOSITORY_ID_RE))]
    #[cfg_attr(feature = "openapi", schema(example = "repo-a1b2c3d4"))]
    pub repository_id: String,
    #[validate(length(min = 1, max = 500))]
    pub message: String,
    #[validate(nested)]
    pub processing_summary: ProcessingSummary,
}

impl IngestSuccessResponse {
    pub fn new(
        repository_id: impl Into<String>,
        message: impl Into<String>,
        processing_summary: ProcessingSummary,
    ) -> Self {
        Self {
            success: true,
            repository_id: repository_id.into(),
            message: message.into(),
            processing_summary,
        }
    }
}

fn check_success_flag(response: &IngestSuccessResponse) -> Result<(), ValidationError> {
    if !response.success {
        let mut error = ValidationError::new("success_flag")
            .with_message(Cow::Borrowed("A success payload must carry success=true"));
        error.add_param(Cow::Borrowed("field"), &"success");
        return Err(error);
    }
    Ok(())
}

/// A file the chat agent considers relevant to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct FileSuggestion {
    #[validate(length(min = 1, max = 255))]
    #[cfg_attr(feature = "openapi", schema(example = "auth.js"))]
    pub file_name: String,
    #[validate(length(min = 1, max = 1000))]
    #[cfg_attr(feature = "openapi", schema(example = "/src/utils/auth.js"))]
    pub file_path: String,
    #[validate(length(min = 1, max = 2000))]
    pub github_url: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(range(min = 0.0, max = 1.0), custom(function = "require_finite"))]
    #[cfg_attr(feature = "openapi", schema(example = 0.95))]
    pub relevance_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChatMetadata {
    #[cfg_attr(feature = "openapi", schema(example = 1247))]
    pub processing_time_ms: u64,
    #[validate(length(min = 1, max = 100))]
    #[cfg_attr(feature = "openapi", schema(example = "semantic_search"))]
    pub search_strategy: String,
}

/// Successful chat answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChatSuccessResponse {
    #[validate(length(min = 1, max = 10000))]
    pub response: String,
    /// Ranked list of relevant files, most relevant first
    #[validate(length(max = 20), nested)]
    pub file_suggestions: Vec<FileSuggestion>,
    #[validate(nested)]
    pub metadata: ChatMetadata,
}

/// Domain failure body shared by the ingest and chat endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    #[cfg_attr(feature = "openapi", schema(example = false))]
    pub success: bool,
    #[validate(length(min = 1, max = 1000))]
    #[cfg_attr(feature = "openapi", schema(example = "Repository URL format is invalid"))]
    pub error: String,
    #[validate(length(min = 1, max = 50))]
    #[cfg_attr(feature = "openapi", schema(example = "INVALID_URL"))]
    pub error_code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, error_code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_code: error_code.into(),
        }
    }
}

pub type IngestErrorResponse = ErrorResponse;
pub type ChatErrorResponse = ErrorResponse;

/// Body returned when a request fails schema validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ValidationErrorResponse {
    #[cfg_attr(feature = "openapi", schema(example = false))]
    pub success: bool,
    #[cfg_attr(feature = "openapi", schema(example = "Request validation failed"))]
    pub error: String,
    #[cfg_attr(feature = "openapi", schema(example = "VALIDATION_ERROR"))]
    pub error_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<crate::validation::FieldViolation>>,
}

pub type ValidatedIngestRequest = Validated<IngestRequest>;
pub type ValidatedChatRequest = Validated<ChatRequest>;
