//! Simulated agents
//!
//! Every domain error row of the API can be reached by putting a marker in the
//! request. Ingestion markers are matched against `repository_url` (and the
//! token where noted), chat markers against `message`. Checks run in the order
//! listed below; the first hit wins.
//!
//! | marker | raised |
//! |---|---|
//! | `invalid-url` | `IngestError::InvalidUrl` |
//! | `not-found` | `IngestError::RepoNotFound` |
//! | `private` without a token | `IngestError::PrivateRepoNoToken` |
//! | token contains `invalid-token` | `IngestError::InvalidToken` |
//! | token contains `insufficient-permissions` | `IngestError::InsufficientPermissions` |
//! | `repo-too-large` | `IngestError::RepoTooLarge` |
//! | `processing-failed` | `IngestError::ProcessingFailed` |
//! | `storage-error` | `IngestError::Storage` |
//! | `unsupported-format` | `IngestError::UnsupportedFormat` |
//! | `fail-processing` | `IngestError::Unexpected` |
//! | repository id [`UNINDEXED_REPOSITORY_ID`] | `ChatError::RepoNotIndexed` |
//! | `unprocessable` | `ChatError::QueryProcessingFailed` |
//! | `unavailable` | `ChatError::AgentUnavailable` |

use locate_core::{
    async_trait, ChatAgent, ChatError, ChatMetadata, ChatResult, ChatSuccessResponse,
    FileSuggestion, IngestError, IngestResult, IngestSuccessResponse, IngestionAgent,
    ProcessingSummary, ValidatedChatRequest, ValidatedIngestRequest,
};
use tracing::debug;
use uuid::Uuid;

/// Well-formed id the simulated chat agent treats as never ingested.
pub const UNINDEXED_REPOSITORY_ID: &str = "repo-00000000";

/// Canned agent for exercising the API without a real backend
#[derive(Debug, Default, Clone)]
pub struct SimulatedAgent;

impl SimulatedAgent {
    pub fn new() -> Self {
        Self
    }

    fn check_ingest(request: &ValidatedIngestRequest) -> IngestResult<()> {
        let url = request.repository_url.as_str();
        let token = request.github_token.as_deref();

        if url.contains("invalid-url") {
            return Err(IngestError::InvalidUrl(
                "Repository URL format is invalid".to_string(),
            ));
        }
        if url.contains("not-found") {
            return Err(IngestError::RepoNotFound(
                "Repository does not exist or is not accessible".to_string(),
            ));
        }
        if url.contains("private") && token.is_none() {
            return Err(IngestError::PrivateRepoNoToken(
                "Private repository requires GitHub token".to_string(),
            ));
        }
        if let Some(token) = token {
            if token.contains("invalid-token") {
                return Err(IngestError::InvalidToken(
                    "GitHub token is invalid or expired".to_string(),
                ));
            }
            if token.contains("insufficient-permissions") {
                return Err(IngestError::InsufficientPermissions(
                    "Token lacks required repository permissions".to_string(),
                ));
            }
        }
        if url.contains("repo-too-large") {
            return Err(IngestError::RepoTooLarge(
                "Repository exceeds processing size limits".to_string(),
            ));
        }
        if url.contains("processing-failed") {
            return Err(IngestError::ProcessingFailed(
                "Repository processing failed".to_string(),
            ));
        }
        if url.contains("storage-error") {
            return Err(IngestError::Storage(
                "Failed to store repository data".to_string(),
            ));
        }
        if url.contains("unsupported-format") {
            return Err(IngestError::UnsupportedFormat(
                "Repository format is not supported".to_string(),
            ));
        }
        if url.contains("fail-processing") {
            return Err(IngestError::Unexpected(
                "Simulated repository processing failure.".to_string(),
            ));
        }
        Ok(())
    }

    fn check_chat(request: &ValidatedChatRequest) -> ChatResult<()> {
        if request.repository_id == UNINDEXED_REPOSITORY_ID {
            return Err(ChatError::RepoNotIndexed(
                "Repository ID not found in system".to_string(),
            ));
        }
        if request.message.contains("unprocessable") {
            return Err(ChatError::QueryProcessingFailed(
                "Query cannot be processed by agent system".to_string(),
            ));
        }
        if request.message.contains("unavailable") {
            return Err(ChatError::AgentUnavailable(
                "Chat agent system is unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mint a fresh `repo-xxxxxxxx` identifier
pub fn mint_repository_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("repo-{}", &hex[..8])
}

#[async_trait]
impl IngestionAgent for SimulatedAgent {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn ingest(&self, request: ValidatedIngestRequest) -> IngestResult<IngestSuccessResponse> {
        debug!(repository_url = %request.repository_url, "Simulating ingestion");
        Self::check_ingest(&request)?;

        Ok(IngestSuccessResponse::new(
            mint_repository_id(),
            "Repository successfully processed and indexed",
            ProcessingSummary {
                files_processed: 247,
                processing_time_seconds: 45.2,
            },
        ))
    }
}

#[async_trait]
impl ChatAgent for SimulatedAgent {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn chat(&self, request: ValidatedChatRequest) -> ChatResult<ChatSuccessResponse> {
        debug!(
            repository_id = %request.repository_id,
            history = request.history_len(),
            "Simulating chat"
        );
        Self::check_chat(&request)?;

        Ok(ChatSuccessResponse {
            response: "User authentication is handled primarily in the authentication module. \
                       I found several relevant files that implement different aspects of the \
                       authentication system."
                .to_string(),
            file_suggestions: vec![
                FileSuggestion {
                    file_name: "auth.js".to_string(),
                    file_path: "/src/utils/auth.js".to_string(),
                    github_url: "https://github.com/facebook/react/blob/main/src/utils/auth.js"
                        .to_string(),
                    description: "Core authentication utility module that handles user login \
                                  validation, token generation, and session management."
                        .to_string(),
                    relevance_score: 0.95,
                },
                FileSuggestion {
                    file_name: "LoginComponent.jsx".to_string(),
                    file_path: "/src/components/LoginComponent.jsx".to_string(),
                    github_url:
                        "https://github.com/facebook/react/blob/main/src/components/LoginComponent.jsx"
                            .to_string(),
                    description: "React component for user login interface. Handles form \
                                  validation, user input processing, and authentication API calls."
                        .to_string(),
                    relevance_score: 0.87,
                },
            ],
            metadata: ChatMetadata {
                processing_time_ms: 1247,
                search_strategy: "semantic_search".to_string(),
            },
        })
    }
}
