//! Error classification
//!
//! Maps a domain failure to the `(status, error_code, message)` triple the HTTP
//! boundary puts on the wire. The mapping is an exhaustive match per taxonomy,
//! so adding a variant without classifying it does not compile.

use crate::error::{ChatError, IngestError};
use crate::types::ErrorResponse;
use crate::validation::truncate_chars;
use serde::Serialize;

/// Longest `error` text an error body may carry.
pub const MAX_ERROR_MESSAGE_CHARS: usize = 1000;

/// Machine-readable codes that appear in error bodies.
pub mod codes {
    pub const INVALID_URL: &str = "INVALID_URL";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const INSUFFICIENT_PERMISSIONS: &str = "INSUFFICIENT_PERMISSIONS";
    pub const REPO_NOT_FOUND: &str = "REPO_NOT_FOUND";
    pub const PRIVATE_REPO_NO_TOKEN: &str = "PRIVATE_REPO_NO_TOKEN";
    pub const REPO_TOO_LARGE: &str = "REPO_TOO_LARGE";
    pub const PROCESSING_FAILED: &str = "PROCESSING_FAILED";
    pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
    pub const REPO_NOT_INDEXED: &str = "REPO_NOT_INDEXED";
    pub const QUERY_PROCESSING_FAILED: &str = "QUERY_PROCESSING_FAILED";
    pub const AGENT_UNAVAILABLE: &str = "AGENT_UNAVAILABLE";
    pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";
    pub const AGENT_ERROR: &str = "AGENT_ERROR";
}

pub const INGEST_NOT_IMPLEMENTED_MESSAGE: &str = "Ingestion agent not yet implemented";
pub const INGEST_UNEXPECTED_MESSAGE: &str =
    "An unexpected error occurred during repository processing.";
pub const CHAT_NOT_IMPLEMENTED_MESSAGE: &str = "Chat agent not yet implemented";
pub const CHAT_UNEXPECTED_MESSAGE: &str =
    "An unexpected error occurred while processing the chat request.";

/// Wire-level outcome of a domain failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub status: u16,
    pub error_code: &'static str,
    pub message: String,
}

impl Classification {
    fn new(status: u16, error_code: &'static str, message: &str) -> Self {
        let message = if message.trim().is_empty() {
            // Error bodies require a non-empty message.
            error_code.to_string()
        } else {
            truncate_chars(message, MAX_ERROR_MESSAGE_CHARS)
        };
        Self {
            status,
            error_code,
            message,
        }
    }

    /// Fallback for failures outside every named row
    pub fn agent_error(message: &str) -> Self {
        Self::new(500, codes::AGENT_ERROR, message)
    }

    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.message.clone(), self.error_code)
    }
}

/// Total mapping from a failure to its wire classification.
pub trait Classify {
    fn classify(&self) -> Classification;
}

impl Classify for IngestError {
    fn classify(&self) -> Classification {
        match self {
            Self::InvalidUrl(m) => Classification::new(400, codes::INVALID_URL, m),
            Self::InvalidToken(m) => Classification::new(401, codes::INVALID_TOKEN, m),
            Self::InsufficientPermissions(m) => {
                Classification::new(403, codes::INSUFFICIENT_PERMISSIONS, m)
            }
            Self::RepoNotFound(m) => Classification::new(404, codes::REPO_NOT_FOUND, m),
            Self::PrivateRepoNoToken(m) => {
                Classification::new(401, codes::PRIVATE_REPO_NO_TOKEN, m)
            }
            Self::RepoTooLarge(m) => Classification::new(422, codes::REPO_TOO_LARGE, m),
            Self::ProcessingFailed(m) => Classification::new(422, codes::PROCESSING_FAILED, m),
            Self::Storage(m) => Classification::new(500, codes::STORAGE_ERROR, m),
            Self::NotImplemented(_) => {
                Classification::new(501, codes::NOT_IMPLEMENTED, INGEST_NOT_IMPLEMENTED_MESSAGE)
            }
            // No dedicated row; the agent's text is not exposed.
            Self::UnsupportedFormat(_) | Self::Unexpected(_) => {
                Classification::agent_error(INGEST_UNEXPECTED_MESSAGE)
            }
        }
    }
}

impl Classify for ChatError {
    fn classify(&self) -> Classification {
        match self {
            Self::RepoNotIndexed(m) => Classification::new(404, codes::REPO_NOT_INDEXED, m),
            Self::QueryProcessingFailed(m) => {
                Classification::new(422, codes::QUERY_PROCESSING_FAILED, m)
            }
            Self::AgentUnavailable(m) => Classification::new(500, codes::AGENT_UNAVAILABLE, m),
            Self::NotImplemented(_) => {
                Classification::new(501, codes::NOT_IMPLEMENTED, CHAT_NOT_IMPLEMENTED_MESSAGE)
            }
            Self::Unexpected(_) => Classification::agent_error(CHAT_UNEXPECTED_MESSAGE),
        }
    }
}
