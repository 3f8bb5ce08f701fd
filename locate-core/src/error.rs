//! Domain error taxonomy
//!
//! One closed enum per endpoint family. These are what an agent collaborator is
//! allowed to raise; they carry a human message and know nothing about HTTP.

use thiserror::Error;
use tracing::{error, warn};

pub type IngestResult<T> = Result<T, IngestError>;
pub type ChatResult<T> = Result<T, ChatError>;

/// Failures the ingestion agent may report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("{0}")]
    InvalidUrl(String),

    #[error("{0}")]
    InvalidToken(String),

    #[error("{0}")]
    InsufficientPermissions(String),

    #[error("{0}")]
    RepoNotFound(String),

    #[error("{0}")]
    PrivateRepoNoToken(String),

    #[error("{0}")]
    RepoTooLarge(String),

    #[error("{0}")]
    ProcessingFailed(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    /// The ingestion agent is not wired in yet
    #[error("{0}")]
    NotImplemented(String),

    /// Anything the agent could not name more precisely
    #[error("{0}")]
    Unexpected(String),
}

impl IngestError {
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        Self::Unexpected(err.to_string())
    }

    /// Stable name of the variant, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::InvalidToken(_) => "invalid_token",
            Self::InsufficientPermissions(_) => "insufficient_permissions",
            Self::RepoNotFound(_) => "repo_not_found",
            Self::PrivateRepoNoToken(_) => "private_repo_no_token",
            Self::RepoTooLarge(_) => "repo_too_large",
            Self::ProcessingFailed(_) => "processing_failed",
            Self::Storage(_) => "storage",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::NotImplemented(_) => "not_implemented",
            Self::Unexpected(_) => "unexpected",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidUrl(m)
            | Self::InvalidToken(m)
            | Self::InsufficientPermissions(m)
            | Self::RepoNotFound(m)
            | Self::PrivateRepoNoToken(m)
            | Self::RepoTooLarge(m)
            | Self::ProcessingFailed(m)
            | Self::Storage(m)
            | Self::UnsupportedFormat(m)
            | Self::NotImplemented(m)
            | Self::Unexpected(m) => m,
        }
    }

    /// Caller-side faults, as opposed to failures inside the agent
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_)
                | Self::InvalidToken(_)
                | Self::InsufficientPermissions(_)
                | Self::RepoNotFound(_)
                | Self::PrivateRepoNoToken(_)
                | Self::RepoTooLarge(_)
        )
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        if self.is_client_error() {
            warn!(kind = self.kind(), error = %self, "Ingestion rejected by agent");
        } else {
            error!(kind = self.kind(), error = %self, "Ingestion failed");
        }
    }
}

/// Failures the chat agent may report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("{0}")]
    RepoNotIndexed(String),

    #[error("{0}")]
    QueryProcessingFailed(String),

    #[error("{0}")]
    AgentUnavailable(String),

    /// The chat agent is not wired in yet
    #[error("{0}")]
    NotImplemented(String),

    #[error("{0}")]
    Unexpected(String),
}

impl ChatError {
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        Self::Unexpected(err.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::RepoNotIndexed(_) => "repo_not_indexed",
            Self::QueryProcessingFailed(_) => "query_processing_failed",
            Self::AgentUnavailable(_) => "agent_unavailable",
            Self::NotImplemented(_) => "not_implemented",
            Self::Unexpected(_) => "unexpected",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::RepoNotIndexed(m)
            | Self::QueryProcessingFailed(m)
            | Self::AgentUnavailable(m)
            | Self::NotImplemented(m)
            | Self::Unexpected(m) => m,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::RepoNotIndexed(_) | Self::QueryProcessingFailed(_))
    }

    pub fn log(&self) {
        if self.is_client_error() {
            warn!(kind = self.kind(), error = %self, "Chat query rejected by agent");
        } else {
            error!(kind = self.kind(), error = %self, "Chat query failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_carried_verbatim() {
        let err = IngestError::RepoNotFound("Repository does not exist".to_string());
        assert_eq!(err.message(), "Repository does not exist");
        assert_eq!(err.to_string(), "Repository does not exist");

        let err = ChatError::AgentUnavailable("down".to_string());
        assert_eq!(err.message(), "down");
    }

    #[test]
    fn test_client_errors() {
        assert!(IngestError::InvalidUrl("x".into()).is_client_error());
        assert!(!IngestError::Storage("x".into()).is_client_error());
        assert!(!IngestError::NotImplemented("x".into()).is_client_error());
        assert!(ChatError::RepoNotIndexed("x".into()).is_client_error());
        assert!(!ChatError::AgentUnavailable("x".into()).is_client_error());
    }

    #[test]
    fn test_unexpected_from_display() {
        let io = std::io::Error::other("disk on fire");
        assert_eq!(
            IngestError::unexpected(&io),
            IngestError::Unexpected("disk on fire".to_string())
        );
        assert_eq!(ChatError::unexpected(io).kind(), "unexpected");
    }
}
