//! Placeholder for the real agent integration

use locate_core::{
    async_trait, ChatAgent, ChatError, ChatResult, ChatSuccessResponse, IngestError,
    IngestResult, IngestSuccessResponse, IngestionAgent, ValidatedChatRequest,
    ValidatedIngestRequest,
};
use tracing::debug;

/// Stands in for the ingestion and chat agents until they are connected.
#[derive(Debug, Default, Clone)]
pub struct PendingAgent;

impl PendingAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IngestionAgent for PendingAgent {
    fn name(&self) -> &'static str {
        "pending"
    }

    async fn ingest(&self, request: ValidatedIngestRequest) -> IngestResult<IngestSuccessResponse> {
        debug!(repository_url = %request.repository_url, "No ingestion agent connected");
        Err(IngestError::NotImplemented(
            "Ingestion agent integration pending".to_string(),
        ))
    }
}

#[async_trait]
impl ChatAgent for PendingAgent {
    fn name(&self) -> &'static str {
        "pending"
    }

    async fn chat(&self, request: ValidatedChatRequest) -> ChatResult<ChatSuccessResponse> {
        debug!(repository_id = %request.repository_id, "No chat agent connected");
        Err(ChatError::NotImplemented(
            "Chat agent integration pending".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use locate_core::{ChatRequest, IngestRequest, Validated};

    #[tokio::test]
    async fn test_pending_ingest_is_not_implemented() {
        let request =
            Validated::new(IngestRequest::new("https://github.com/facebook/react")).unwrap();
        let err = PendingAgent::new().ingest(request).await.unwrap_err();
        assert!(matches!(err, IngestError::NotImplemented(_)));
    }

    #[tokio::test]
    async fn test_pending_chat_is_not_implemented() {
        let request = Validated::new(ChatRequest::new("hello", "repo-a1b2c3d4")).unwrap();
        let err = PendingAgent::new().chat(request).await.unwrap_err();
        assert!(matches!(err, ChatError::NotImplemented(_)));
    }
}
