//! Integration tests for locate-core
//!
//! Exercise the public surface the way the web layer and agents use it:
//! JSON in, validation, agent call, classification out.

use locate_core::{
    async_trait, codes, AppConfig, ChatError, ChatRequest, Classify, IngestError, IngestRequest,
    IngestResult, IngestSuccessResponse, IngestionAgent, ProcessingSummary, Validate, Validated,
    ValidatedIngestRequest,
};
use std::sync::Arc;

fn all_ingest_errors() -> Vec<IngestError> {
    let m = || "agent said no".to_string();
    vec![
        IngestError::InvalidUrl(m()),
        IngestError::InvalidToken(m()),
        IngestError::InsufficientPermissions(m()),
        IngestError::RepoNotFound(m()),
        IngestError::PrivateRepoNoToken(m()),
        IngestError::RepoTooLarge(m()),
        IngestError::ProcessingFailed(m()),
        IngestError::Storage(m()),
        IngestError::UnsupportedFormat(m()),
        IngestError::NotImplemented(m()),
        IngestError::Unexpected(m()),
    ]
}

fn all_chat_errors() -> Vec<ChatError> {
    let m = || "agent said no".to_string();
    vec![
        ChatError::RepoNotIndexed(m()),
        ChatError::QueryProcessingFailed(m()),
        ChatError::AgentUnavailable(m()),
        ChatError::NotImplemented(m()),
        ChatError::Unexpected(m()),
    ]
}

#[test]
fn test_requests_parse_from_wire_json() {
    let ingest: IngestRequest = serde_json::from_str(
        r#"{"repository_url":"https://github.com/facebook/react","github_token":"ghp_abcd"}"#,
    )
    .unwrap();
    assert!(Validated::new(ingest).is_ok());

    let chat: ChatRequest = serde_json::from_str(
        r#"{
            "message": "Where is auth handled?",
            "repository_id": "repo-a1b2c3d4",
            "conversation_history": [
                {"role": "user", "content": "hello"},
                {"role": "agent", "content": "hi"}
            ]
        }"#,
    )
    .unwrap();
    let chat = Validated::new(chat).unwrap();
    assert_eq!(chat.history_len(), 2);
}

#[test]
fn test_every_classification_yields_a_valid_error_body() {
    let ingest = all_ingest_errors();
    let chat = all_chat_errors();
    let classified = ingest
        .iter()
        .map(Classify::classify)
        .chain(chat.iter().map(Classify::classify));

    for c in classified {
        let body = c.to_response();
        assert!(!body.success);
        assert!(body.validate().is_ok(), "{c:?}");
        assert!(c.status >= 400);
    }
}

#[test]
fn test_only_fallback_rows_share_agent_error() {
    let fallbacks: Vec<_> = all_ingest_errors()
        .iter()
        .map(Classify::classify)
        .filter(|c| c.error_code == codes::AGENT_ERROR)
        .collect();
    assert_eq!(fallbacks.len(), 2);
    assert!(fallbacks.iter().all(|c| c.status == 500));
}

struct EchoAgent;

#[async_trait]
impl IngestionAgent for EchoAgent {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn ingest(&self, request: ValidatedIngestRequest) -> IngestResult<IngestSuccessResponse> {
        if request.github_token.is_some() {
            return Err(IngestError::InvalidToken("tokens are not accepted".into()));
        }
        Ok(IngestSuccessResponse::new(
            "repo-0123abcd",
            "indexed",
            ProcessingSummary {
                files_processed: 3,
                processing_time_seconds: 0.5,
            },
        ))
    }
}

#[tokio::test]
async fn test_agents_are_usable_as_shared_trait_objects() {
    let agent: Arc<dyn IngestionAgent> = Arc::new(EchoAgent);

    let request = Validated::new(IngestRequest::new("https://github.com/foo/bar")).unwrap();
    let response = agent.ingest(request).await.unwrap();
    assert!(response.validate().is_ok());

    let request =
        Validated::new(IngestRequest::new("https://github.com/foo/bar").with_token("ghp_abcd"))
            .unwrap();
    let err = agent.ingest(request).await.unwrap_err();
    assert_eq!(err.classify().error_code, codes::INVALID_TOKEN);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locate.toml");

    let mut config = AppConfig::default();
    config.server.port = 8123;
    config.server.cors_origins = vec!["http://localhost:3000".to_string()];
    config.save_to_file(&path).unwrap();

    let loaded = AppConfig::from_file(&path).unwrap();
    assert_eq!(loaded, config);
}
