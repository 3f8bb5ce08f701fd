//! Collaborator boundary
//!
//! The HTTP layer only ever talks to agents through these traits. Inputs are
//! `Validated<_>`, so an implementation never sees a request that failed its
//! schema checks.

use crate::error::{ChatResult, IngestResult};
use crate::types::{
    ChatSuccessResponse, IngestSuccessResponse, ValidatedChatRequest, ValidatedIngestRequest,
};
use async_trait::async_trait;

/// Clones, processes and indexes a repository
#[async_trait]
pub trait IngestionAgent: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    async fn ingest(&self, request: ValidatedIngestRequest) -> IngestResult<IngestSuccessResponse>;
}

/// Answers natural language questions about an ingested repository
#[async_trait]
pub trait ChatAgent: Send + Sync {
    fn name(&self) -> &'static str;

    async fn chat(&self, request: ValidatedChatRequest) -> ChatResult<ChatSuccessResponse>;
}
