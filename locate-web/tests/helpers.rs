//! Integration test helpers
//!
//! Each test gets its own server on an OS-assigned port.

#![allow(dead_code)]

use async_trait::async_trait;
use locate_agents::{AgentSet, PendingAgent, SimulatedAgent};
use locate_core::{
    ChatAgent, ChatMetadata, ChatResult, ChatSuccessResponse, FileSuggestion, IngestResult,
    IngestSuccessResponse, IngestionAgent, ProcessingSummary, ServerConfig, ValidatedChatRequest,
    ValidatedIngestRequest,
};
use locate_web::{create_app, AppState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use tokio::net::TcpListener;

// Ensure tracing is only initialized once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get_health(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_ingest<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(format!("{}/api/ingest", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_chat<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(format!("{}/api/chat", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// POST a raw body with an explicit content type
    pub async fn post_raw(&self, path: &str, content_type: &str, body: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}{}", &self.address, path))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

/// Start a server backed by `agents`
pub async fn spawn_app_with(agents: AgentSet, config: ServerConfig) -> TestApp {
    LazyLock::force(&TRACING);

    let app = create_app(AppState::new(agents), &config).expect("Failed to build app");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        api_client: reqwest::Client::new(),
    }
}

pub async fn spawn_simulated_app() -> TestApp {
    let agent = Arc::new(SimulatedAgent::new());
    spawn_app_with(AgentSet::new(agent.clone(), agent), ServerConfig::default()).await
}

pub async fn spawn_pending_app() -> TestApp {
    let agent = Arc::new(PendingAgent::new());
    spawn_app_with(AgentSet::new(agent.clone(), agent), ServerConfig::default()).await
}

/// Delegates to the simulated agent and counts how often it was reached
#[derive(Default)]
pub struct RecordingAgent {
    inner: SimulatedAgent,
    calls: AtomicUsize,
}

impl RecordingAgent {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IngestionAgent for RecordingAgent {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn ingest(&self, request: ValidatedIngestRequest) -> IngestResult<IngestSuccessResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.ingest(request).await
    }
}

#[async_trait]
impl ChatAgent for RecordingAgent {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn chat(&self, request: ValidatedChatRequest) -> ChatResult<ChatSuccessResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.chat(request).await
    }
}

pub async fn spawn_recording_app() -> (TestApp, Arc<RecordingAgent>) {
    let agent = Arc::new(RecordingAgent::default());
    let app = spawn_app_with(
        AgentSet::new(agent.clone(), agent.clone()),
        ServerConfig::default(),
    )
    .await;
    (app, agent)
}

/// Returns success payloads that break their own declared constraints
/// Answers every request with a payload that breaks the response constraints.
#[derive(Debug, Clone)]
pub struct MalformedAgent {
    pub repository_id: String,
    pub success: bool,
    pub processing_time_seconds: f64,
    pub relevance_score: f64,
}

impl Default for MalformedAgent {
    fn default() -> Self {
        Self {
            repository_id: "not-a-repo-id".to_string(),
            success: true,
            processing_time_seconds: 1.0,
            relevance_score: 1.5,
        }
    }
}

impl MalformedAgent {
    /// Well-formed apart from a processing time that JSON cannot represent.
    pub fn with_processing_time(seconds: f64) -> Self {
        Self {
            repository_id: "repo-0a1b2c3d".to_string(),
            processing_time_seconds: seconds,
            ..Self::default()
        }
    }

    /// Well-formed apart from the success flag.
    pub fn reporting_failure() -> Self {
        Self {
            repository_id: "repo-0a1b2c3d".to_string(),
            success: false,
            ..Self::default()
        }
    }

    pub fn with_relevance_score(score: f64) -> Self {
        Self {
            relevance_score: score,
            ..Self::default()
        }
    }
}

#[async_trait]
impl IngestionAgent for MalformedAgent {
    fn name(&self) -> &'static str {
        "malformed"
    }

    async fn ingest(&self, _request: ValidatedIngestRequest) -> IngestResult<IngestSuccessResponse> {
        let mut response = IngestSuccessResponse::new(
            self.repository_id.clone(),
            "done",
            ProcessingSummary {
                files_processed: 1,
                processing_time_seconds: self.processing_time_seconds,
            },
        );
        response.success = self.success;
        Ok(response)
    }
}

#[async_trait]
impl ChatAgent for MalformedAgent {
    fn name(&self) -> &'static str {
        "malformed"
    }

    async fn chat(&self, _request: ValidatedChatRequest) -> ChatResult<ChatSuccessResponse> {
        Ok(ChatSuccessResponse {
            response: "answer".to_string(),
            file_suggestions: vec![FileSuggestion {
                file_name: "main.rs".to_string(),
                file_path: "/src/main.rs".to_string(),
                github_url: "https://github.com/foo/bar/blob/main/src/main.rs".to_string(),
                description: "entry point".to_string(),
                relevance_score: self.relevance_score,
            }],
            metadata: ChatMetadata {
                processing_time_ms: 1,
                search_strategy: "semantic_search".to_string(),
            },
        })
    }
}

pub async fn spawn_malformed_app(agent: MalformedAgent) -> TestApp {
    let agent = Arc::new(agent);
    spawn_app_with(AgentSet::new(agent.clone(), agent), ServerConfig::default()).await
}
