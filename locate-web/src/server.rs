//! Locate Web Server
//!
//! Main web server implementation using Axum.

use crate::{create_app, AppState, WebError, WebResult};
use axum::serve;
use locate_agents::AgentSet;
use locate_core::{AgentMode, AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tracing::{error, info};

/// Main Agents Locate web server
pub struct LocateServer {
    config: ServerConfig,
    state: AppState,
}

impl LocateServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Build a server with agents selected by `config.agents.mode`
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.server.clone(), AppState::for_mode(config.agents.mode))
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> WebResult<()> {
        let app = create_app(self.state.clone(), &self.config)?;
        let local = listener.local_addr()?;

        info!(
            address = %local,
            ingestion = self.state.agents.ingestion.name(),
            chat = self.state.agents.chat.name(),
            "Server listening"
        );

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!(error = %e, "Server error");
            return Err(WebError::Server(e));
        }

        info!("Server shut down");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler the server runs until the process is killed.
            error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    }
}

/// Builder for LocateServer
pub struct LocateServerBuilder {
    config: ServerConfig,
    mode: AgentMode,
    agents: Option<AgentSet>,
}

impl LocateServerBuilder {
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
            mode: AgentMode::default(),
            agents: None,
        }
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.config.body_limit_bytes = bytes;
        self
    }

    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.config.cors_origins = origins;
        self
    }

    /// Select the built-in agents; ignored when [`Self::agents`] is set
    pub fn agent_mode(mut self, mode: AgentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use custom agent implementations
    pub fn agents(mut self, agents: AgentSet) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<LocateServer> {
        let config = AppConfig {
            server: self.config,
            ..AppConfig::default()
        };
        config.validate()?;

        let agents = self.agents.unwrap_or_else(|| AgentSet::for_mode(self.mode));
        Ok(LocateServer::new(config.server, AppState::new(agents)))
    }
}

impl Default for LocateServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
