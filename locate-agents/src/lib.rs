//! Locate Agents - collaborators behind the HTTP boundary
//!
//! Two implementations of the agent traits from `locate-core`:
//!
//! - [`PendingAgent`]: the integration point for the real ingestion and chat
//!   agents. Until those exist it reports `NotImplemented`.
//! - [`SimulatedAgent`]: canned answers, with failures triggered by marker
//!   substrings in the request, for exercising every error path of the API.
//!
//! [`AgentSet::for_mode`] picks one at start-up from configuration.

pub mod pending;
pub mod simulated;

pub use pending::PendingAgent;
pub use simulated::SimulatedAgent;

use locate_core::{AgentMode, ChatAgent, IngestionAgent};
use std::sync::Arc;
use tracing::info;

/// The pair of collaborators the endpoints are wired to
#[derive(Clone)]
pub struct AgentSet {
    pub ingestion: Arc<dyn IngestionAgent>,
    pub chat: Arc<dyn ChatAgent>,
}

impl AgentSet {
    pub fn new(ingestion: Arc<dyn IngestionAgent>, chat: Arc<dyn ChatAgent>) -> Self {
        Self { ingestion, chat }
    }

    /// Build the agents for a configured mode
    pub fn for_mode(mode: AgentMode) -> Self {
        let agents = match mode {
            AgentMode::Pending => {
                let agent = Arc::new(PendingAgent::new());
                Self::new(agent.clone(), agent)
            }
            AgentMode::Simulated => {
                let agent = Arc::new(SimulatedAgent::new());
                Self::new(agent.clone(), agent)
            }
        };
        info!(
            mode = %mode,
            ingestion = agents.ingestion.name(),
            chat = agents.chat.name(),
            "Agents configured"
        );
        agents
    }
}

impl std::fmt::Debug for AgentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSet")
            .field("ingestion", &self.ingestion.name())
            .field("chat", &self.chat.name())
            .finish()
    }
}
