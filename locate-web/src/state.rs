//! Application state shared by every handler

use locate_agents::AgentSet;
use locate_core::AgentMode;

/// Agents are built once at start-up and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct AppState {
    pub agents: AgentSet,
}

impl AppState {
    pub fn new(agents: AgentSet) -> Self {
        Self { agents }
    }

    pub fn for_mode(mode: AgentMode) -> Self {
        Self::new(AgentSet::for_mode(mode))
    }
}
