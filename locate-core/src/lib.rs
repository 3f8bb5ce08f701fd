//! Locate Core - request contract and error taxonomy
//!
//! Models with their validation rules, the domain error kinds agents may raise,
//! the classifier that turns those into wire outcomes, and the agent traits.

pub mod classify;
pub mod config;
pub mod error;
pub mod logging;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::classify::{codes, Classification, Classify};
pub use self::config::{AgentMode, AgentsConfig, AppConfig, ConfigError, ConfigResult, ServerConfig};
pub use self::error::*;
pub use self::logging::*;
pub use self::traits::*;
pub use self::types::*;
pub use self::validation::{
    is_repository_id, FieldViolation, RequestValidationError, Validated,
};

// Re-export commonly used external types
pub use async_trait::async_trait;
pub use validator::Validate;
