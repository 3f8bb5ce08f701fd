//! HTTP request handlers for the Agents Locate API

pub mod chat;
pub mod health;
pub mod ingest;

pub use chat::*;
pub use health::*;
pub use ingest::*;
