//! Language-model client abstraction.
//!
//! The chat handler depends only on [`ModelFactory`] and [`ChatModel`]; the
//! Gemini implementation in [`gemini`] is wired in by the server binary and
//! test doubles are wired in by tests.

pub mod config;
pub mod gemini;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while calling a model provider.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model not configured: {0}")]
    NotConfigured(String),

    #[error("Provider request failed: {0}")]
    Request(String),

    #[error("Provider returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Provider response parse error: {0}")]
    Parse(String),
}

/// A chat-capable model.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a prompt and await a single, complete result.
    ///
    /// The result is provider-shaped JSON; implementations put generated
    /// text under `content` (or `text`) when they can find it.
    async fn invoke(&self, prompt: &str) -> Result<Value, ModelError>;
}

/// Produces configured model clients.
pub trait ModelFactory: Send + Sync {
    /// The low-latency model used for in-app assistance.
    fn create_fast_model(&self, temperature: f32) -> Box<dyn ChatModel>;
}
