//! # aivora_api_client
//!
//! Client for `POST /api/chat/support`.

use aivora_core::models::chat::{ChatMessage, ChatRequestBody, ChatResponse, ErrorResponse};
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Path of the support chat endpoint, relative to the API base URL.
const SUPPORT_CHAT_PATH: &str = "api/chat/support";

/// Errors returned by the API client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Response decode error: {0}")]
    Decode(String),
}

/// The support chat operation as seen by a front end.
#[async_trait]
pub trait SupportChatApi: Send + Sync {
    /// Send `message` with the conversation so far and return the assistant's reply.
    async fn send(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChatResponse, ClientError>;
}

/// reqwest-backed [`SupportChatApi`].
#[derive(Debug, Clone)]
pub struct SupportChatClient {
    client: Client,
    endpoint: Url,
    token: Option<String>,
}

impl SupportChatClient {
    /// Client for the API served at `base_url` (e.g. `http://127.0.0.1:3100`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let endpoint = base
            .join(SUPPORT_CHAT_PATH)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            client: Client::new(),
            endpoint,
            token: None,
        })
    }

    /// Attach a bearer access token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Fully resolved endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SupportChatApi for SupportChatClient {
    async fn send(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<ChatResponse, ClientError> {
        debug!(endpoint = %self.endpoint, history_len = history.len(), "sending support chat");

        let mut request = self.client.post(self.endpoint.clone()).json(&ChatRequestBody {
            message: message.to_string(),
            history: Some(history.to_vec()),
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorResponse>(&bytes)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }
}
