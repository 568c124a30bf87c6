//! Support chat handler.
//!
//! `POST /api/chat/support` validates the body, builds the assistant prompt
//! from the caller's name and history, makes a single model call and returns
//! `{ "reply": ... }`.

use aivora_core::chat::{SUPPORT_TEMPERATURE, SupportRequest, build_support_prompt, normalize_reply};
use aivora_core::models::chat::ChatResponse;
use axum::body::Bytes;
use axum::extract::State;
use axum::{Extension, Json};
use serde_json::Value;
use tracing::{debug, error};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MODEL_NOT_CONFIGURED: &str = "Gemini API key is not configured on the server";

/// `POST /api/chat/support` — ask the in-app assistant a question.
///
/// The body is read as raw JSON so that a missing, malformed or non-string
/// `message` all produce the same 400 response.
pub async fn chat_with_support(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    let request = SupportRequest::from_json(&body)
        .ok_or_else(|| AppError::Validation(MESSAGE_REQUIRED.into()))?;

    if !state.config.model.is_configured() {
        return Err(AppError::Misconfigured(MODEL_NOT_CONFIGURED.into()));
    }

    let model = state.models.create_fast_model(SUPPORT_TEMPERATURE);

    let prompt = build_support_prompt(user.0.display_name(), &request.history, &request.message);
    debug!(
        user_id = %user.0.sub,
        history_len = request.history.len(),
        prompt_len = prompt.len(),
        "invoking support model"
    );

    let result = model.invoke(&prompt).await.map_err(|e| {
        error!(user_id = %user.0.sub, "support model call failed: {e}");
        AppError::from(e)
    })?;

    Ok(Json(ChatResponse {
        reply: normalize_reply(&result),
    }))
}
