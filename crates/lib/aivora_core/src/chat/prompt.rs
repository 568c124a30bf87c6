//! Prompt construction for the support assistant.

use crate::models::chat::ChatMessage;

/// Fixed preamble describing the assistant's purpose and tone.
pub const SYSTEM_PROMPT: &str = concat!(
    "You are Aivora's in-app AI assistant.\n\n",
    "Your job is to help users understand and use the Aivora platform: ",
    "goal creation, daily progress tracking, insights, reports, and general productivity guidance. ",
    "Be concise, friendly, and actionable. When relevant, reference features like goals, progress, insights, and reports. ",
    "If the user asks about something unrelated to Aivora or productivity, briefly answer and gently steer back to the app."
);

/// Name used when the requesting user has no display name.
pub const DEFAULT_USER_NAME: &str = "Aivora user";

/// Render history as `User: ...` / `Assistant: ...` lines.
pub fn render_history(history: &[ChatMessage]) -> String {
    history
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the full prompt sent to the model.
///
/// Segments are newline-joined and empty segments are dropped, so the
/// conversation section disappears entirely when there is no history.
pub fn build_support_prompt(
    user_name: Option<&str>,
    history: &[ChatMessage],
    message: &str,
) -> String {
    let name = user_name
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_USER_NAME);

    let history_text = render_history(history);
    let conversation = if history_text.is_empty() {
        String::new()
    } else {
        format!("\nConversation so far:\n{history_text}")
    };

    [
        SYSTEM_PROMPT.to_string(),
        format!("Current user: {name}."),
        conversation,
        "\nUser question:".to_string(),
        message.to_string(),
    ]
    .into_iter()
    .filter(|segment| !segment.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}
