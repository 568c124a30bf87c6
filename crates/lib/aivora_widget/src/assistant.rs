//! The chat assistant panel state.

use std::time::Duration;

use aivora_api_client::{ClientError, SupportChatApi};
use aivora_core::models::chat::{ChatMessage, ChatResponse};
use tracing::{debug, error};

use crate::keys::{KeyAction, KeyEvent};
use crate::{
    EMPTY_REPLY_FALLBACK, GREETING, LOGIN_REQUIRED, PLACEHOLDER_SIGNED_IN, PLACEHOLDER_SIGNED_OUT,
    SCROLL_SETTLE_DELAY, SEND_FAILED,
};

/// Ask the host to scroll the message list to its last entry after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub delay: Duration,
}

/// A request accepted by [`ChatAssistant::begin_send`], waiting to go out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    message: String,
    history: Vec<ChatMessage>,
}

impl PendingSend {
    /// The trimmed user message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Every message in the conversation, ending with the new user message.
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

/// Floating chat panel state.
///
/// At most one request is in flight: while [`is_sending`](Self::is_sending)
/// is set, further sends are dropped rather than queued.
#[derive(Debug, Clone)]
pub struct ChatAssistant {
    is_open: bool,
    messages: Vec<ChatMessage>,
    input: String,
    is_sending: bool,
    error: Option<String>,
    is_authenticated: bool,
    scroll_requests: Vec<ScrollRequest>,
}

impl ChatAssistant {
    /// A closed panel holding only the greeting.
    pub fn new(is_authenticated: bool) -> Self {
        Self {
            is_open: false,
            messages: vec![ChatMessage::assistant(GREETING)],
            input: String::new(),
            is_sending: false,
            error: None,
            is_authenticated,
            scroll_requests: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn set_authenticated(&mut self, is_authenticated: bool) {
        self.is_authenticated = is_authenticated;
    }

    /// Replace the draft.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn toggle_open(&mut self) {
        self.is_open = !self.is_open;
        if self.is_open {
            self.request_scroll(SCROLL_SETTLE_DELAY);
        }
    }

    /// Pending scroll requests, oldest first.
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.scroll_requests)
    }

    /// Input placeholder text.
    pub fn placeholder(&self) -> &'static str {
        if self.is_authenticated {
            PLACEHOLDER_SIGNED_IN
        } else {
            PLACEHOLDER_SIGNED_OUT
        }
    }

    pub fn input_disabled(&self) -> bool {
        !self.is_authenticated || self.is_sending
    }

    /// Whether the send button is enabled.
    pub fn can_send(&self) -> bool {
        !self.input.trim().is_empty() && !self.is_sending && self.is_authenticated
    }

    /// Whether to show the "Thinking..." bubble.
    pub fn show_thinking(&self) -> bool {
        self.is_sending
    }

    /// Start a send.
    ///
    /// Returns `None` without touching state when the draft is blank or a
    /// request is already in flight. An anonymous user gets an error and no
    /// request. Otherwise the user message is appended immediately, the
    /// draft and error are cleared, and the request to make is returned.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        let message = self.input.trim();
        if message.is_empty() || self.is_sending {
            return None;
        }

        if !self.is_authenticated {
            self.error = Some(LOGIN_REQUIRED.to_string());
            return None;
        }

        let message = message.to_string();
        self.push_message(ChatMessage::user(message.clone()));
        self.input.clear();
        self.error = None;
        self.is_sending = true;

        Some(PendingSend {
            message,
            history: self.messages.clone(),
        })
    }

    /// Apply the outcome of a request started by [`begin_send`](Self::begin_send).
    ///
    /// The optimistic user message is kept either way.
    pub fn finish_send(&mut self, result: Result<ChatResponse, ClientError>) {
        match result {
            Ok(ChatResponse { reply }) => {
                let content = if reply.is_empty() {
                    EMPTY_REPLY_FALLBACK.to_string()
                } else {
                    reply
                };
                self.push_message(ChatMessage::assistant(content));
            }
            Err(e) => {
                error!("chat error: {e}");
                self.error = Some(SEND_FAILED.to_string());
            }
        }
        self.is_sending = false;
        self.request_scroll(Duration::ZERO);
    }

    /// Send the draft through `api` and wait for the reply.
    pub async fn send<A>(&mut self, api: &A)
    where
        A: SupportChatApi + ?Sized,
    {
        let Some(pending) = self.begin_send() else {
            return;
        };
        debug!(history_len = pending.history.len(), "sending chat message");
        let result = api.send(&pending.message, &pending.history).await;
        self.finish_send(result);
    }

    /// Handle a key press in the input; plain Enter sends.
    pub async fn handle_key_down<A>(&mut self, api: &A, event: KeyEvent) -> KeyAction
    where
        A: SupportChatApi + ?Sized,
    {
        let action = KeyAction::for_event(event);
        if action == KeyAction::Send {
            self.send(api).await;
        }
        action
    }

    fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.request_scroll(SCROLL_SETTLE_DELAY);
    }

    /// Scrolling only matters while the list is on screen.
    fn request_scroll(&mut self, delay: Duration) {
        if self.is_open {
            self.scroll_requests.push(ScrollRequest { delay });
        }
    }
}

impl Default for ChatAssistant {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_with_greeting() {
        let chat = ChatAssistant::new(true);
        assert!(!chat.is_open());
        assert_eq!(chat.messages(), &[ChatMessage::assistant(GREETING)]);
        assert_eq!(chat.input(), "");
        assert!(!chat.is_sending());
        assert_eq!(chat.error(), None);
    }

    #[test]
    fn toggle_flips_and_schedules_scroll_on_open() {
        let mut chat = ChatAssistant::new(true);
        chat.toggle_open();
        assert!(chat.is_open());
        assert_eq!(
            chat.take_scroll_requests(),
            vec![ScrollRequest {
                delay: SCROLL_SETTLE_DELAY
            }]
        );

        chat.toggle_open();
        assert!(!chat.is_open());
        assert!(chat.take_scroll_requests().is_empty());
    }

    #[test]
    fn blank_draft_is_ignored() {
        let mut chat = ChatAssistant::new(true);
        chat.set_input("   \n ");
        assert!(chat.begin_send().is_none());
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.input(), "   \n ");
    }

    #[test]
    fn begin_send_appends_trimmed_message() {
        let mut chat = ChatAssistant::new(true);
        chat.set_input("  How do goals work?  ");

        let pending = chat.begin_send().expect("accepted");

        assert_eq!(pending.message(), "How do goals work?");
        assert_eq!(pending.history().len(), 2);
        assert_eq!(
            pending.history().last(),
            Some(&ChatMessage::user("How do goals work?"))
        );
        assert_eq!(chat.input(), "");
        assert!(chat.is_sending());
        assert!(chat.show_thinking());
        assert!(chat.input_disabled());
    }

    #[test]
    fn render_flags_follow_state() {
        let mut chat = ChatAssistant::new(false);
        assert_eq!(chat.placeholder(), PLACEHOLDER_SIGNED_OUT);
        assert!(chat.input_disabled());
        chat.set_input("hi");
        assert!(!chat.can_send());

        chat.set_authenticated(true);
        assert_eq!(chat.placeholder(), PLACEHOLDER_SIGNED_IN);
        assert!(!chat.input_disabled());
        assert!(chat.can_send());
    }

    #[test]
    fn scrolls_only_while_open() {
        let mut chat = ChatAssistant::new(true);
        chat.set_input("closed");
        let _ = chat.begin_send();
        chat.finish_send(Ok(ChatResponse { reply: "r".into() }));
        assert!(chat.take_scroll_requests().is_empty());
    }
}
