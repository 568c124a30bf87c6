//! # aivora_widget
//!
//! State of the floating support chat panel: open/closed, the conversation,
//! the draft, and the single in-flight request. Rendering is left to the
//! host; this crate only decides what the panel shows and when it talks to
//! the API.

pub mod assistant;
pub mod keys;

pub use assistant::{ChatAssistant, PendingSend, ScrollRequest};
pub use keys::{Key, KeyAction, KeyEvent};

use std::time::Duration;

/// First message shown in every new conversation.
pub const GREETING: &str = "Hi! I'm your Aivora assistant. I can help you understand features like goals, daily progress, insights, and reports, or give you guidance on staying consistent. How can I help?";

/// Error shown when an anonymous user tries to send.
pub const LOGIN_REQUIRED: &str = "Please log in to chat with the assistant.";

/// Error shown when the API call fails for any reason.
pub const SEND_FAILED: &str = "Sorry, I couldn't reach the assistant. Please try again.";

/// Substituted for an empty reply.
pub const EMPTY_REPLY_FALLBACK: &str = "I'm here to help with Aivora and your goals.";

pub const TITLE: &str = "Aivora Assistant";
pub const SUBTITLE: &str = "Ask for help, tips, or guidance";
pub const PLACEHOLDER_SIGNED_IN: &str =
    "Ask how to use Aivora, improve your routine, or anything about your goals...";
pub const PLACEHOLDER_SIGNED_OUT: &str = "Log in to chat with the assistant.";

/// Delay before scrolling to the newest message, so layout can settle.
pub const SCROLL_SETTLE_DELAY: Duration = Duration::from_millis(50);
