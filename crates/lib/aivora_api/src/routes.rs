//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";
pub const POST_API_CHAT_SUPPORT: &str = "/api/chat/support";
