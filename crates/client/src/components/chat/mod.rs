//! Global chat sidebar.

mod global_chat;
mod use_chat;

pub use global_chat::GlobalChat;
pub use use_chat::{use_chat_session, ChatSessionHandle};
