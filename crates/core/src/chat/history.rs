//! Ordered, de-duplicated chat history.

use std::collections::HashSet;

use agora_shared::{ChatMessage, Id};

/// Messages in arrival order. A record whose id is already held is dropped.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
    seen: HashSet<Id>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unless a message with the same id is already present.
    /// Returns `false` for a duplicate.
    pub fn push(&mut self, message: ChatMessage) -> bool {
        if !self.seen.insert(message.id) {
            return false;
        }
        self.messages.push(message);
        true
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
