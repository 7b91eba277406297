//! Global chat: session state machine, its async driver and the socket
//! transports it runs over.

mod driver;
mod history;
mod session;
pub mod transport;

use agora_shared::{ApiError, OutgoingChatMessage};
use thiserror::Error;

use crate::runtime::BoxedFuture;

pub use driver::{ChatConnection, ChatHandle};
pub use history::ChatHistory;
pub use session::{
    ChatEffect, ChatSession, ChatSnapshot, ChatStatus, ConnectionId, Receipt, RetryToken,
    CONNECTION_ERROR_MESSAGE, RECONNECTING_MESSAGE, SEND_FAILED_MESSAGE,
};
pub use transport::{ChatLink, ChatTransport, LinkEvent, WsTransport};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ChatError {
    #[error("invalid chat url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("chat connection failed: {0}")]
    Connect(String),
    #[error("chat connection closed")]
    Closed,
}

/// Sends outgoing chat messages over a channel separate from the socket.
pub trait ChatPublisher {
    fn publish(&self, message: OutgoingChatMessage) -> BoxedFuture<Result<(), ApiError>>;
}
