//! Chat socket transports.
//!
//! A transport opens one socket and hands back a pair of channels. Dropping
//! the outgoing sender closes the socket; the incoming side always ends with
//! [`LinkEvent::Closed`].

use futures_channel::mpsc::{UnboundedReceiver, UnboundedSender};

use super::ChatError;
use crate::runtime::BoxedFuture;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub use native::WsTransport;
#[cfg(target_arch = "wasm32")]
pub use wasm::WsTransport;

/// Something that happened on an open socket.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    Text(String),
    Error(String),
    Closed,
}

/// An open socket.
pub struct ChatLink {
    pub outgoing: UnboundedSender<String>,
    pub incoming: UnboundedReceiver<LinkEvent>,
}

pub trait ChatTransport {
    /// Resolves once the socket is open, or with the reason it never opened.
    fn connect(&self, url: &str) -> BoxedFuture<Result<ChatLink, ChatError>>;
}
