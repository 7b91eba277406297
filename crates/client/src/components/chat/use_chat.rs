use agora_core::chat::{ChatConnection, ChatHandle, ChatSnapshot, WsTransport};
use dioxus::prelude::*;

use crate::auth_session::SessionContext;

/// The chat session owned by the calling component.
#[derive(Clone)]
pub struct ChatSessionHandle {
    pub snapshot: Signal<ChatSnapshot>,
    handle: ChatHandle,
    ctx: SessionContext,
}

impl ChatSessionHandle {
    /// Publish as the signed-in user. Does nothing when signed out.
    pub fn publish(&self, text: String) {
        self.handle.publish(text, self.ctx.username());
    }
}

/// Connect to the global chat for as long as the calling component is
/// mounted. The connection is torn down when it unmounts.
pub fn use_chat_session() -> ChatSessionHandle {
    let ctx = use_context::<SessionContext>();
    let mut snapshot = use_signal(ChatSnapshot::default);

    let handle = use_hook(move || {
        let connection = ChatConnection::new(
            ctx.config().chat,
            WsTransport::new(),
            ctx.api(),
            move |next| snapshot.set(next),
        );
        let handle = connection.handle();
        spawn(connection.run());
        handle
    });

    use_drop({
        let handle = handle.clone();
        move || handle.unmount()
    });

    ChatSessionHandle {
        snapshot,
        handle,
        ctx,
    }
}
