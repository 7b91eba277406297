use agora_core::chat::ChatStatus;
use agora_shared::format_clock;
use dioxus::prelude::*;

use super::use_chat::use_chat_session;
use crate::auth_session::SessionContext;
use crate::components::ui::{Button, ErrorBox, TextInput};
use crate::Route;

#[component]
pub fn GlobalChat() -> Element {
    let ctx = use_context::<SessionContext>();
    let chat = use_chat_session();
    let snapshot = chat.snapshot;
    let mut draft = use_signal(String::new);

    // Keep the newest message in view.
    use_effect(move || {
        let _ = snapshot.read().messages.len();
        let _ = document::eval(
            "const el = document.getElementById('chat-messages'); if (el) { el.scrollTop = el.scrollHeight; }",
        );
    });

    let state = snapshot.read().clone();
    let signed_in = ctx.is_authenticated();
    let (dot, label) = match (state.status, state.reconnecting) {
        (ChatStatus::Connected, _) => ("bg-green-500", "Connected"),
        (ChatStatus::Connecting, _) => ("bg-yellow-500", "Connecting..."),
        (ChatStatus::Disconnected, true) => ("bg-yellow-500", "Reconnecting..."),
        (ChatStatus::Disconnected, false) => ("bg-red-500", "Disconnected"),
    };
    let can_send = signed_in && state.status.is_connected();
    let rows: Vec<_> = state
        .messages
        .iter()
        .map(|m| (m.clone(), format_clock(&m.timestamp)))
        .collect();

    let send_chat = chat.clone();
    let mut send = move || {
        let text = draft.read().clone();
        if text.trim().is_empty() {
            return;
        }
        send_chat.publish(text);
        draft.set(String::new());
    };

    rsx! {
        aside { class: "flex flex-col w-80 h-[calc(100vh-3.5rem)] sticky top-14 bg-[#2b2d31] border-l border-[#1e1f22]",
            div { class: "flex items-center justify-between px-4 h-12 border-b border-[#1e1f22]",
                h2 { class: "text-sm font-semibold text-white", "Global Chat" }
                div { class: "flex items-center gap-2 text-xs text-gray-400",
                    span { class: "w-2 h-2 rounded-full {dot}" }
                    "{label}"
                }
            }

            if let Some(error) = state.error.clone() {
                div { class: "px-3", ErrorBox { message: error } }
            }

            div { id: "chat-messages", class: "flex-1 px-4 py-2 space-y-3",
                if state.messages.is_empty() {
                    p { class: "text-sm text-gray-500 text-center mt-6", "No messages yet" }
                }
                for (message, clock) in rows {
                    div { key: "{message.id}", class: "text-sm",
                        div { class: "flex items-baseline gap-2",
                            span { class: "font-semibold text-indigo-300", "{message.sender}" }
                            span { class: "text-xs text-gray-500", "{clock}" }
                        }
                        p { class: "text-gray-200 break-words", "{message.content}" }
                    }
                }
            }

            div { class: "p-3 border-t border-[#1e1f22]",
                if signed_in {
                    form {
                        class: "flex gap-2",
                        onsubmit: move |e| {
                            e.prevent_default();
                            send();
                        },
                        TextInput {
                            value: draft.cloned(),
                            placeholder: "Type a message...".to_string(),
                            disabled: !can_send,
                            oninput: move |e: FormEvent| draft.set(e.value()),
                        }
                        Button {
                            r#type: "submit".to_string(),
                            disabled: !can_send || draft.read().trim().is_empty(),
                            "Send"
                        }
                    }
                } else {
                    p { class: "text-sm text-gray-400 text-center",
                        Link { to: Route::Login {}, class: "text-indigo-400 hover:text-indigo-300", "Log in" }
                        " to chat"
                    }
                }
            }
        }
    }
}
