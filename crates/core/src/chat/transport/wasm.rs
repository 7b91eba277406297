//! WASM/Web chat socket using web_sys::WebSocket.

use std::cell::RefCell;
use std::rc::Rc;

use futures_channel::mpsc::{unbounded, UnboundedSender};
use futures_channel::oneshot;
use futures_util::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{js_sys, CloseEvent, ErrorEvent, Event, MessageEvent, WebSocket};

use super::{ChatLink, ChatTransport, LinkEvent};
use crate::chat::ChatError;
use crate::runtime::{boxed, BoxedFuture};

/// readyState of an open socket.
const OPEN: u16 = 1;

#[derive(Debug, Clone, Copy, Default)]
pub struct WsTransport;

impl WsTransport {
    pub fn new() -> Self {
        Self
    }
}

type OpenSignal = Rc<RefCell<Option<oneshot::Sender<Result<(), String>>>>>;

fn signal_open(slot: &OpenSignal, result: Result<(), String>) {
    if let Some(tx) = slot.borrow_mut().take() {
        let _ = tx.send(result);
    }
}

/// Owns a socket until its open handshake completes. Dropping it before
/// then, as happens when the connect future is aborted, detaches the
/// handlers and closes the socket.
struct PendingSocket {
    ws: Option<WebSocket>,
}

impl PendingSocket {
    fn new(ws: WebSocket) -> Self {
        Self { ws: Some(ws) }
    }

    fn into_open(mut self) -> Option<WebSocket> {
        self.ws.take()
    }
}

impl Drop for PendingSocket {
    fn drop(&mut self) {
        if let Some(ws) = self.ws.take() {
            ws.set_onopen(None);
            ws.set_onmessage(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            let _ = ws.close();
            crate::log_debug!("abandoned chat socket before it opened");
        }
    }
}

impl ChatTransport for WsTransport {
    fn connect(&self, url: &str) -> BoxedFuture<Result<ChatLink, ChatError>> {
        let url = url.to_string();
        boxed(async move {
            let ws = WebSocket::new(&url)
                .map_err(|e| ChatError::Connect(format!("Failed to create WebSocket: {:?}", e)))?;
            let pending = PendingSocket::new(ws.clone());

            let (incoming_tx, incoming) = unbounded::<LinkEvent>();
            let (open_tx, open_rx) = oneshot::channel();
            let opened: OpenSignal = Rc::new(RefCell::new(Some(open_tx)));

            // Set up open handler
            let opened_for_open = opened.clone();
            let onopen_callback = Closure::wrap(Box::new(move |_: Event| {
                crate::log_info!("Chat socket onopen fired");
                signal_open(&opened_for_open, Ok(()));
            }) as Box<dyn FnMut(Event)>);
            ws.set_onopen(Some(onopen_callback.as_ref().unchecked_ref()));
            onopen_callback.forget();

            // Set up message handler
            let incoming_for_message = incoming_tx.clone();
            let onmessage_callback = Closure::wrap(Box::new(move |e: MessageEvent| {
                if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
                    let text: String = text.into();
                    let _ = incoming_for_message.unbounded_send(LinkEvent::Text(text));
                }
            }) as Box<dyn FnMut(MessageEvent)>);
            ws.set_onmessage(Some(onmessage_callback.as_ref().unchecked_ref()));
            onmessage_callback.forget();

            // Set up error handler
            let incoming_for_error = incoming_tx.clone();
            let onerror_callback = Closure::wrap(Box::new(move |_: ErrorEvent| {
                crate::log_error!("Chat socket onerror fired");
                let _ = incoming_for_error
                    .unbounded_send(LinkEvent::Error("WebSocket error".to_string()));
            }) as Box<dyn FnMut(ErrorEvent)>);
            ws.set_onerror(Some(onerror_callback.as_ref().unchecked_ref()));
            onerror_callback.forget();

            // Set up close handler. Before open it fails the connect instead.
            let opened_for_close = opened.clone();
            let onclose_callback = Closure::wrap(Box::new(move |e: CloseEvent| {
                let reason = if e.reason().is_empty() {
                    format!("Code {}", e.code())
                } else {
                    e.reason()
                };
                crate::log_info!("Chat socket onclose: {}", reason);
                signal_open(&opened_for_close, Err(reason));
                let _ = incoming_tx.unbounded_send(LinkEvent::Closed);
            }) as Box<dyn FnMut(CloseEvent)>);
            ws.set_onclose(Some(onclose_callback.as_ref().unchecked_ref()));
            onclose_callback.forget();

            match open_rx.await {
                Ok(Ok(())) => {}
                Ok(Err(reason)) => return Err(ChatError::Connect(reason)),
                Err(_) => return Err(ChatError::Closed),
            }
            let Some(ws_for_send) = pending.into_open() else {
                return Err(ChatError::Closed);
            };

            // Send task. Closes the socket once the sender is dropped.
            let (outgoing, mut outgoing_rx) = unbounded::<String>();
            spawn_local(async move {
                while let Some(text) = outgoing_rx.next().await {
                    if ws_for_send.ready_state() != OPEN {
                        crate::log_info!("Chat socket no longer open, stopping send task");
                        break;
                    }
                    if let Err(e) = ws_for_send.send_with_str(&text) {
                        crate::log_error!("Chat socket send failed: {:?}", e);
                    }
                }
                let _ = ws_for_send.close();
            });

            Ok(ChatLink { outgoing, incoming })
        })
    }
}
