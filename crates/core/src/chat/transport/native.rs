//! Native/Desktop chat socket using tokio-tungstenite.

use futures_channel::mpsc::{unbounded, UnboundedSender};
use futures_util::{SinkExt, Stream, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{ChatLink, ChatTransport, LinkEvent};
use crate::chat::ChatError;
use crate::runtime::{boxed, BoxedFuture};

#[derive(Debug, Clone, Copy, Default)]
pub struct WsTransport;

impl WsTransport {
    pub fn new() -> Self {
        Self
    }
}

impl ChatTransport for WsTransport {
    fn connect(&self, url: &str) -> BoxedFuture<Result<ChatLink, ChatError>> {
        let url = url.to_string();
        boxed(async move {
            let (ws_stream, _response) = connect_async(url.as_str())
                .await
                .map_err(|e| ChatError::Connect(e.to_string()))?;
            crate::log_info!("Chat socket connected to {}", url);

            let (mut write, read) = ws_stream.split();
            let (outgoing, mut outgoing_rx) = unbounded::<String>();
            let (incoming_tx, incoming) = unbounded::<LinkEvent>();

            // Read task
            tokio::spawn(async move {
                let incoming_tx = forward_incoming(read, incoming_tx).await;
                let _ = incoming_tx.unbounded_send(LinkEvent::Closed);
            });

            // Write task. Ends, and closes the socket, once the sender is dropped.
            tokio::spawn(async move {
                while let Some(text) = outgoing_rx.next().await {
                    crate::log_debug!("Chat socket send: {}", text);
                    if let Err(e) = write.send(Message::Text(text.into())).await {
                        crate::log_error!("Chat socket send failed: {}", e);
                        break;
                    }
                }
                let _ = write.close().await;
            });

            Ok(ChatLink { outgoing, incoming })
        })
    }
}

async fn forward_incoming<S>(
    mut read: S,
    incoming: UnboundedSender<LinkEvent>,
) -> UnboundedSender<LinkEvent>
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(msg) = read.next().await {
        let event = match msg {
            Ok(Message::Text(text)) => LinkEvent::Text(text.to_string()),
            Ok(Message::Close(frame)) => {
                crate::log_info!("Chat socket received close frame: {:?}", frame);
                break;
            }
            Ok(Message::Ping(data)) => {
                // Pong is handled automatically by tungstenite
                crate::log_debug!("Received ping: {:?}", data);
                continue;
            }
            Ok(_) => continue,
            Err(e) => {
                crate::log_error!("Chat socket read error: {}", e);
                let _ = incoming.unbounded_send(LinkEvent::Error(e.to_string()));
                break;
            }
        };
        if incoming.unbounded_send(event).is_err() {
            break;
        }
    }
    incoming
}
