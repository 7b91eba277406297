//! Runs a [`ChatSession`] against a real transport, timers and publisher.

use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::future::{AbortHandle, Abortable};
use futures_util::StreamExt;

use agora_shared::{ChatProtocol, OutgoingChatMessage, StompCommand, StompFrame};

use super::session::{ChatEffect, ChatSession, ChatSnapshot, ConnectionId, RetryToken};
use super::transport::{ChatTransport, LinkEvent};
use super::{ChatError, ChatPublisher};
use crate::config::ChatConfig;
use crate::runtime::{self, boxed};

const SUBSCRIPTION_ID: &str = "sub-0";

enum ChatCommand {
    Publish { text: String, sender: Option<String> },
    Unmount,
}

enum DriverEvent {
    Command(ChatCommand),
    Linked(ConnectionId, Result<UnboundedSender<String>, ChatError>),
    Link(ConnectionId, LinkEvent),
    RetryDue(RetryToken),
    PublishFailed(String),
}

/// The socket currently owned by the driver.
struct ActiveLink {
    conn: ConnectionId,
    pump: AbortHandle,
    outgoing: Option<UnboundedSender<String>>,
    stomp_connected: bool,
}

/// Cheap handle the UI uses to talk to a running [`ChatConnection`].
#[derive(Clone)]
pub struct ChatHandle {
    events: UnboundedSender<DriverEvent>,
}

impl ChatHandle {
    /// Ask to publish a message. Ignored unless connected, non-blank and
    /// signed in.
    pub fn publish(&self, text: impl Into<String>, sender: Option<String>) {
        let _ = self
            .events
            .unbounded_send(DriverEvent::Command(ChatCommand::Publish {
                text: text.into(),
                sender,
            }));
    }

    /// Tear the connection down and stop the driver.
    pub fn unmount(&self) {
        let _ = self
            .events
            .unbounded_send(DriverEvent::Command(ChatCommand::Unmount));
    }
}

pub struct ChatConnection<T, P> {
    session: ChatSession,
    config: ChatConfig,
    transport: T,
    publisher: P,
    events_tx: UnboundedSender<DriverEvent>,
    events_rx: UnboundedReceiver<DriverEvent>,
    link: Option<ActiveLink>,
    retry_timer: Option<(RetryToken, AbortHandle)>,
    on_update: Box<dyn FnMut(ChatSnapshot)>,
}

impl<T, P> ChatConnection<T, P>
where
    T: ChatTransport,
    P: ChatPublisher,
{
    pub fn new(
        config: ChatConfig,
        transport: T,
        publisher: P,
        on_update: impl FnMut(ChatSnapshot) + 'static,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        Self {
            session: ChatSession::new(config.reconnect_delay),
            config,
            transport,
            publisher,
            events_tx,
            events_rx,
            link: None,
            retry_timer: None,
            on_update: Box::new(on_update),
        }
    }

    pub fn handle(&self) -> ChatHandle {
        ChatHandle {
            events: self.events_tx.clone(),
        }
    }

    /// Connect and process events until unmounted. Dropping the future
    /// tears the connection down as well.
    pub async fn run(mut self) {
        let effects = self.session.mount();
        self.apply(effects);
        self.notify();

        while let Some(event) = self.events_rx.next().await {
            let keep_running = self.handle_event(event);
            self.notify();
            if !keep_running {
                break;
            }
        }
        crate::log_debug!("chat driver stopped");
    }

    fn notify(&mut self) {
        let snapshot = self.session.snapshot();
        (self.on_update)(snapshot);
    }

    fn handle_event(&mut self, event: DriverEvent) -> bool {
        match event {
            DriverEvent::Command(ChatCommand::Publish { text, sender }) => {
                match self.session.publish(&text, sender.as_deref()) {
                    Some(effect) => self.apply(vec![effect]),
                    None => crate::log_debug!("chat publish ignored"),
                }
            }
            DriverEvent::Command(ChatCommand::Unmount) => {
                let effects = self.session.unmount();
                self.apply(effects);
                return false;
            }
            DriverEvent::Linked(conn, Ok(outgoing)) => self.on_linked(conn, outgoing),
            DriverEvent::Linked(conn, Err(e)) => {
                self.session.on_error(conn, &e.to_string());
                self.on_link_closed(conn);
            }
            DriverEvent::Link(conn, LinkEvent::Text(text)) => self.on_text(conn, &text),
            DriverEvent::Link(conn, LinkEvent::Error(reason)) => {
                self.session.on_error(conn, &reason);
            }
            DriverEvent::Link(conn, LinkEvent::Closed) => self.on_link_closed(conn),
            DriverEvent::RetryDue(token) => {
                if matches!(self.retry_timer, Some((pending, _)) if pending == token) {
                    self.retry_timer = None;
                }
                let effects = self.session.on_retry_due(token);
                self.apply(effects);
            }
            DriverEvent::PublishFailed(reason) => self.session.on_publish_failed(&reason),
        }
        true
    }

    fn is_current(&self, conn: ConnectionId) -> bool {
        self.link.as_ref().is_some_and(|link| link.conn == conn)
    }

    fn on_linked(&mut self, conn: ConnectionId, outgoing: UnboundedSender<String>) {
        let Some(link) = self.link.as_mut().filter(|link| link.conn == conn) else {
            // Dropping the sender closes the stale socket.
            return;
        };
        match self.config.protocol {
            ChatProtocol::Raw => {
                link.outgoing = Some(outgoing);
                let effects = self.session.on_open(conn);
                self.apply(effects);
            }
            ChatProtocol::Stomp => {
                let host = url::Url::parse(&self.config.ws_url)
                    .ok()
                    .and_then(|u| u.host_str().map(str::to_string))
                    .unwrap_or_else(|| "localhost".to_string());
                let _ = outgoing.unbounded_send(StompFrame::connect(&host).encode());
                link.outgoing = Some(outgoing);
            }
        }
    }

    fn on_text(&mut self, conn: ConnectionId, text: &str) {
        match self.config.protocol {
            ChatProtocol::Raw => {
                self.session.on_message(conn, text);
            }
            ChatProtocol::Stomp => match StompFrame::decode(text) {
                Ok(Some(frame)) => self.on_frame(conn, frame),
                Ok(None) => {}
                Err(e) => crate::log_warn!("dropping malformed STOMP frame: {}", e),
            },
        }
    }

    fn on_frame(&mut self, conn: ConnectionId, frame: StompFrame) {
        match frame.command {
            StompCommand::Connected => {
                if let Some(link) = self.link.as_mut().filter(|link| link.conn == conn) {
                    link.stomp_connected = true;
                }
                let effects = self.session.on_open(conn);
                self.apply(effects);
            }
            StompCommand::Message => {
                self.session.on_message(conn, &frame.body);
            }
            StompCommand::Error => {
                let reason = frame
                    .header("message")
                    .map(str::to_string)
                    .unwrap_or(frame.body);
                self.session.on_error(conn, &reason);
            }
            other => crate::log_debug!("ignoring STOMP {} frame", other),
        }
    }

    fn on_link_closed(&mut self, conn: ConnectionId) {
        if self.is_current(conn) {
            self.release_link();
        }
        let effects = self.session.on_close(conn);
        self.apply(effects);
    }

    fn send_frame(&self, frame: StompFrame) -> bool {
        self.link
            .as_ref()
            .and_then(|link| link.outgoing.as_ref())
            .is_some_and(|out| out.unbounded_send(frame.encode()).is_ok())
    }

    fn apply(&mut self, effects: Vec<ChatEffect>) {
        for effect in effects {
            match effect {
                ChatEffect::Open(conn) => self.open(conn),
                ChatEffect::Subscribe(conn) => self.subscribe(conn),
                ChatEffect::Transmit(message) => self.transmit(message),
                ChatEffect::ScheduleReconnect { token, delay } => {
                    self.cancel_timer();
                    let (abort, registration) = AbortHandle::new_pair();
                    let events = self.events_tx.clone();
                    let timer = Abortable::new(
                        async move {
                            runtime::sleep(delay).await;
                            let _ = events.unbounded_send(DriverEvent::RetryDue(token));
                        },
                        registration,
                    );
                    runtime::spawn(boxed(async move {
                        let _ = timer.await;
                    }));
                    self.retry_timer = Some((token, abort));
                }
                ChatEffect::CancelReconnect(token) => {
                    if matches!(self.retry_timer, Some((pending, _)) if pending == token) {
                        self.cancel_timer();
                    }
                }
                ChatEffect::Close(conn) => {
                    if self.is_current(conn) {
                        self.release_link();
                    }
                }
            }
        }
    }

    fn open(&mut self, conn: ConnectionId) {
        self.release_link();
        crate::log_info!("opening chat connection to {}", self.config.ws_url);

        let connecting = self.transport.connect(&self.config.ws_url);
        let events = self.events_tx.clone();
        let (pump, registration) = AbortHandle::new_pair();
        let task = Abortable::new(
            async move {
                match connecting.await {
                    Ok(link) => {
                        let mut incoming = link.incoming;
                        if events
                            .unbounded_send(DriverEvent::Linked(conn, Ok(link.outgoing)))
                            .is_err()
                        {
                            return;
                        }
                        while let Some(event) = incoming.next().await {
                            let closed = event == LinkEvent::Closed;
                            if events.unbounded_send(DriverEvent::Link(conn, event)).is_err() {
                                return;
                            }
                            if closed {
                                return;
                            }
                        }
                        let _ = events.unbounded_send(DriverEvent::Link(conn, LinkEvent::Closed));
                    }
                    Err(e) => {
                        let _ = events.unbounded_send(DriverEvent::Linked(conn, Err(e)));
                    }
                }
            },
            registration,
        );
        runtime::spawn(boxed(async move {
            let _ = task.await;
        }));

        self.link = Some(ActiveLink {
            conn,
            pump,
            outgoing: None,
            stomp_connected: false,
        });
    }

    fn subscribe(&mut self, conn: ConnectionId) {
        match self.config.protocol {
            ChatProtocol::Raw => crate::log_info!("chat connection {} open", conn.0),
            ChatProtocol::Stomp => {
                if self.is_current(conn) {
                    let frame = StompFrame::subscribe(SUBSCRIPTION_ID, &self.config.topic);
                    if !self.send_frame(frame) {
                        crate::log_warn!("could not subscribe to {}", self.config.topic);
                    }
                }
            }
        }
    }

    fn transmit(&mut self, message: OutgoingChatMessage) {
        match self.config.protocol {
            ChatProtocol::Raw => {
                let publishing = self.publisher.publish(message);
                let events = self.events_tx.clone();
                runtime::spawn(boxed(async move {
                    if let Err(e) = publishing.await {
                        let _ = events.unbounded_send(DriverEvent::PublishFailed(e.to_string()));
                    }
                }));
            }
            ChatProtocol::Stomp => {
                let sent = match serde_json::to_string(&message) {
                    Ok(json) => {
                        self.send_frame(StompFrame::send_json(&self.config.send_destination, json))
                    }
                    Err(e) => {
                        crate::log_error!("Serialize failed: {}", e);
                        false
                    }
                };
                if !sent {
                    self.session.on_publish_failed("chat socket unavailable");
                }
            }
        }
    }

    fn cancel_timer(&mut self) {
        if let Some((_, abort)) = self.retry_timer.take() {
            abort.abort();
        }
    }

    /// Close the owned socket, saying goodbye first on STOMP.
    fn release_link(&mut self) {
        let Some(link) = self.link.take() else {
            return;
        };
        if link.stomp_connected {
            if let Some(out) = &link.outgoing {
                let _ = out.unbounded_send(StompFrame::disconnect().encode());
            }
        }
        link.pump.abort();
        crate::log_debug!("released chat connection {}", link.conn.0);
    }
}

impl<T, P> Drop for ChatConnection<T, P> {
    fn drop(&mut self) {
        if let Some((_, abort)) = self.retry_timer.take() {
            abort.abort();
        }
        if let Some(link) = self.link.take() {
            if link.stomp_connected {
                if let Some(out) = &link.outgoing {
                    let _ = out.unbounded_send(StompFrame::disconnect().encode());
                }
            }
            link.pump.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::session::{ChatStatus, RECONNECTING_MESSAGE, SEND_FAILED_MESSAGE};
    use crate::chat::transport::ChatLink;
    use agora_shared::ApiError;
    use futures_channel::mpsc::UnboundedReceiver;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::task::LocalSet;

    struct FakeSocket {
        sent: UnboundedReceiver<String>,
        server: UnboundedSender<LinkEvent>,
    }

    #[derive(Clone, Default)]
    struct FakeTransport {
        sockets: Arc<Mutex<Vec<FakeSocket>>>,
        refuse: Arc<Mutex<usize>>,
        attempts: Arc<Mutex<usize>>,
        stall: Arc<Mutex<bool>>,
        abandoned: Arc<Mutex<usize>>,
    }

    /// Counts connect attempts dropped before they resolved.
    struct CountOnDrop(Arc<Mutex<usize>>);

    impl Drop for CountOnDrop {
        fn drop(&mut self) {
            *self.0.lock().unwrap() += 1;
        }
    }

    impl FakeTransport {
        fn refuse_next(&self, n: usize) {
            *self.refuse.lock().unwrap() = n;
        }

        fn attempts(&self) -> usize {
            *self.attempts.lock().unwrap()
        }

        /// Connect attempts from now on never resolve.
        fn stall_connects(&self) {
            *self.stall.lock().unwrap() = true;
        }

        fn abandoned(&self) -> usize {
            *self.abandoned.lock().unwrap()
        }

        fn push(&self, socket: usize, event: LinkEvent) {
            let sockets = self.sockets.lock().unwrap();
            let _ = sockets[socket].server.unbounded_send(event);
        }

        /// Frames written so far, and whether the client closed the socket.
        fn drain(&self, socket: usize) -> (Vec<String>, bool) {
            let mut sockets = self.sockets.lock().unwrap();
            let mut out = Vec::new();
            loop {
                match sockets[socket].sent.try_next() {
                    Ok(Some(text)) => out.push(text),
                    Ok(None) => return (out, true),
                    Err(_) => return (out, false),
                }
            }
        }
    }

    impl ChatTransport for FakeTransport {
        fn connect(&self, _url: &str) -> runtime::BoxedFuture<Result<ChatLink, ChatError>> {
            *self.attempts.lock().unwrap() += 1;
            {
                let mut refuse = self.refuse.lock().unwrap();
                if *refuse > 0 {
                    *refuse -= 1;
                    return boxed(async { Err(ChatError::Connect("refused".into())) });
                }
            }
            if *self.stall.lock().unwrap() {
                let guard = CountOnDrop(self.abandoned.clone());
                return boxed(async move {
                    let _guard = guard;
                    futures_util::future::pending::<Result<ChatLink, ChatError>>().await
                });
            }
            let (outgoing, sent) = unbounded();
            let (server, incoming) = unbounded();
            self.sockets.lock().unwrap().push(FakeSocket { sent, server });
            boxed(async move { Ok(ChatLink { outgoing, incoming }) })
        }
    }

    #[derive(Clone, Default)]
    struct FakePublisher {
        published: Arc<Mutex<Vec<OutgoingChatMessage>>>,
        fail: bool,
    }

    impl ChatPublisher for FakePublisher {
        fn publish(
            &self,
            message: OutgoingChatMessage,
        ) -> runtime::BoxedFuture<Result<(), ApiError>> {
            self.published.lock().unwrap().push(message);
            let fail = self.fail;
            boxed(async move {
                if fail {
                    Err(ApiError::Http {
                        status: 500,
                        body: String::new(),
                    })
                } else {
                    Ok(())
                }
            })
        }
    }

    type Snapshots = Rc<RefCell<Vec<ChatSnapshot>>>;

    fn start(
        protocol: ChatProtocol,
        transport: &FakeTransport,
        publisher: &FakePublisher,
    ) -> (ChatHandle, Snapshots, tokio::task::JoinHandle<()>) {
        let config = ChatConfig {
            protocol,
            ..ChatConfig::default()
        };
        let snapshots: Snapshots = Rc::default();
        let sink = snapshots.clone();
        let connection = ChatConnection::new(
            config,
            transport.clone(),
            publisher.clone(),
            move |snapshot| sink.borrow_mut().push(snapshot),
        );
        let handle = connection.handle();
        let task = tokio::task::spawn_local(connection.run());
        (handle, snapshots, task)
    }

    fn latest(snapshots: &Snapshots) -> ChatSnapshot {
        snapshots.borrow().last().cloned().unwrap_or_default()
    }

    /// Let every runnable task make progress.
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    fn record(id: i64) -> LinkEvent {
        LinkEvent::Text(format!(
            r#"{{"ID":{id},"Sender":"bo","Content":"hello {id}","Timestamp":"2024-05-01T10:00:00Z"}}"#
        ))
    }

    fn decoded(frames: &[String]) -> Vec<StompFrame> {
        frames
            .iter()
            .filter_map(|f| StompFrame::decode(f).ok().flatten())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn reconnects_once_after_close() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                let (handle, snapshots, task) =
                    start(ChatProtocol::Raw, &transport, &FakePublisher::default());
                settle().await;
                assert_eq!(transport.attempts(), 1);
                assert_eq!(latest(&snapshots).status, ChatStatus::Connected);

                transport.push(0, record(1));
                transport.push(0, record(1));
                transport.push(0, record(2));
                settle().await;
                let ids: Vec<_> = latest(&snapshots).messages.iter().map(|m| m.id).collect();
                assert_eq!(ids, vec![1, 2]);

                transport.push(0, LinkEvent::Closed);
                settle().await;
                let snapshot = latest(&snapshots);
                assert_eq!(snapshot.status, ChatStatus::Disconnected);
                assert!(snapshot.reconnecting);
                assert_eq!(snapshot.error.as_deref(), Some(RECONNECTING_MESSAGE));

                tokio::time::sleep(Duration::from_millis(2500)).await;
                assert_eq!(transport.attempts(), 1);

                tokio::time::sleep(Duration::from_millis(1000)).await;
                assert_eq!(transport.attempts(), 2);
                let snapshot = latest(&snapshots);
                assert_eq!(snapshot.status, ChatStatus::Connected);
                assert_eq!(snapshot.error, None);
                // History survives the reconnect.
                assert_eq!(snapshot.messages.len(), 2);

                tokio::time::sleep(Duration::from_secs(30)).await;
                assert_eq!(transport.attempts(), 2);

                handle.unmount();
                task.await.unwrap();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn refused_connection_keeps_retrying() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                transport.refuse_next(2);
                let (handle, snapshots, task) =
                    start(ChatProtocol::Raw, &transport, &FakePublisher::default());
                settle().await;
                assert_eq!(transport.attempts(), 1);
                assert!(latest(&snapshots).reconnecting);

                tokio::time::sleep(Duration::from_secs(7)).await;
                assert_eq!(transport.attempts(), 3);
                assert_eq!(latest(&snapshots).status, ChatStatus::Connected);

                handle.unmount();
                task.await.unwrap();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn raw_publish_goes_through_publisher() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                let publisher = FakePublisher::default();
                let (handle, snapshots, task) = start(ChatProtocol::Raw, &transport, &publisher);

                handle.publish("too early", Some("bo".into()));
                settle().await;
                handle.publish("   ", Some("bo".into()));
                handle.publish("anonymous", None);
                handle.publish("  hi all  ", Some("bo".into()));
                settle().await;

                let published = publisher.published.lock().unwrap().clone();
                assert_eq!(
                    published,
                    vec![OutgoingChatMessage {
                        content: "hi all".into(),
                        sender: "bo".into(),
                    }]
                );
                assert!(latest(&snapshots).messages.is_empty());
                let (frames, _) = transport.drain(0);
                assert!(frames.is_empty());

                handle.unmount();
                task.await.unwrap();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn failed_publish_is_reported() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                let publisher = FakePublisher {
                    fail: true,
                    ..FakePublisher::default()
                };
                let (handle, snapshots, task) = start(ChatProtocol::Raw, &transport, &publisher);
                settle().await;

                handle.publish("hello", Some("bo".into()));
                settle().await;
                let snapshot = latest(&snapshots);
                assert_eq!(snapshot.error.as_deref(), Some(SEND_FAILED_MESSAGE));
                assert_eq!(snapshot.status, ChatStatus::Connected);
                assert_eq!(publisher.published.lock().unwrap().len(), 1);

                handle.unmount();
                task.await.unwrap();
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn stomp_handshake_subscribe_and_send() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                let publisher = FakePublisher::default();
                let (handle, snapshots, task) = start(ChatProtocol::Stomp, &transport, &publisher);
                settle().await;

                let (frames, _) = transport.drain(0);
                let frames = decoded(&frames);
                assert_eq!(frames.len(), 1);
                assert_eq!(frames[0].command, StompCommand::Connect);
                assert_eq!(frames[0].header("host"), Some("localhost"));
                assert_eq!(latest(&snapshots).status, ChatStatus::Connecting);

                transport.push(0, LinkEvent::Text("CONNECTED\nversion:1.2\n\n\0".into()));
                settle().await;
                assert_eq!(latest(&snapshots).status, ChatStatus::Connected);
                let (frames, _) = transport.drain(0);
                let frames = decoded(&frames);
                assert_eq!(frames[0].command, StompCommand::Subscribe);
                assert_eq!(frames[0].header("destination"), Some("/topic/public"));

                let body = r#"{"id":5,"sender":"bo","content":"yo","timestamp":"2024-05-01T10:00:00Z"}"#;
                let message = StompFrame::new(StompCommand::Message)
                    .with_header("destination", "/topic/public")
                    .with_header("subscription", SUBSCRIPTION_ID)
                    .with_body(body);
                transport.push(0, LinkEvent::Text(message.encode()));
                transport.push(0, LinkEvent::Text("\n".into()));
                settle().await;
                assert_eq!(latest(&snapshots).messages.len(), 1);

                handle.publish("hey", Some("bo".into()));
                settle().await;
                let (frames, _) = transport.drain(0);
                let frames = decoded(&frames);
                assert_eq!(frames[0].command, StompCommand::Send);
                assert_eq!(frames[0].header("destination"), Some("/app/chat.send"));
                let sent: OutgoingChatMessage = serde_json::from_str(&frames[0].body).unwrap();
                assert_eq!(sent.content, "hey");
                assert!(publisher.published.lock().unwrap().is_empty());

                handle.unmount();
                task.await.unwrap();
                let (frames, closed) = transport.drain(0);
                assert_eq!(decoded(&frames)[0].command, StompCommand::Disconnect);
                assert!(closed);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_pending_reconnect() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                let (handle, snapshots, task) =
                    start(ChatProtocol::Raw, &transport, &FakePublisher::default());
                settle().await;
                transport.push(0, LinkEvent::Closed);
                settle().await;
                assert!(latest(&snapshots).reconnecting);

                handle.unmount();
                handle.unmount();
                task.await.unwrap();
                assert!(!latest(&snapshots).reconnecting);

                tokio::time::sleep(Duration::from_secs(10)).await;
                assert_eq!(transport.attempts(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_while_connecting_abandons_the_attempt() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                transport.stall_connects();
                let (handle, snapshots, task) =
                    start(ChatProtocol::Raw, &transport, &FakePublisher::default());
                settle().await;
                assert_eq!(transport.attempts(), 1);
                assert_eq!(latest(&snapshots).status, ChatStatus::Connecting);
                assert_eq!(transport.abandoned(), 0);

                handle.unmount();
                task.await.unwrap();
                settle().await;
                assert_eq!(transport.abandoned(), 1);
                let snapshot = latest(&snapshots);
                assert_eq!(snapshot.status, ChatStatus::Disconnected);
                assert!(!snapshot.reconnecting);

                tokio::time::sleep(Duration::from_secs(10)).await;
                assert_eq!(transport.attempts(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_driver_closes_the_socket() {
        LocalSet::new()
            .run_until(async {
                let transport = FakeTransport::default();
                let (_handle, _snapshots, task) =
                    start(ChatProtocol::Raw, &transport, &FakePublisher::default());
                settle().await;
                assert!(!transport.drain(0).1);

                task.abort();
                let _ = task.await;
                settle().await;
                assert!(transport.drain(0).1);

                transport.push(0, LinkEvent::Closed);
                tokio::time::sleep(Duration::from_secs(10)).await;
                assert_eq!(transport.attempts(), 1);
            })
            .await;
    }
}
