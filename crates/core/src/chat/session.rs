//! Chat session state machine.
//!
//! Pure and synchronous: every input returns the effects the driver has to
//! carry out. `Connecting` doubles as the duplicate-attempt guard, and the
//! session owns at most one reconnect timer at a time.

use std::time::Duration;

use agora_shared::{parse_chat_record, ChatMessage, OutgoingChatMessage};

use super::history::ChatHistory;

pub const RECONNECTING_MESSAGE: &str = "Connection lost. Reconnecting...";
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again later.";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

/// Identifies one connection attempt. Events tagged with an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(pub u64);

/// Identifies one scheduled reconnect. A timer firing with an older token is
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetryToken(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Disconnected { retry: Option<RetryToken> },
    Connecting(ConnectionId),
    Connected(ConnectionId),
}

/// Work for the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEffect {
    Open(ConnectionId),
    Subscribe(ConnectionId),
    Transmit(OutgoingChatMessage),
    ScheduleReconnect { token: RetryToken, delay: Duration },
    CancelReconnect(RetryToken),
    Close(ConnectionId),
}

/// Connection status as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

impl ChatStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ChatStatus::Connected)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChatStatus::Disconnected => "Disconnected",
            ChatStatus::Connecting => "Connecting",
            ChatStatus::Connected => "Connected",
        }
    }
}

/// What the view renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatSnapshot {
    pub status: ChatStatus,
    pub reconnecting: bool,
    pub error: Option<String>,
    pub messages: Vec<ChatMessage>,
}

/// Outcome of an inbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receipt {
    Appended,
    Duplicate,
    Malformed,
    Stale,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    state: LinkState,
    reconnect_delay: Duration,
    next_connection: u64,
    next_retry: u64,
    mounted: bool,
    history: ChatHistory,
    error: Option<String>,
}

impl ChatSession {
    pub fn new(reconnect_delay: Duration) -> Self {
        Self {
            state: LinkState::Disconnected { retry: None },
            reconnect_delay,
            next_connection: 0,
            next_retry: 0,
            mounted: false,
            history: ChatHistory::new(),
            error: None,
        }
    }

    pub fn status(&self) -> ChatStatus {
        match self.state {
            LinkState::Disconnected { .. } => ChatStatus::Disconnected,
            LinkState::Connecting(_) => ChatStatus::Connecting,
            LinkState::Connected(_) => ChatStatus::Connected,
        }
    }

    pub fn is_reconnecting(&self) -> bool {
        matches!(self.state, LinkState::Disconnected { retry: Some(_) })
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.history.messages()
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            status: self.status(),
            reconnecting: self.is_reconnecting(),
            error: self.error.clone(),
            messages: self.history.messages().to_vec(),
        }
    }

    /// The attempt currently connecting or connected, if any.
    pub fn current_connection(&self) -> Option<ConnectionId> {
        match self.state {
            LinkState::Connecting(id) | LinkState::Connected(id) => Some(id),
            LinkState::Disconnected { .. } => None,
        }
    }

    fn begin_attempt(&mut self, effects: &mut Vec<ChatEffect>) {
        let id = ConnectionId(self.next_connection);
        self.next_connection += 1;
        self.state = LinkState::Connecting(id);
        effects.push(ChatEffect::Open(id));
    }

    /// Start connecting unless a connection is already being made or held.
    /// A pending reconnect is pulled forward.
    pub fn mount(&mut self) -> Vec<ChatEffect> {
        self.mounted = true;
        let mut effects = Vec::new();
        match self.state {
            LinkState::Connecting(_) | LinkState::Connected(_) => {}
            LinkState::Disconnected { retry } => {
                if let Some(token) = retry {
                    effects.push(ChatEffect::CancelReconnect(token));
                }
                self.begin_attempt(&mut effects);
            }
        }
        effects
    }

    pub fn on_open(&mut self, conn: ConnectionId) -> Vec<ChatEffect> {
        match self.state {
            LinkState::Connecting(id) if id == conn => {
                self.state = LinkState::Connected(conn);
                self.error = None;
                vec![ChatEffect::Subscribe(conn)]
            }
            LinkState::Connected(id) if id == conn => Vec::new(),
            // An attempt nobody waits for any more opened late.
            _ => vec![ChatEffect::Close(conn)],
        }
    }

    pub fn on_message(&mut self, conn: ConnectionId, payload: &str) -> Receipt {
        if self.state != LinkState::Connected(conn) {
            return Receipt::Stale;
        }
        match parse_chat_record(payload) {
            Ok(message) => {
                if self.history.push(message) {
                    Receipt::Appended
                } else {
                    Receipt::Duplicate
                }
            }
            Err(e) => {
                crate::log_warn!("dropping malformed chat payload: {} ({})", e, payload);
                Receipt::Malformed
            }
        }
    }

    /// The connection went away. Schedules exactly one reconnect.
    pub fn on_close(&mut self, conn: ConnectionId) -> Vec<ChatEffect> {
        if self.current_connection() != Some(conn) {
            return Vec::new();
        }
        if !self.mounted {
            self.state = LinkState::Disconnected { retry: None };
            return Vec::new();
        }

        let token = RetryToken(self.next_retry);
        self.next_retry += 1;
        self.state = LinkState::Disconnected { retry: Some(token) };
        self.error = Some(RECONNECTING_MESSAGE.to_string());
        crate::log_info!(
            "chat connection lost, reconnecting in {}ms",
            self.reconnect_delay.as_millis()
        );
        vec![ChatEffect::ScheduleReconnect {
            token,
            delay: self.reconnect_delay,
        }]
    }

    /// Transport trouble. Visible, but the retry loop carries on.
    pub fn on_error(&mut self, conn: ConnectionId, reason: &str) {
        if self.current_connection() != Some(conn) {
            return;
        }
        crate::log_error!("chat transport error: {}", reason);
        self.error = Some(CONNECTION_ERROR_MESSAGE.to_string());
    }

    pub fn on_retry_due(&mut self, token: RetryToken) -> Vec<ChatEffect> {
        let mut effects = Vec::new();
        if self.mounted && self.state == (LinkState::Disconnected { retry: Some(token) }) {
            self.begin_attempt(&mut effects);
        }
        effects
    }

    /// Returns the effect to transmit, or `None` when the request is a no-op:
    /// not connected, blank text, or no sender identity.
    pub fn publish(&self, text: &str, sender: Option<&str>) -> Option<ChatEffect> {
        if !self.status().is_connected() {
            return None;
        }
        let content = text.trim();
        let sender = sender.map(str::trim).filter(|s| !s.is_empty())?;
        if content.is_empty() {
            return None;
        }
        Some(ChatEffect::Transmit(OutgoingChatMessage {
            content: content.to_string(),
            sender: sender.to_string(),
        }))
    }

    pub fn on_publish_failed(&mut self, reason: &str) {
        crate::log_error!("failed to send chat message: {}", reason);
        self.error = Some(SEND_FAILED_MESSAGE.to_string());
    }

    /// Tear down: close the connection, cancel the timer, start clean next
    /// time. Safe to call any number of times.
    pub fn unmount(&mut self) -> Vec<ChatEffect> {
        self.mounted = false;
        let effects = match self.state {
            LinkState::Connecting(id) | LinkState::Connected(id) => vec![ChatEffect::Close(id)],
            LinkState::Disconnected { retry: Some(token) } => {
                vec![ChatEffect::CancelReconnect(token)]
            }
            LinkState::Disconnected { retry: None } => Vec::new(),
        };
        self.state = LinkState::Disconnected { retry: None };
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(3);

    fn record(id: i64, timestamp: &str) -> String {
        format!(r#"{{"id":{id},"sender":"ana","content":"m{id}","timestamp":"{timestamp}"}}"#)
    }

    fn connected() -> (ChatSession, ConnectionId) {
        let mut session = ChatSession::new(DELAY);
        let effects = session.mount();
        let conn = match effects.as_slice() {
            [ChatEffect::Open(id)] => *id,
            other => panic!("expected a single open, got {other:?}"),
        };
        assert_eq!(session.on_open(conn), vec![ChatEffect::Subscribe(conn)]);
        (session, conn)
    }

    fn schedules(effects: &[ChatEffect]) -> Vec<RetryToken> {
        effects
            .iter()
            .filter_map(|e| match e {
                ChatEffect::ScheduleReconnect { token, .. } => Some(*token),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn duplicate_ids_are_kept_once() {
        let (mut session, conn) = connected();
        assert_eq!(session.on_message(conn, &record(1, "t")), Receipt::Appended);
        assert_eq!(session.on_message(conn, &record(1, "t")), Receipt::Duplicate);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn arrival_order_wins_over_timestamps() {
        let (mut session, conn) = connected();
        session.on_message(conn, &record(10, "2024-01-03T00:00:00Z"));
        session.on_message(conn, &record(20, "2024-01-01T00:00:00Z"));
        session.on_message(conn, &record(30, "2024-01-02T00:00:00Z"));
        let ids: Vec<_> = session.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }

    #[test]
    fn malformed_payloads_are_dropped_quietly() {
        let (mut session, conn) = connected();
        assert_eq!(session.on_message(conn, "not json"), Receipt::Malformed);
        assert_eq!(session.on_message(conn, r#"{"sender":"x"}"#), Receipt::Malformed);
        assert!(session.messages().is_empty());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn close_schedules_exactly_one_reconnect() {
        let (mut session, conn) = connected();
        let effects = session.on_close(conn);
        let tokens = schedules(&effects);
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            effects,
            vec![ChatEffect::ScheduleReconnect {
                token: tokens[0],
                delay: DELAY
            }]
        );
        assert!(session.is_reconnecting());
        assert_eq!(session.error(), Some(RECONNECTING_MESSAGE));

        // A second close for the same connection changes nothing.
        assert!(session.on_close(conn).is_empty());

        let effects = session.on_retry_due(tokens[0]);
        assert!(matches!(effects.as_slice(), [ChatEffect::Open(next)] if *next != conn));
        assert_eq!(session.status(), ChatStatus::Connecting);

        // The same timer cannot fire twice.
        assert!(session.on_retry_due(tokens[0]).is_empty());
    }

    #[test]
    fn no_reconnect_while_open_or_connecting() {
        let mut session = ChatSession::new(DELAY);
        let first = session.mount();
        assert_eq!(first.len(), 1);
        // Concurrent mount while connecting is suppressed.
        assert!(session.mount().is_empty());

        let conn = session.current_connection().unwrap();
        session.on_open(conn);
        assert!(session.mount().is_empty());
        assert!(session.on_retry_due(RetryToken(0)).is_empty());
        assert_eq!(session.status(), ChatStatus::Connected);
    }

    #[test]
    fn failed_attempt_retries_again() {
        let mut session = ChatSession::new(DELAY);
        session.mount();
        let conn = session.current_connection().unwrap();
        session.on_error(conn, "refused");
        assert_eq!(session.error(), Some(CONNECTION_ERROR_MESSAGE));
        let tokens = schedules(&session.on_close(conn));
        assert_eq!(tokens.len(), 1);

        let retry = session.on_retry_due(tokens[0]);
        let ChatEffect::Open(second) = retry[0] else {
            panic!("expected open");
        };
        let tokens = schedules(&session.on_close(second));
        assert_eq!(tokens.len(), 1, "retries are unbounded");
    }

    #[test]
    fn open_clears_the_error() {
        let mut session = ChatSession::new(DELAY);
        session.mount();
        let conn = session.current_connection().unwrap();
        session.on_error(conn, "boom");
        session.on_open(conn);
        assert_eq!(session.error(), None);
        assert_eq!(session.status(), ChatStatus::Connected);
    }

    #[test]
    fn publish_noops() {
        let mut session = ChatSession::new(DELAY);
        assert_eq!(session.publish("hi", Some("ana")), None, "disconnected");

        session.mount();
        assert_eq!(session.publish("hi", Some("ana")), None, "still connecting");

        let conn = session.current_connection().unwrap();
        session.on_open(conn);
        assert_eq!(session.publish("   \n", Some("ana")), None);
        assert_eq!(session.publish("", Some("ana")), None);
        assert_eq!(session.publish("hi", None), None);
        assert_eq!(session.publish("hi", Some("  ")), None);

        assert_eq!(
            session.publish("  hi there ", Some("ana")),
            Some(ChatEffect::Transmit(OutgoingChatMessage {
                content: "hi there".into(),
                sender: "ana".into(),
            }))
        );
        // No optimistic render.
        assert!(session.messages().is_empty());
    }

    #[test]
    fn publish_failure_is_visible() {
        let (mut session, _) = connected();
        session.on_publish_failed("HTTP 500");
        assert_eq!(session.error(), Some(SEND_FAILED_MESSAGE));
        assert!(session.status().is_connected());
    }

    #[test]
    fn unmount_is_idempotent_and_cancels_timer() {
        let mut session = ChatSession::new(DELAY);
        assert!(session.unmount().is_empty(), "never connected");
        assert!(session.unmount().is_empty());

        let (mut session, conn) = connected();
        let tokens = schedules(&session.on_close(conn));
        assert_eq!(session.unmount(), vec![ChatEffect::CancelReconnect(tokens[0])]);
        assert!(session.unmount().is_empty());
        assert!(session.on_retry_due(tokens[0]).is_empty());
        assert!(!session.is_reconnecting());
    }

    #[test]
    fn unmount_closes_live_connection() {
        let (mut session, conn) = connected();
        assert_eq!(session.unmount(), vec![ChatEffect::Close(conn)]);
        assert_eq!(session.status(), ChatStatus::Disconnected);
        // Late close from the torn-down socket does not schedule anything.
        assert!(session.on_close(conn).is_empty());
    }

    #[test]
    fn remount_starts_clean() {
        let mut session = ChatSession::new(DELAY);
        session.mount();
        let stale = session.current_connection().unwrap();
        session.unmount();

        let effects = session.mount();
        let ChatEffect::Open(fresh) = effects[0] else {
            panic!("expected open");
        };
        assert_ne!(stale, fresh);
        assert_eq!(session.on_open(stale), vec![ChatEffect::Close(stale)]);
        assert_eq!(session.status(), ChatStatus::Connecting);
        assert_eq!(session.on_message(stale, &record(1, "t")), Receipt::Stale);
    }

    #[test]
    fn mount_pulls_pending_retry_forward() {
        let (mut session, conn) = connected();
        let tokens = schedules(&session.on_close(conn));
        let effects = session.mount();
        assert_eq!(effects[0], ChatEffect::CancelReconnect(tokens[0]));
        assert!(matches!(effects[1], ChatEffect::Open(_)));
        assert!(session.on_retry_due(tokens[0]).is_empty());
    }

    #[test]
    fn snapshot_reflects_state() {
        let (mut session, conn) = connected();
        session.on_message(conn, &record(7, "t"));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.status, ChatStatus::Connected);
        assert!(!snapshot.reconnecting);
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.status.label(), "Connected");
    }
}
