//! Chat wire protocols: raw JSON records and STOMP 1.2 frames.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::ChatMessage;

/// How the chat socket frames its traffic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatProtocol {
    /// Every text frame is a JSON chat record. Publishing goes over HTTP.
    #[default]
    Raw,
    /// STOMP over WebSocket: subscribe to a topic, publish with SEND.
    Stomp,
}

impl FromStr for ChatProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "ws" | "websocket" => Ok(ChatProtocol::Raw),
            "stomp" => Ok(ChatProtocol::Stomp),
            other => Err(format!("unknown chat protocol: {other}")),
        }
    }
}

/// Parse a chat record from an inbound payload.
pub fn parse_chat_record(payload: &str) -> Result<ChatMessage, serde_json::Error> {
    serde_json::from_str(payload)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StompError {
    #[error("missing NUL terminator")]
    MissingTerminator,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("malformed header line: {0}")]
    MalformedHeader(String),
    #[error("invalid header escape in: {0}")]
    BadEscape(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StompCommand {
    Connect,
    Connected,
    Subscribe,
    Unsubscribe,
    Send,
    Message,
    Receipt,
    Error,
    Disconnect,
}

impl StompCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            StompCommand::Connect => "CONNECT",
            StompCommand::Connected => "CONNECTED",
            StompCommand::Subscribe => "SUBSCRIBE",
            StompCommand::Unsubscribe => "UNSUBSCRIBE",
            StompCommand::Send => "SEND",
            StompCommand::Message => "MESSAGE",
            StompCommand::Receipt => "RECEIPT",
            StompCommand::Error => "ERROR",
            StompCommand::Disconnect => "DISCONNECT",
        }
    }

    /// CONNECT and CONNECTED frames carry unescaped headers.
    fn escapes_headers(self) -> bool {
        !matches!(self, StompCommand::Connect | StompCommand::Connected)
    }
}

impl FromStr for StompCommand {
    type Err = StompError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CONNECT" | "STOMP" => StompCommand::Connect,
            "CONNECTED" => StompCommand::Connected,
            "SUBSCRIBE" => StompCommand::Subscribe,
            "UNSUBSCRIBE" => StompCommand::Unsubscribe,
            "SEND" => StompCommand::Send,
            "MESSAGE" => StompCommand::Message,
            "RECEIPT" => StompCommand::Receipt,
            "ERROR" => StompCommand::Error,
            "DISCONNECT" => StompCommand::Disconnect,
            other => return Err(StompError::UnknownCommand(other.to_string())),
        })
    }
}

impl fmt::Display for StompCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single STOMP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StompFrame {
    pub command: StompCommand,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl StompFrame {
    pub fn new(command: StompCommand) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn connect(host: &str) -> Self {
        Self::new(StompCommand::Connect)
            .with_header("accept-version", "1.2")
            .with_header("host", host)
            .with_header("heart-beat", "0,0")
    }

    pub fn subscribe(id: &str, destination: &str) -> Self {
        Self::new(StompCommand::Subscribe)
            .with_header("id", id)
            .with_header("destination", destination)
            .with_header("ack", "auto")
    }

    pub fn send_json(destination: &str, json: String) -> Self {
        Self::new(StompCommand::Send)
            .with_header("destination", destination)
            .with_header("content-type", "application/json")
            .with_body(json)
    }

    pub fn disconnect() -> Self {
        Self::new(StompCommand::Disconnect)
    }

    /// First value of a header. Repeated headers keep the first occurrence.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn encode(&self) -> String {
        let escape = self.command.escapes_headers();
        let mut out = String::with_capacity(64 + self.body.len());
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if escape {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        if !self.body.is_empty() && self.header("content-length").is_none() {
            out.push_str(&format!("content-length:{}\n", self.body.len()));
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Decode one frame from a WebSocket text message.
    ///
    /// Returns `Ok(None)` for a heart-beat (a message holding only EOLs).
    pub fn decode(text: &str) -> Result<Option<Self>, StompError> {
        let text = text.trim_start_matches(['\r', '\n']);
        if text.is_empty() {
            return Ok(None);
        }

        let (head, rest) = match split_head(text) {
            Some(parts) => parts,
            None => {
                let head = text.strip_suffix('\0').ok_or(StompError::MissingTerminator)?;
                (head.trim_end_matches(['\r', '\n']), "\0")
            }
        };

        let mut lines = head.lines().map(|l| l.trim_end_matches('\r'));
        let command: StompCommand = lines.next().unwrap_or_default().parse()?;
        let unescape = command.escapes_headers();

        let mut headers = Vec::new();
        for line in lines {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| StompError::MalformedHeader(line.to_string()))?;
            if unescape {
                headers.push((unescape_header(name)?, unescape_header(value)?));
            } else {
                headers.push((name.to_string(), value.to_string()));
            }
        }

        let body = match rest.find('\0') {
            Some(end) => &rest[..end],
            None => return Err(StompError::MissingTerminator),
        };

        Ok(Some(Self {
            command,
            headers,
            body: body.to_string(),
        }))
    }
}

/// Split at the first blank line. Each EOL may be `\n` or `\r\n`, and the
/// body may contain blank lines of its own.
fn split_head(text: &str) -> Option<(&str, &str)> {
    text.match_indices('\n').find_map(|(idx, _)| {
        let after = &text[idx + 1..];
        let skip = if after.starts_with('\n') {
            1
        } else if after.starts_with("\r\n") {
            2
        } else {
            return None;
        };
        Some((text[..idx].trim_end_matches('\r'), &after[skip..]))
    })
}

fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            ':' => out.push_str("\\c"),
            c => out.push(c),
        }
    }
    out
}

fn unescape_header(raw: &str) -> Result<String, StompError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('c') => out.push(':'),
            _ => return Err(StompError::BadEscape(raw.to_string())),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_subscribe() {
        let frame = StompFrame::subscribe("sub-0", "/topic/public");
        assert_eq!(
            frame.encode(),
            "SUBSCRIBE\nid:sub-0\ndestination:/topic/public\nack:auto\n\n\0"
        );
    }

    #[test]
    fn send_frame_carries_content_length() {
        let encoded = StompFrame::send_json("/app/chat.send", "{\"a\":1}".to_string()).encode();
        assert!(encoded.contains("content-length:7\n"));
        assert!(encoded.ends_with("\n\n{\"a\":1}\0"));
    }

    #[test]
    fn decodes_message_frame() {
        let text = "MESSAGE\ndestination:/topic/public\nmessage-id:1\nsubscription:sub-0\n\n{\"id\":1,\"sender\":\"a\",\"content\":\"b\",\"timestamp\":\"t\"}\0";
        let frame = StompFrame::decode(text).unwrap().unwrap();
        assert_eq!(frame.command, StompCommand::Message);
        assert_eq!(frame.header("subscription"), Some("sub-0"));
        let record = parse_chat_record(&frame.body).unwrap();
        assert_eq!(record.id, 1);
    }

    #[test]
    fn decodes_connected_without_body() {
        let frame = StompFrame::decode("CONNECTED\nversion:1.2\n\n\0").unwrap().unwrap();
        assert_eq!(frame.command, StompCommand::Connected);
        assert_eq!(frame.header("version"), Some("1.2"));
        assert!(frame.body.is_empty());
    }

    #[test]
    fn crlf_frame_with_blank_line_in_body() {
        let text = "MESSAGE\r\ndestination:/topic/public\r\n\r\nfirst\n\nsecond\0";
        let frame = StompFrame::decode(text).unwrap().unwrap();
        assert_eq!(frame.command, StompCommand::Message);
        assert_eq!(frame.header("destination"), Some("/topic/public"));
        assert_eq!(frame.body, "first\n\nsecond");

        let text = "MESSAGE\ndestination:/q\n\nbody\r\n\r\nmore\0";
        let frame = StompFrame::decode(text).unwrap().unwrap();
        assert_eq!(frame.header("destination"), Some("/q"));
        assert_eq!(frame.body, "body\r\n\r\nmore");
    }

    #[test]
    fn heartbeat_is_not_a_frame() {
        assert_eq!(StompFrame::decode("\n").unwrap(), None);
        assert_eq!(StompFrame::decode("\r\n\r\n").unwrap(), None);
    }

    #[test]
    fn header_escapes_survive_decoding() {
        let frame = StompFrame::new(StompCommand::Error).with_header("message", "bad:thing\nhere");
        let decoded = StompFrame::decode(&frame.encode()).unwrap().unwrap();
        assert_eq!(decoded.header("message"), Some("bad:thing\nhere"));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            StompFrame::decode("HELLO\n\n\0"),
            Err(StompError::UnknownCommand("HELLO".into()))
        );
        assert_eq!(
            StompFrame::decode("MESSAGE\n\nbody without terminator"),
            Err(StompError::MissingTerminator)
        );
    }

    #[test]
    fn protocol_names() {
        assert_eq!("STOMP".parse::<ChatProtocol>(), Ok(ChatProtocol::Stomp));
        assert_eq!("ws".parse::<ChatProtocol>(), Ok(ChatProtocol::Raw));
        assert!("carrier-pigeon".parse::<ChatProtocol>().is_err());
    }
}
