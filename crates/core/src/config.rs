//! Client configuration from environment variables.
//!
//! Natively the variables are read at runtime; in the browser there is no
//! process environment, so they are baked in at compile time.
//!
//! Environment variables:
//! - `AGORA_API_URL`: forum service (default: "http://localhost:8080")
//! - `AGORA_AUTH_URL`: auth service (default: "http://localhost:8081")
//! - `AGORA_CHAT_URL`: chat HTTP publish base (default: "http://localhost:8082")
//! - `AGORA_CHAT_WS_URL`: chat socket (default: "ws://localhost:8082/ws")
//! - `AGORA_CHAT_PROTOCOL`: "raw" | "stomp" (default: "raw")
//! - `AGORA_CHAT_TOPIC`: STOMP topic (default: "/topic/public")
//! - `AGORA_CHAT_DESTINATION`: STOMP publish destination (default: "/app/chat.send")
//! - `AGORA_RECONNECT_DELAY_MS`: fixed reconnect delay (default: 3000)

use std::time::Duration;

use agora_shared::ChatProtocol;
use url::Url;

use crate::chat::ChatError;

pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub auth_base_url: String,
    pub chat: ChatConfig,
}

/// Chat socket settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    pub base_url: String,
    pub ws_url: String,
    pub protocol: ChatProtocol,
    pub topic: String,
    pub send_destination: String,
    pub reconnect_delay: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".to_string(),
            ws_url: "ws://localhost:8082/ws".to_string(),
            protocol: ChatProtocol::Raw,
            topic: "/topic/public".to_string(),
            send_destination: "/app/chat.send".to_string(),
            reconnect_delay: Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            auth_base_url: "http://localhost:8081".to_string(),
            chat: ChatConfig::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(read_var)
    }

    /// Build a config from an arbitrary variable source. Unset, blank or
    /// unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = var("AGORA_API_URL") {
            config.api_base_url = trim_base(&v);
        }
        if let Some(v) = var("AGORA_AUTH_URL") {
            config.auth_base_url = trim_base(&v);
        }
        if let Some(v) = var("AGORA_CHAT_URL") {
            config.chat.base_url = trim_base(&v);
        }
        if let Some(v) = var("AGORA_CHAT_WS_URL") {
            match parse_ws_url(&v) {
                Ok(url) => config.chat.ws_url = url,
                Err(e) => crate::log_warn!("ignoring AGORA_CHAT_WS_URL: {}", e),
            }
        }
        if let Some(v) = var("AGORA_CHAT_PROTOCOL") {
            match v.parse() {
                Ok(protocol) => config.chat.protocol = protocol,
                Err(e) => crate::log_warn!("ignoring AGORA_CHAT_PROTOCOL: {}", e),
            }
        }
        if let Some(v) = var("AGORA_CHAT_TOPIC") {
            config.chat.topic = v.trim().to_string();
        }
        if let Some(v) = var("AGORA_CHAT_DESTINATION") {
            config.chat.send_destination = v.trim().to_string();
        }
        if let Some(v) = var("AGORA_RECONNECT_DELAY_MS") {
            match v.trim().parse::<u64>() {
                Ok(ms) => config.chat.reconnect_delay = Duration::from_millis(ms),
                Err(_) => crate::log_warn!("ignoring AGORA_RECONNECT_DELAY_MS={}", v),
            }
        }

        config
    }
}

fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Accepts only absolute `ws://` or `wss://` URLs.
pub fn parse_ws_url(raw: &str) -> Result<String, ChatError> {
    let raw = raw.trim();
    let invalid = |reason: String| ChatError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "ws" | "wss" => Ok(raw.to_string()),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

/// Join a base URL and an absolute path.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if base.is_empty() {
        format!("/{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

#[cfg(target_arch = "wasm32")]
fn read_var(name: &str) -> Option<String> {
    let value = match name {
        "AGORA_API_URL" => option_env!("AGORA_API_URL"),
        "AGORA_AUTH_URL" => option_env!("AGORA_AUTH_URL"),
        "AGORA_CHAT_URL" => option_env!("AGORA_CHAT_URL"),
        "AGORA_CHAT_WS_URL" => option_env!("AGORA_CHAT_WS_URL"),
        "AGORA_CHAT_PROTOCOL" => option_env!("AGORA_CHAT_PROTOCOL"),
        "AGORA_CHAT_TOPIC" => option_env!("AGORA_CHAT_TOPIC"),
        "AGORA_CHAT_DESTINATION" => option_env!("AGORA_CHAT_DESTINATION"),
        "AGORA_RECONNECT_DELAY_MS" => option_env!("AGORA_RECONNECT_DELAY_MS"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_match_local_services() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.chat.reconnect_delay, Duration::from_secs(3));
        assert_eq!(config.chat.protocol, ChatProtocol::Raw);
    }

    #[test]
    fn overrides_apply_and_bad_values_are_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("AGORA_API_URL", "https://forum.example.com/"),
            ("AGORA_CHAT_PROTOCOL", "stomp"),
            ("AGORA_RECONNECT_DELAY_MS", "soon"),
            ("AGORA_AUTH_URL", "   "),
        ]));
        assert_eq!(config.api_base_url, "https://forum.example.com");
        assert_eq!(config.chat.protocol, ChatProtocol::Stomp);
        assert_eq!(config.chat.reconnect_delay, Duration::from_secs(3));
        assert_eq!(config.auth_base_url, "http://localhost:8081");
    }

    #[test]
    fn chat_socket_url_must_be_websocket() {
        assert_eq!(
            parse_ws_url(" wss://chat.example.com/ws ").as_deref(),
            Ok("wss://chat.example.com/ws")
        );
        assert!(matches!(
            parse_ws_url("http://chat.example.com/ws"),
            Err(ChatError::InvalidUrl { .. })
        ));
        assert!(matches!(parse_ws_url("not a url"), Err(ChatError::InvalidUrl { .. })));

        let config = ClientConfig::from_lookup(lookup(&[("AGORA_CHAT_WS_URL", "localhost:9/ws")]));
        assert_eq!(config.chat.ws_url, "ws://localhost:8082/ws");
        let config =
            ClientConfig::from_lookup(lookup(&[("AGORA_CHAT_WS_URL", "ws://10.0.0.2:9000/ws")]));
        assert_eq!(config.chat.ws_url, "ws://10.0.0.2:9000/ws");
    }

    #[test]
    fn joins_urls() {
        assert_eq!(join_url("http://h:1/", "/posts/3"), "http://h:1/posts/3");
        assert_eq!(join_url("http://h:1", "api/posts"), "http://h:1/api/posts");
        assert_eq!(join_url("", "/send"), "/send");
        assert_eq!(join_url("http://h", "https://other/x"), "https://other/x");
    }
}
