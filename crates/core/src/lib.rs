//! Agora client core
//!
//! Everything the client does that is not rendering: configuration,
//! logging, session persistence, the REST client, form flows and the
//! global chat connection. Free of any UI framework so it builds and tests
//! natively.

pub mod logging;

pub mod api_client;
pub mod chat;
pub mod config;
pub mod forms;
pub mod runtime;
pub mod session;
pub mod storage;

pub use api_client::{ApiClient, AuthApi, CommentsApi, CommunitiesApi, PostsApi, UsersApi};
pub use config::{ChatConfig, ClientConfig};
pub use forms::FormError;
pub use session::{Session, SessionStore};
pub use storage::{KeyValueStore, MemoryStorage, PlatformStorage};
