//! Agora Client - Dioxus web application
//!
//! This crate contains the web/desktop client for agora: forum pages,
//! communities, comments and the global chat sidebar. Everything below the
//! view layer lives in `agora-core`.

pub mod auth_session;
pub mod components;
pub mod routes;
pub mod views;

pub use agora_core::{log_debug, log_error, log_info, log_warn};
pub use auth_session::{SessionContext, SessionProvider};
pub use routes::Route;
