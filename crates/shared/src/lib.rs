//! Shared types and utilities for the agora client crates.

pub mod error;
pub mod models;
pub mod protocol;
pub mod time;
pub mod validation;

pub use error::*;
pub use models::*;
pub use protocol::*;
pub use time::{format_clock, format_timestamp};
pub use validation::*;
