mod communities;
mod community_creation;
mod community_page;
mod home;
mod login;
mod not_found;
mod post_creation;
mod post_page;
mod register;
mod shell;
mod user_profile;

pub use communities::Communities;
pub use community_creation::CommunityCreation;
pub use community_page::CommunityPage;
pub use home::Home;
pub use login::Login;
pub use not_found::NotFound;
pub use post_creation::PostCreation;
pub use post_page::PostPage;
pub use register::Register;
pub use shell::Shell;
pub use user_profile::UserProfile;

use agora_shared::ApiError;
use dioxus::prelude::*;

/// Log a failed read and turn it into the inline message for the page.
pub(crate) fn load_error(what: &str, error: &ApiError) -> String {
    crate::log_error!("Failed to load {}: {}", what, error);
    match error.server_message() {
        Some(message) => format!("Failed to load {what}: {message}"),
        None => format!("Failed to load {what}."),
    }
}

/// Rows to show for a list read, and the error to show alongside them.
pub(crate) fn load_list<T>(what: &str, result: Result<Vec<T>, ApiError>) -> (Vec<T>, Option<String>) {
    match result {
        Ok(rows) => (rows, None),
        Err(e) => (Vec::new(), Some(load_error(what, &e))),
    }
}

/// Copy form inputs out of their signals. Submit handlers must not hold a
/// read guard across an await, or typing during the request panics.
pub(crate) fn field_values<const N: usize>(fields: [Signal<String>; N]) -> [String; N] {
    fields.map(|field| field.cloned())
}
