//! Loading and error states.

use dioxus::prelude::*;

/// Red-bordered inline message.
#[component]
pub fn ErrorBox(message: String) -> Element {
    rsx! {
        div { class: "my-3 p-3 bg-red-500/10 border border-red-500/40 rounded-md",
            p { class: "text-sm text-red-400", "{message}" }
        }
    }
}

#[component]
pub fn Spinner(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div { class: "flex items-center gap-2 py-6 text-gray-400",
            div { class: "w-4 h-4 border-2 border-gray-500 border-t-indigo-400 rounded-full animate-spin" }
            span { class: "text-sm", "{label}" }
        }
    }
}

/// Ask the user to confirm a destructive action.
pub async fn confirm(message: &str) -> bool {
    let quoted = serde_json::to_string(message).unwrap_or_else(|_| "\"Are you sure?\"".to_string());
    match document::eval(&format!("return window.confirm({quoted});"))
        .join::<bool>()
        .await
    {
        Ok(confirmed) => confirmed,
        Err(e) => {
            crate::log_warn!("confirm dialog failed: {:?}", e);
            false
        }
    }
}
