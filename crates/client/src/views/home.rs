use agora_core::PostsApi;
use dioxus::prelude::*;

use super::load_error;
use crate::auth_session::SessionContext;
use crate::components::ui::{ErrorBox, Spinner};
use crate::components::{GlobalChat, PostSummary};
use crate::Route;

#[component]
pub fn Home() -> Element {
    let ctx = use_context::<SessionContext>();
    let posts = use_resource(move || async move { ctx.api().list_posts().await });

    rsx! {
        div { class: "flex",
            main { class: "flex-1 max-w-3xl mx-auto px-6 py-6",
                div { class: "flex items-center justify-between mb-4",
                    h1 { class: "text-2xl font-bold text-white", "Latest posts" }
                    if ctx.is_authenticated() {
                        Link {
                            to: Route::PostCreation {},
                            class: "px-3 py-1.5 rounded-md bg-indigo-600 text-sm text-white hover:bg-indigo-500",
                            "Create post"
                        }
                    }
                }
                {match &*posts.read() {
                    None => rsx! { Spinner { label: "Loading posts...".to_string() } },
                    Some(Err(e)) => rsx! { ErrorBox { message: load_error("posts", e) } },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        p { class: "text-gray-400", "No posts yet." }
                    },
                    Some(Ok(list)) => rsx! {
                        div { class: "space-y-3",
                            for post in list.iter().cloned() {
                                PostSummary { key: "{post.id}", post }
                            }
                        }
                    },
                }}
            }
            GlobalChat {}
        }
    }
}
