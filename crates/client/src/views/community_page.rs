use agora_core::CommunitiesApi;
use agora_shared::{Community, Id, Post};
use dioxus::prelude::*;

use super::load_error;
use crate::auth_session::SessionContext;
use crate::components::ui::{confirm, Button, ButtonVariant, ErrorBox, Spinner};
use crate::components::PostSummary;
use crate::Route;

#[component]
pub fn CommunityPage(id: Id) -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut community = use_signal(|| None::<Community>);
    let mut posts = use_signal(Vec::<Post>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);

    use_effect(use_reactive((&id,), move |(id,)| {
        loading.set(true);
        spawn(async move {
            let api = ctx.api();
            match api.get_community(id).await {
                Ok(c) => {
                    community.set(Some(c));
                    error.set(None);
                }
                Err(e) => {
                    community.set(None);
                    error.set(Some(load_error("community", &e)));
                }
            }
            match api.community_posts(id).await {
                Ok(list) => posts.set(list),
                Err(e) => error.set(Some(load_error("posts", &e))),
            }
            loading.set(false);
        });
    }));

    if loading() {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-6 py-6", Spinner { label: "Loading community...".to_string() } }
        };
    }

    let Some(current) = community.cloned() else {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-6 py-6",
                ErrorBox { message: error.cloned().unwrap_or_else(|| "Community not found".to_string()) }
                Link { to: Route::Communities {}, class: "text-indigo-400 hover:text-indigo-300", "Back to communities" }
            }
        };
    };

    let is_creator = match (current.creator_id, ctx.user_id()) {
        (Some(creator), Some(user)) => creator == user,
        _ => false,
    };

    let delete_community = move |_: MouseEvent| {
        spawn(async move {
            if !confirm("Are you sure you want to delete this community?").await {
                return;
            }
            match ctx.api().delete_community(id).await {
                Ok(()) => {
                    nav.push(Route::Communities {});
                }
                Err(e) => {
                    crate::log_error!("Failed to delete community {}: {}", id, e);
                    error.set(Some("Failed to delete community".to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "max-w-3xl mx-auto px-6 py-6 space-y-4",
            if let Some(message) = error.cloned() {
                ErrorBox { message }
            }

            div { class: "flex items-start justify-between gap-4",
                div {
                    h1 { class: "text-2xl font-bold text-white", "{current.name}" }
                    p { class: "mt-1 text-gray-400", "{current.description}" }
                }
                div { class: "flex gap-2 shrink-0",
                    if ctx.is_authenticated() {
                        Link {
                            to: Route::PostCreation {},
                            class: "px-3 py-1.5 rounded-md bg-indigo-600 text-sm text-white hover:bg-indigo-500",
                            "Create post"
                        }
                    }
                    if is_creator {
                        Button { variant: ButtonVariant::Danger, onclick: delete_community, "Delete" }
                    }
                }
            }

            if posts.read().is_empty() {
                p { class: "text-gray-400", "No posts in this community yet." }
            }
            div { class: "space-y-3",
                for post in posts.read().iter().cloned() {
                    PostSummary { key: "{post.id}", post }
                }
            }
        }
    }
}
