use agora_core::{CommentsApi, PostsApi, UsersApi};
use agora_shared::{format_timestamp, Id};
use dioxus::prelude::*;

use super::load_error;
use crate::auth_session::SessionContext;
use crate::components::ui::{ErrorBox, Panel, Spinner};
use crate::components::PostSummary;
use crate::Route;

#[component]
pub fn UserProfile(user_id: Id) -> Element {
    let ctx = use_context::<SessionContext>();

    let info = use_resource(use_reactive((&user_id,), move |(user_id,)| async move {
        ctx.api().user_info(user_id).await
    }));
    let posts = use_resource(use_reactive((&user_id,), move |(user_id,)| async move {
        ctx.api().posts_by_user(user_id).await
    }));
    let comments = use_resource(use_reactive((&user_id,), move |(user_id,)| async move {
        ctx.api().comments_by_user(user_id).await
    }));

    let own_profile = ctx.user_id() == Some(user_id);

    rsx! {
        div { class: "max-w-3xl mx-auto px-6 py-6 space-y-6",
            {match &*info.read() {
                None => rsx! { Spinner { label: "Loading profile...".to_string() } },
                Some(Err(e)) => rsx! { ErrorBox { message: load_error("user", e) } },
                Some(Ok(user)) => rsx! {
                    div { class: "flex items-center justify-between",
                        div {
                            h1 { class: "text-2xl font-bold text-white", "{user.username}" }
                            if let Some(email) = &user.email {
                                p { class: "text-sm text-gray-400", "{email}" }
                            }
                        }
                        if own_profile {
                            Link {
                                to: Route::PostCreation {},
                                class: "px-3 py-1.5 rounded-md bg-indigo-600 text-sm text-white hover:bg-indigo-500",
                                "Create post"
                            }
                        }
                    }
                },
            }}

            section {
                h2 { class: "text-lg font-semibold text-white mb-2", "Posts" }
                {match &*posts.read() {
                    None => rsx! { Spinner {} },
                    Some(Err(e)) => rsx! { ErrorBox { message: load_error("posts", e) } },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        p { class: "text-sm text-gray-400", "No posts yet." }
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

            section {
                h2 { class: "text-lg font-semibold text-white mb-2", "Comments" }
                {match &*comments.read() {
                    None => rsx! { Spinner {} },
                    Some(Err(e)) => rsx! { ErrorBox { message: load_error("comments", e) } },
                    Some(Ok(list)) if list.is_empty() => rsx! {
                        p { class: "text-sm text-gray-400", "No comments yet." }
                    },
                    Some(Ok(list)) => {
                        let rows: Vec<_> = list
                            .iter()
                            .map(|c| (c.clone(), format_timestamp(&c.creation_time)))
                            .collect();
                        rsx! {
                            Panel { flush: true,
                                for (comment, posted) in rows {
                                    div { key: "{comment.id}", class: "py-3 border-b border-[#3f4147] last:border-b-0",
                                        p { class: "text-sm text-gray-200 line-clamp-2", "{comment.body}" }
                                        div { class: "flex gap-3 text-xs text-gray-500",
                                            span { "{posted}" }
                                            if let Some(post_id) = comment.post_id {
                                                Link {
                                                    to: Route::PostPage { id: post_id },
                                                    class: "text-indigo-400 hover:underline",
                                                    "View post"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }}
            }
        }
    }
}
