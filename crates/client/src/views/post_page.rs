//! Single post with its comments.

use agora_core::{forms, CommentsApi, PostsApi};
use agora_shared::{format_timestamp, Comment, Id, Post};
use dioxus::prelude::*;

use super::{load_error, load_list};
use crate::auth_session::SessionContext;
use crate::components::ui::{
    confirm, Button, ButtonVariant, ErrorBox, Field, Panel, Spinner, TextArea, TextInput,
};
use crate::components::CommentItem;
use crate::Route;

#[component]
pub fn PostPage(id: Id) -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut post = use_signal(|| None::<Post>);
    let mut comments = use_signal(Vec::<Comment>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut comments_error = use_signal(|| None::<String>);

    // Post editing
    let mut editing = use_signal(|| false);
    let mut edit_title = use_signal(String::new);
    let mut edit_body = use_signal(String::new);
    let mut edit_error = use_signal(|| None::<String>);

    // New comment
    let mut comment_draft = use_signal(String::new);
    let mut comment_error = use_signal(|| None::<String>);
    let mut posting_comment = use_signal(|| false);

    let reload_comments = move || {
        spawn(async move {
            let (list, failure) = load_list("comments", ctx.api().list_comments(id).await);
            comments.set(list);
            comments_error.set(failure);
        });
    };

    use_effect(use_reactive((&id,), move |(id,)| {
        loading.set(true);
        editing.set(false);
        spawn(async move {
            let api = ctx.api();
            match api.get_post(id).await {
                Ok(p) => {
                    post.set(Some(p));
                    error.set(None);
                }
                Err(e) => {
                    post.set(None);
                    error.set(Some(load_error("post", &e)));
                }
            }
            let (list, failure) = load_list("comments", api.list_comments(id).await);
            comments.set(list);
            comments_error.set(failure);
            loading.set(false);
        });
    }));

    if loading() {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-6 py-6", Spinner { label: "Loading post...".to_string() } }
        };
    }

    let Some(current) = post.cloned() else {
        return rsx! {
            div { class: "max-w-3xl mx-auto px-6 py-6",
                ErrorBox { message: error.cloned().unwrap_or_else(|| "Post not found".to_string()) }
                Link { to: Route::Home {}, class: "text-indigo-400 hover:text-indigo-300", "Back to home" }
            }
        };
    };

    let session = ctx.get_session();
    let user_id = session.as_ref().map(|s| s.user_id);
    let username = session.as_ref().map(|s| s.username.clone());
    let can_manage = current.can_be_managed_by(user_id, username.as_deref());
    let posted = format_timestamp(&current.creation_time);
    let community_label = current
        .community_name
        .clone()
        .unwrap_or_else(|| "community".to_string());

    let start_edit = {
        let current = current.clone();
        move |_: MouseEvent| {
            edit_title.set(current.title.clone());
            edit_body.set(current.body.clone());
            edit_error.set(None);
            editing.set(true);
        }
    };

    let save_edit = move |_: MouseEvent| {
        spawn(async move {
            let title = edit_title.read().clone();
            let body = edit_body.read().clone();
            match forms::edit_post(&ctx.api(), id, &title, &body).await {
                Ok(update) => {
                    post.with_mut(|p| {
                        if let Some(p) = p.as_mut() {
                            p.title = update.title;
                            p.body = update.body;
                        }
                    });
                    editing.set(false);
                }
                Err(e) => {
                    crate::log_error!("Failed to update post {}: {}", id, e);
                    edit_error.set(Some(e.inline_message("Failed to update post")));
                }
            }
        });
    };

    let delete_post = move |_: MouseEvent| {
        spawn(async move {
            if !confirm("Are you sure you want to delete this post?").await {
                return;
            }
            match ctx.api().delete_post(id).await {
                Ok(()) => {
                    nav.push(Route::Home {});
                }
                Err(e) => {
                    crate::log_error!("Failed to delete post {}: {}", id, e);
                    error.set(Some("Failed to delete post".to_string()));
                }
            }
        });
    };

    let comment_rows: Vec<(Comment, bool)> = comments
        .read()
        .iter()
        .map(|c| (c.clone(), c.can_be_managed_by(user_id, username.as_deref())))
        .collect();
    let comment_count = comment_rows.len();

    rsx! {
        div { class: "max-w-3xl mx-auto px-6 py-6 space-y-6",
            if let Some(message) = error.cloned() {
                ErrorBox { message }
            }

            Panel {
                if editing() {
                    div { class: "space-y-3",
                        Field { label: "Title".to_string(), html_for: "edit-title".to_string(),
                            TextInput {
                                id: "edit-title".to_string(),
                                value: edit_title.cloned(),
                                oninput: move |e: FormEvent| edit_title.set(e.value()),
                            }
                        }
                        Field { label: "Body".to_string(), html_for: "edit-body".to_string(),
                            TextArea {
                                id: "edit-body".to_string(),
                                value: edit_body.cloned(),
                                rows: 8,
                                oninput: move |e: FormEvent| edit_body.set(e.value()),
                            }
                        }
                        if let Some(message) = edit_error.cloned() {
                            ErrorBox { message }
                        }
                        div { class: "flex gap-2",
                            Button { onclick: save_edit, "Save" }
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| editing.set(false),
                                "Cancel"
                            }
                        }
                    }
                } else {
                    div { class: "flex items-start justify-between gap-4",
                        h1 { class: "text-2xl font-bold text-white", "{current.title}" }
                        if can_manage {
                            div { class: "flex gap-2 shrink-0",
                                Button { variant: ButtonVariant::Secondary, onclick: start_edit, "Edit" }
                                Button { variant: ButtonVariant::Danger, onclick: delete_post, "Delete" }
                            }
                        }
                    }
                    div { class: "mt-1 flex flex-wrap gap-x-3 text-xs text-gray-400",
                        {match current.author_id {
                            Some(author_id) => rsx! {
                                Link {
                                    to: Route::UserProfile { user_id: author_id },
                                    class: "hover:underline",
                                    "by {current.author_username}"
                                }
                            },
                            None => rsx! { span { "by {current.author_username}" } },
                        }}
                        if let Some(community_id) = current.community_id {
                            Link {
                                to: Route::CommunityPage { id: community_id },
                                class: "hover:underline",
                                "in {community_label}"
                            }
                        }
                        span { "{posted}" }
                    }
                    p { class: "mt-4 text-gray-200 whitespace-pre-wrap", "{current.body}" }
                }
            }

            section {
                h2 { class: "text-lg font-semibold text-white mb-2", "Comments ({comment_count})" }

                if let Some(message) = comments_error.cloned() {
                    ErrorBox { message }
                }

                if ctx.is_authenticated() {
                    form {
                        class: "mb-4 space-y-2",
                        onsubmit: move |e| async move {
                            e.prevent_default();
                            if posting_comment() {
                                return;
                            }
                            posting_comment.set(true);
                            comment_error.set(None);

                            let body = comment_draft.read().clone();
                            let session = ctx.get_session();
                            match forms::add_comment(&ctx.api(), session.as_ref(), id, &body).await {
                                Ok(()) => {
                                    comment_draft.set(String::new());
                                    reload_comments();
                                }
                                Err(e) => {
                                    crate::log_error!("Failed to add comment: {}", e);
                                    comment_error.set(Some(e.inline_message("Failed to add comment")));
                                }
                            }
                            posting_comment.set(false);
                        },
                        TextArea {
                            value: comment_draft.cloned(),
                            placeholder: "Write a comment...".to_string(),
                            rows: 3,
                            oninput: move |e: FormEvent| comment_draft.set(e.value()),
                        }
                        if let Some(message) = comment_error.cloned() {
                            ErrorBox { message }
                        }
                        Button {
                            r#type: "submit".to_string(),
                            disabled: posting_comment(),
                            if posting_comment() { "Posting..." } else { "Add comment" }
                        }
                    }
                } else {
                    p { class: "mb-4 text-sm text-gray-400",
                        Link { to: Route::Login {}, class: "text-indigo-400 hover:text-indigo-300", "Log in" }
                        " to join the discussion."
                    }
                }

                Panel { flush: true,
                    if comment_rows.is_empty() {
                        p { class: "py-4 text-sm text-gray-400", "No comments yet." }
                    }
                    for (comment, can_manage_comment) in comment_rows {
                        CommentItem {
                            key: "{comment.id}",
                            post_id: id,
                            comment,
                            can_manage: can_manage_comment,
                            on_updated: move |updated: Comment| {
                                comments.with_mut(|list| {
                                    if let Some(c) = list.iter_mut().find(|c| c.id == updated.id) {
                                        *c = updated;
                                    }
                                });
                            },
                            on_deleted: move |_| reload_comments(),
                        }
                    }
                }
            }
        }
    }
}
