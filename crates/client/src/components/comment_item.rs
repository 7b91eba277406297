use agora_core::{forms, CommentsApi};
use agora_shared::{format_timestamp, Comment, Id};
use dioxus::prelude::*;

use crate::auth_session::SessionContext;
use crate::components::ui::{confirm, Button, ButtonVariant, ErrorBox, TextArea};
use crate::Route;

/// A single comment with inline edit and delete for those allowed to.
#[component]
pub fn CommentItem(
    post_id: Id,
    comment: Comment,
    can_manage: bool,
    on_updated: EventHandler<Comment>,
    on_deleted: EventHandler<Id>,
) -> Element {
    let ctx = use_context::<SessionContext>();
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let posted = format_timestamp(&comment.creation_time);
    let comment_id = comment.id;

    let start_edit = {
        let body = comment.body.clone();
        move |_: MouseEvent| {
            draft.set(body.clone());
            error.set(None);
            editing.set(true);
        }
    };

    let save = {
        let comment = comment.clone();
        move |_: MouseEvent| {
            let comment = comment.clone();
            busy.set(true);
            spawn(async move {
                let body = draft.read().clone();
                match forms::edit_comment(&ctx.api(), post_id, comment.id, &body).await {
                    Ok(body) => {
                        editing.set(false);
                        on_updated.call(Comment { body, ..comment });
                    }
                    Err(e) => {
                        crate::log_error!("Failed to update comment {}: {}", comment.id, e);
                        error.set(Some(e.inline_message("Failed to update comment")));
                    }
                }
                busy.set(false);
            });
        }
    };

    let delete = move |_: MouseEvent| {
        spawn(async move {
            if !confirm("Are you sure you want to delete this comment?").await {
                return;
            }
            match ctx.api().delete_comment(post_id, comment_id).await {
                Ok(()) => on_deleted.call(comment_id),
                Err(e) => {
                    crate::log_error!("Failed to delete comment {}: {}", comment_id, e);
                    error.set(Some("Failed to delete comment".to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "py-3 border-b border-[#3f4147] last:border-b-0",
            div { class: "flex items-center justify-between",
                div { class: "flex items-baseline gap-2 text-sm",
                    {match comment.author_id {
                        Some(author_id) => rsx! {
                            Link {
                                to: Route::UserProfile { user_id: author_id },
                                class: "font-semibold text-indigo-300 hover:underline",
                                "{comment.author_username}"
                            }
                        },
                        None => rsx! {
                            span { class: "font-semibold text-indigo-300", "{comment.author_username}" }
                        },
                    }}
                    span { class: "text-xs text-gray-500", "{posted}" }
                }
                if can_manage && !editing() {
                    div { class: "flex gap-1",
                        Button { variant: ButtonVariant::Ghost, onclick: start_edit, "Edit" }
                        Button { variant: ButtonVariant::Ghost, onclick: delete, "Delete" }
                    }
                }
            }

            if let Some(message) = error.cloned() {
                ErrorBox { message }
            }

            if editing() {
                div { class: "mt-2 space-y-2",
                    TextArea {
                        value: draft.cloned(),
                        rows: 3,
                        oninput: move |e: FormEvent| draft.set(e.value()),
                    }
                    div { class: "flex gap-2",
                        Button { disabled: busy(), onclick: save, "Save" }
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| editing.set(false),
                            "Cancel"
                        }
                    }
                }
            } else {
                p { class: "mt-1 text-sm text-gray-200 whitespace-pre-wrap", "{comment.body}" }
            }
        }
    }
}
