use agora_core::{forms, CommunitiesApi};
use agora_shared::{Community, Id};
use dioxus::prelude::*;

use super::{field_values, load_error};
use crate::auth_session::SessionContext;
use crate::components::ui::{Button, ErrorBox, Field, Panel, Spinner, TextArea, TextInput};
use crate::Route;

#[component]
pub fn PostCreation() -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut communities = use_signal(Vec::<Community>::new);
    let mut loading = use_signal(|| true);
    let mut title = use_signal(String::new);
    let mut body = use_signal(String::new);
    let mut community_id = use_signal(|| None::<Id>);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    use_effect(move || {
        spawn(async move {
            match ctx.api().list_communities().await {
                Ok(list) => {
                    // Preselect the first community.
                    community_id.set(list.first().map(|c| c.id));
                    communities.set(list);
                }
                Err(e) => error.set(Some(load_error("communities", &e))),
            }
            loading.set(false);
        });
    });

    if !ctx.is_authenticated() {
        return rsx! {
            div { class: "max-w-2xl mx-auto px-6 py-10 text-gray-300",
                "You need to "
                Link { to: Route::Login {}, class: "text-indigo-400 hover:text-indigo-300", "log in" }
                " to create a post."
            }
        };
    }

    let selected = community_id().map(|id| id.to_string()).unwrap_or_default();

    rsx! {
        div { class: "max-w-2xl mx-auto px-6 py-6",
            Panel {
                title: "Create a post".to_string(),
                if let Some(message) = error.cloned() {
                    ErrorBox { message }
                }

                if loading() {
                    Spinner { label: "Loading communities...".to_string() }
                } else {
                    form {
                        class: "space-y-4",
                        onsubmit: move |e| async move {
                            e.prevent_default();
                            if is_submitting() {
                                return;
                            }
                            is_submitting.set(true);
                            error.set(None);

                            let [title_value, body_value] = field_values([title, body]);
                            let session = ctx.get_session();
                            let result = forms::create_post(
                                &ctx.api(),
                                session.as_ref(),
                                &title_value,
                                &body_value,
                                community_id(),
                            )
                            .await;
                            match result {
                                Ok(community) => {
                                    nav.push(Route::CommunityPage { id: community });
                                }
                                Err(e) => {
                                    crate::log_error!("Failed to create post: {}", e);
                                    error.set(Some(e.inline_message("Failed to create post")));
                                }
                            }
                            is_submitting.set(false);
                        },
                        Field { label: "Community".to_string(), html_for: "community".to_string(),
                            select {
                                id: "community",
                                class: "w-full rounded-md bg-[#1e1f22] text-gray-100 px-3 py-2 text-sm border border-[#3f4147]",
                                value: "{selected}",
                                disabled: is_submitting(),
                                onchange: move |e: FormEvent| community_id.set(e.value().parse().ok()),
                                if communities.read().is_empty() {
                                    option { value: "", "No communities yet" }
                                }
                                for community in communities.read().iter() {
                                    option { key: "{community.id}", value: "{community.id}", "{community.name}" }
                                }
                            }
                        }
                        Field { label: "Title".to_string(), html_for: "title".to_string(),
                            TextInput {
                                id: "title".to_string(),
                                value: title.cloned(),
                                disabled: is_submitting(),
                                placeholder: "What's on your mind?".to_string(),
                                oninput: move |e: FormEvent| title.set(e.value()),
                            }
                        }
                        Field { label: "Body".to_string(), html_for: "body".to_string(),
                            TextArea {
                                id: "body".to_string(),
                                value: body.cloned(),
                                rows: 8,
                                disabled: is_submitting(),
                                oninput: move |e: FormEvent| body.set(e.value()),
                            }
                        }
                        Button {
                            r#type: "submit".to_string(),
                            disabled: is_submitting(),
                            if is_submitting() { "Posting..." } else { "Create post" }
                        }
                    }
                }
            }
        }
    }
}
