use agora_core::forms;
use dioxus::prelude::*;

use super::field_values;
use crate::auth_session::SessionContext;
use crate::components::ui::{Button, ErrorBox, Field, Panel, TextArea, TextInput};
use crate::Route;

#[component]
pub fn CommunityCreation() -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    rsx! {
        div { class: "max-w-xl mx-auto px-6 py-6",
            Panel {
                title: "Create a community".to_string(),
                subtitle: "Give it a name and tell people what it is about.".to_string(),
                form {
                    class: "space-y-4",
                    onsubmit: move |e| async move {
                        e.prevent_default();
                        if is_submitting() {
                            return;
                        }
                        is_submitting.set(true);
                        error.set(None);

                        let [name_value, description_value] = field_values([name, description]);
                        let session = ctx.get_session();
                        let result = forms::create_community(
                            &ctx.api(),
                            session.as_ref(),
                            &name_value,
                            &description_value,
                        )
                        .await;
                        match result {
                            Ok(()) => {
                                crate::log_info!("Created community {}", name_value.trim());
                                nav.push(Route::Communities {});
                            }
                            Err(e) => {
                                error.set(Some(e.inline_message("Failed to create community")));
                            }
                        }
                        is_submitting.set(false);
                    },
                    if let Some(message) = error.cloned() {
                        ErrorBox { message }
                    }
                    Field { label: "Name".to_string(), html_for: "community-name".to_string(),
                        TextInput {
                            id: "community-name".to_string(),
                            value: name.cloned(),
                            disabled: is_submitting(),
                            oninput: move |e: FormEvent| name.set(e.value()),
                        }
                    }
                    Field { label: "Description".to_string(), html_for: "community-description".to_string(),
                        TextArea {
                            id: "community-description".to_string(),
                            value: description.cloned(),
                            rows: 4,
                            disabled: is_submitting(),
                            oninput: move |e: FormEvent| description.set(e.value()),
                        }
                    }
                    Button {
                        r#type: "submit".to_string(),
                        disabled: is_submitting(),
                        if is_submitting() { "Creating..." } else { "Create community" }
                    }
                }
            }
        }
    }
}
