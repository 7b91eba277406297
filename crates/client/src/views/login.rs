use agora_core::forms;
use dioxus::prelude::*;

use super::field_values;
use crate::auth_session::SessionContext;
use crate::components::ui::{Button, ButtonVariant, ErrorBox, Field, InputType, Panel, TextInput};
use crate::Route;

#[component]
pub fn Login() -> Element {
    let mut ctx = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut by_email = use_signal(|| false);
    let mut identifier = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    let (identifier_label, identifier_type, toggle_label) = if by_email() {
        ("Email", InputType::Email, "Use username instead")
    } else {
        ("Username", InputType::Text, "Use email instead")
    };

    rsx! {
        div { class: "flex items-center justify-center px-4 py-12",
            div { class: "w-full max-w-md",
                Panel {
                    title: "Welcome back".to_string(),
                    subtitle: "Sign in to post, comment and chat".to_string(),
                    if let Some(message) = error.cloned() {
                        ErrorBox { message }
                    }

                    form {
                        class: "space-y-5",
                        onsubmit: move |e| async move {
                            e.prevent_default();
                            if is_submitting() {
                                return;
                            }
                            is_submitting.set(true);
                            error.set(None);

                            let [identifier_value, password_value] =
                                field_values([identifier, password]);
                            let result = forms::login(
                                &ctx.api(),
                                &identifier_value,
                                by_email(),
                                &password_value,
                            )
                            .await;
                            match result {
                                Ok(session) => {
                                    crate::log_info!("Signed in as {}", session.username);
                                    ctx.set_session(session);
                                    nav.push(Route::Home {});
                                }
                                Err(e) => {
                                    crate::log_warn!("Login failed: {}", e);
                                    error.set(Some(e.inline_message("Invalid credentials")));
                                }
                            }
                            is_submitting.set(false);
                        },
                        Field { label: identifier_label.to_string(), html_for: "identifier".to_string(),
                            TextInput {
                                id: "identifier".to_string(),
                                value: identifier.cloned(),
                                input_type: identifier_type,
                                disabled: is_submitting(),
                                oninput: move |e: FormEvent| identifier.set(e.value()),
                            }
                        }
                        Field { label: "Password".to_string(), html_for: "password".to_string(),
                            TextInput {
                                id: "password".to_string(),
                                value: password.cloned(),
                                input_type: InputType::Password,
                                disabled: is_submitting(),
                                oninput: move |e: FormEvent| password.set(e.value()),
                            }
                        }
                        Button {
                            r#type: "submit".to_string(),
                            class: "w-full py-2.5".to_string(),
                            disabled: is_submitting(),
                            if is_submitting() { "Signing in..." } else { "Sign in" }
                        }
                    }

                    div { class: "mt-4 flex items-center justify-between text-sm",
                        Button {
                            variant: ButtonVariant::Ghost,
                            disabled: is_submitting(),
                            onclick: move |_| {
                                by_email.toggle();
                                identifier.set(String::new());
                                error.set(None);
                            },
                            "{toggle_label}"
                        }
                        span { class: "text-gray-400",
                            "No account? "
                            Link {
                                to: Route::Register {},
                                class: "text-indigo-400 hover:text-indigo-300 font-medium",
                                "Register"
                            }
                        }
                    }
                }
            }
        }
    }
}
