use agora_core::forms;
use dioxus::prelude::*;

use super::field_values;
use crate::auth_session::SessionContext;
use crate::components::ui::{Button, ErrorBox, Field, InputType, Panel, TextInput};
use crate::Route;

#[component]
pub fn Register() -> Element {
    let ctx = use_context::<SessionContext>();
    let nav = use_navigator();

    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    rsx! {
        div { class: "flex items-center justify-center px-4 py-12",
            div { class: "w-full max-w-md",
                Panel {
                    title: "Create an account".to_string(),
                    subtitle: "Join the conversation".to_string(),
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

                            let [username_value, email_value, password_value, confirm_value] =
                                field_values([username, email, password, confirm_password]);
                            let result = forms::register(
                                &ctx.api(),
                                &username_value,
                                &email_value,
                                &password_value,
                                &confirm_value,
                            )
                            .await;
                            match result {
                                Ok(()) => {
                                    crate::log_info!("Registered {}", username_value.trim());
                                    nav.push(Route::Login {});
                                }
                                Err(e) => {
                                    crate::log_warn!("Registration failed: {}", e);
                                    error.set(Some(e.inline_message("Registration failed")));
                                }
                            }
                            is_submitting.set(false);
                        },
                        Field { label: "Username".to_string(), html_for: "username".to_string(),
                            TextInput {
                                id: "username".to_string(),
                                value: username.cloned(),
                                disabled: is_submitting(),
                                oninput: move |e: FormEvent| username.set(e.value()),
                            }
                        }
                        Field { label: "Email".to_string(), html_for: "email".to_string(),
                            TextInput {
                                id: "email".to_string(),
                                value: email.cloned(),
                                input_type: InputType::Email,
                                disabled: is_submitting(),
                                oninput: move |e: FormEvent| email.set(e.value()),
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
                        Field { label: "Confirm password".to_string(), html_for: "confirm-password".to_string(),
                            TextInput {
                                id: "confirm-password".to_string(),
                                value: confirm_password.cloned(),
                                input_type: InputType::Password,
                                disabled: is_submitting(),
                                oninput: move |e: FormEvent| confirm_password.set(e.value()),
                            }
                        }
                        Button {
                            r#type: "submit".to_string(),
                            class: "w-full py-2.5".to_string(),
                            disabled: is_submitting(),
                            if is_submitting() { "Creating..." } else { "Create account" }
                        }
                    }

                    p { class: "mt-6 text-center text-sm text-gray-400",
                        "Already have an account? "
                        Link {
                            to: Route::Login {},
                            class: "text-indigo-400 hover:text-indigo-300 font-medium",
                            "Sign in"
                        }
                    }
                }
            }
        }
    }
}
