use dioxus::prelude::*;

const FIELD_CLASS: &str = "w-full rounded-md bg-[#1e1f22] text-gray-100 px-3 py-2 text-sm border border-[#3f4147] placeholder-gray-500 focus:outline-none focus:ring-2 focus:ring-indigo-500/50 focus:border-indigo-500";

fn field_class(extra: Option<String>) -> String {
    match extra {
        Some(extra) if !extra.is_empty() => format!("{} {}", FIELD_CLASS, extra),
        _ => FIELD_CLASS.to_string(),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Email,
    Password,
}

impl InputType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub id: Option<String>,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub input_type: Option<InputType>,
    #[props(optional)]
    pub disabled: Option<bool>,
}

#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    rsx! {
        input {
            class: field_class(props.class),
            id: props.id.unwrap_or_default(),
            r#type: props.input_type.unwrap_or(InputType::Text).as_str(),
            value: "{props.value}",
            placeholder: props.placeholder.unwrap_or_default(),
            disabled: props.disabled.unwrap_or(false),
            oninput: move |e| props.oninput.call(e),
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    #[props(optional)]
    pub class: Option<String>,
    #[props(optional)]
    pub id: Option<String>,
    pub value: String,
    pub oninput: EventHandler<FormEvent>,
    #[props(optional)]
    pub placeholder: Option<String>,
    #[props(optional)]
    pub rows: Option<u32>,
    #[props(optional)]
    pub disabled: Option<bool>,
}

#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    rsx! {
        textarea {
            class: field_class(props.class),
            id: props.id.unwrap_or_default(),
            rows: props.rows.unwrap_or(4),
            disabled: props.disabled.unwrap_or(false),
            value: "{props.value}",
            placeholder: props.placeholder.unwrap_or_default(),
            oninput: move |e| props.oninput.call(e),
        }
    }
}

/// Labelled wrapper for a form control.
#[component]
pub fn Field(label: String, html_for: String, children: Element) -> Element {
    rsx! {
        div { class: "space-y-1",
            label { class: "block text-sm font-medium text-gray-300", r#for: "{html_for}", "{label}" }
            {children}
        }
    }
}
