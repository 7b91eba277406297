use dioxus::prelude::*;

/// Rounded surface for forms, post bodies and lists.
///
/// A non-empty `title` adds a header. `flush` drops the inner padding so
/// bordered rows can run edge to edge.
#[component]
pub fn Panel(
    #[props(default)] title: String,
    #[props(default)] subtitle: String,
    #[props(default)] flush: bool,
    children: Element,
) -> Element {
    let body_class = if flush { "px-5" } else { "px-5 py-5" };

    rsx! {
        section { class: "rounded-lg border border-[#2d2f34] bg-[#2b2d31] shadow",
            if !title.is_empty() {
                header { class: "px-5 pt-5",
                    h2 { class: "text-xl font-bold text-white", "{title}" }
                    if !subtitle.is_empty() {
                        p { class: "mt-1 text-sm text-gray-400", "{subtitle}" }
                    }
                }
            }
            div { class: body_class, {children} }
        }
    }
}
