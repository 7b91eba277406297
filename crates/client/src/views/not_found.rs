use dioxus::prelude::*;

use crate::components::Header;
use crate::Route;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        div { class: "min-h-screen bg-[#313338] text-gray-100",
            Header {}
            div { class: "max-w-2xl mx-auto px-6 py-16 text-center",
                h1 { class: "text-3xl font-bold text-white", "Page not found" }
                p { class: "mt-2 text-gray-400", "Nothing lives at /{path}." }
                Link { to: Route::Home {}, class: "inline-block mt-6 text-indigo-400 hover:text-indigo-300", "Back to home" }
            }
        }
    }
}
