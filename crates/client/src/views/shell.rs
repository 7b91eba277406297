use dioxus::prelude::*;

use crate::components::Header;
use crate::Route;

/// Layout shared by every page: the header above the routed view.
#[component]
pub fn Shell() -> Element {
    rsx! {
        div { class: "min-h-screen bg-[#313338] text-gray-100",
            Header {}
            Outlet::<Route> {}
        }
    }
}
