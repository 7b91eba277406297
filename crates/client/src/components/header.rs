use dioxus::prelude::*;

use crate::auth_session::SessionContext;
use crate::Route;

const LINK_CLASS: &str = "px-3 py-1.5 rounded-md text-sm text-gray-300 hover:text-white hover:bg-[#3f4147] transition-colors";

/// Top bar shown on every page.
#[component]
pub fn Header() -> Element {
    let mut ctx = use_context::<SessionContext>();
    let nav = use_navigator();
    let session = ctx.session.read().clone();

    rsx! {
        header { class: "sticky top-0 z-10 flex items-center justify-between px-6 h-14 bg-[#2b2d31] border-b border-[#1e1f22]",
            div { class: "flex items-center gap-4",
                Link { to: Route::Home {}, class: "text-lg font-bold text-white", "Agora" }
                Link { to: Route::Communities {}, class: LINK_CLASS, "Communities" }
            }
            nav { class: "flex items-center gap-2",
                if let Some(session) = session {
                    Link { to: Route::PostCreation {}, class: LINK_CLASS, "Create post" }
                    Link {
                        to: Route::UserProfile { user_id: session.user_id },
                        class: LINK_CLASS,
                        "{session.username}"
                    }
                    button {
                        class: LINK_CLASS,
                        onclick: move |_| {
                            ctx.clear_session();
                            nav.push(Route::Home {});
                        },
                        "Logout"
                    }
                } else {
                    Link { to: Route::Login {}, class: LINK_CLASS, "Login" }
                    Link { to: Route::Register {}, class: LINK_CLASS, "Register" }
                }
            }
        }
    }
}
