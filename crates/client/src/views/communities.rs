use agora_core::CommunitiesApi;
use dioxus::prelude::*;

use super::load_error;
use crate::auth_session::SessionContext;
use crate::components::ui::{ErrorBox, Spinner};
use crate::Route;

#[component]
pub fn Communities() -> Element {
    let ctx = use_context::<SessionContext>();
    let communities = use_resource(move || async move { ctx.api().list_communities().await });

    rsx! {
        div { class: "max-w-3xl mx-auto px-6 py-6",
            div { class: "flex items-center justify-between mb-4",
                h1 { class: "text-2xl font-bold text-white", "Communities" }
                if ctx.is_authenticated() {
                    Link {
                        to: Route::CommunityCreation {},
                        class: "px-3 py-1.5 rounded-md bg-indigo-600 text-sm text-white hover:bg-indigo-500",
                        "Create community"
                    }
                }
            }
            {match &*communities.read() {
                None => rsx! { Spinner { label: "Loading communities...".to_string() } },
                Some(Err(e)) => rsx! { ErrorBox { message: load_error("communities", e) } },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "text-gray-400", "No communities yet." }
                },
                Some(Ok(list)) => rsx! {
                    div { class: "grid gap-3 sm:grid-cols-2",
                        for community in list.iter().cloned() {
                            Link {
                                key: "{community.id}",
                                to: Route::CommunityPage { id: community.id },
                                class: "block p-4 rounded-lg bg-[#2b2d31] border border-[#2d2f34] hover:border-indigo-500/50 transition-colors",
                                h3 { class: "text-base font-semibold text-white", "{community.name}" }
                                p { class: "mt-1 text-sm text-gray-400 line-clamp-2", "{community.description}" }
                            }
                        }
                    }
                },
            }}
        }
    }
}
