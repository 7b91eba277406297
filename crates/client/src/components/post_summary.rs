use agora_shared::{format_timestamp, Post};
use dioxus::prelude::*;

use crate::Route;

/// One row of a post listing.
#[component]
pub fn PostSummary(post: Post) -> Element {
    let posted = format_timestamp(&post.creation_time);
    let comments = match post.comment_count {
        1 => "1 comment".to_string(),
        n => format!("{n} comments"),
    };

    rsx! {
        Link {
            to: Route::PostPage { id: post.id },
            class: "block p-4 rounded-lg bg-[#2b2d31] border border-[#2d2f34] hover:border-indigo-500/50 transition-colors",
            h3 { class: "text-base font-semibold text-white", "{post.title}" }
            div { class: "mt-1 flex flex-wrap gap-x-3 text-xs text-gray-400",
                span { "by {post.author_username}" }
                if let Some(community) = &post.community_name {
                    span { "in {community}" }
                }
                span { "{posted}" }
                span { "{comments}" }
            }
        }
    }
}
