//! Application routing configuration.

use agora_shared::Id;
use dioxus::prelude::*;

use crate::views::{
    Communities, CommunityCreation, CommunityPage, Home, Login, NotFound, PostCreation, PostPage,
    Register, Shell, UserProfile,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/post/:id")]
        PostPage { id: Id },
        #[route("/create-post")]
        PostCreation {},

        #[route("/communities")]
        Communities {},
        #[route("/create-community")]
        CommunityCreation {},
        #[route("/community/:id")]
        CommunityPage { id: Id },

        #[route("/user/:user_id")]
        UserProfile { user_id: Id },

        // Auth routes
        #[route("/login")]
        Login {},
        #[route("/register")]
        Register {},
    #[end_layout]

    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
