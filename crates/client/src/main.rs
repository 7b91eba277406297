//! Agora Client - Main entry point
//!
//! A Dioxus application for the agora forum and its global chat.
//! Supports both web (WASM) and desktop platforms.

#![allow(non_snake_case)]

use agora_client::{auth_session::SessionProvider, routes::Route};
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        // Load .env before anything reads the environment.
        let env_file = load_env_file();

        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("agora_client=debug,agora_core=debug")),
            )
            .init();

        if let Err(e) = env_file {
            tracing::warn!("{:#}", e);
        }
    }

    dioxus::launch(App);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_env_file() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(anyhow::Error::new(e).context("failed to load .env")),
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}
