//! # bookshelf-ui
//!
//! Leptos + WASM front-end for the Bookshelf desktop application, a catalogue
//! of personally owned books kept in SQLite databases by the native host.
//!
//! This crate contains pages, components, shared client state and the
//! command/event client that talks to the host. Persistence, migrations and
//! file dialogs all live on the host side; everything here either mirrors host
//! state into observable stores or forwards user intents as commands.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Webview entry point: installs logging and mounts the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use leptos::prelude::*;

    use crate::app::App;

    let config = match config::UiConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            util::logging::init(log::Level::Info);
            log::warn!("invalid build configuration, using defaults: {e}");
            config::UiConfig::default()
        }
    };
    util::logging::init(config.log_level);
    leptos::mount::mount_to_body(move || view! { <App config=config.clone()/> });
}
