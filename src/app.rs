//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::side_menu::SideMenu;
use crate::components::toast_stack::ToastStack;
use crate::config::UiConfig;
use crate::net::bridge::Bridge;
use crate::pages::{book::BookPage, library::LibraryPage, settings::SettingsPage};
use crate::state::context::{Scope, provide_scope};
use crate::state::services::Services;
use crate::util::{i18n, theme};

#[cfg(feature = "csr")]
fn host_bridge() -> Arc<dyn Bridge> {
    Arc::new(crate::net::tauri::TauriBridge::new())
}

#[cfg(not(feature = "csr"))]
fn host_bridge() -> Arc<dyn Bridge> {
    Arc::new(crate::net::bridge::DetachedBridge)
}

/// Root application component.
///
/// Builds the shared services, publishes them into the root scope, loads
/// host state in the background and sets up client-side routing.
#[component]
pub fn App(config: UiConfig) -> impl IntoView {
    provide_meta_context();
    i18n::init_global(&config.fallback_lang);

    let services = Services::new(host_bridge(), config);
    let scope = Scope::root();
    services.publish(&scope);
    provide_scope(scope);

    let theme_sub = services.preferences.theme.subscribe(|id: &String| theme::apply_theme(id));
    on_cleanup(move || drop(theme_sub));

    #[cfg(feature = "csr")]
    {
        let startup = services.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = startup.initialize().await {
                log::warn!("startup incomplete: {e}");
            }
        });
        shutdown_on_close(&services);
    }

    view! {
        <Title text="Bookshelf"/>

        <Router>
            <div class="app-shell">
                <SideMenu/>
                <main class="app-shell__content">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=LibraryPage/>
                        <Route path=(StaticSegment("book"), ParamSegment("id")) view=BookPage/>
                        <Route path=StaticSegment("settings") view=SettingsPage/>
                    </Routes>
                </main>
            </div>
            <ToastStack/>
        </Router>
    }
}

/// Ask the host to shut down when its window requests closing.
#[cfg(feature = "csr")]
fn shutdown_on_close(services: &Services) {
    let gateway = services.gateway.clone();
    leptos::task::spawn_local(async move {
        let on_close = gateway.clone();
        let registered = gateway
            .bridge()
            .listen(
                crate::net::tauri::CLOSE_REQUESTED,
                Box::new(move |_payload: serde_json::Value| {
                    let gateway = on_close.clone();
                    leptos::task::spawn_local(async move {
                        if let Err(e) = gateway.shutdown().await {
                            log::warn!("host shutdown failed: {e}");
                        }
                    });
                }),
            )
            .await;
        if let Err(e) = registered {
            log::warn!("could not watch window close requests: {e}");
        }
    });
}
