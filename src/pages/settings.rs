//! Settings page: language, theme and side menu behavior.
//!
//! Controls display the stores' confirmed values. A failed save leaves the
//! store unchanged, and the control is re-rendered from it so it snaps back.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::net::gateway::RemoteResult;
use crate::state::context::use_scope;
use crate::state::setting::LoadState;
use crate::state::ui;
use crate::util::i18n::{self, t};
use crate::util::reactive::use_observable;
use crate::util::theme::{THEMES, theme_label};

/// Run a store write; on failure bump `revision` so bound controls re-read the store.
fn persist<F>(revision: RwSignal<u32>, write: F)
where
    F: Future<Output = RemoteResult<()>> + 'static,
{
    spawn_local(async move {
        if let Err(e) = write.await {
            log::debug!("setting change discarded: {e}");
            revision.update(|r| *r = r.wrapping_add(1));
        }
    });
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let scope = use_scope();
    let menu = scope.read(&ui::MENU).expect_value();
    let theme = scope.read(&ui::THEME).expect_value();
    let language = scope.read(&ui::LANGUAGE).expect_value();

    let lang = use_observable(language.observable());
    let theme_id = use_observable(theme.observable());
    let expanded = use_observable(menu.expanded.observable());
    let auto_expand = use_observable(menu.auto_expand.observable());
    let lang_state = use_observable(language.state_observable());
    let theme_state = use_observable(theme.state_observable());
    let revision = RwSignal::new(0_u32);
    let text = move |key: &'static str| t(&lang.get(), key);
    let loading = move || lang_state.get() == LoadState::Loading || theme_state.get() == LoadState::Loading;
    let current_theme = move || {
        theme_label(&theme_id.get(), THEMES).map(|key| format!("{}: {}", text("settings.current_theme"), text(key)))
    };

    let languages: Vec<String> = i18n::global().languages().into_iter().map(str::to_owned).collect();

    let on_language = move |ev: leptos::ev::Event| {
        let store = language.clone();
        let next = event_target_value(&ev);
        persist(revision, async move { store.set(next).await });
    };
    let on_theme = move |ev: leptos::ev::Event| {
        let store = theme.clone();
        let next = event_target_value(&ev);
        persist(revision, async move { store.set(next).await });
    };
    let on_expanded = {
        let menu = menu.clone();
        move |_| {
            let menu = menu.clone();
            persist(revision, async move { menu.toggle_expanded().await.map(|_| ()) });
        }
    };
    let on_auto_expand = move |_| {
        let menu = menu.clone();
        persist(revision, async move { menu.toggle_auto_expand().await.map(|_| ()) });
    };

    view! {
        <div class="settings-page">
            <h1>{move || text("settings.title")}</h1>
            <Show when=loading>
                <p class="settings-page__loading">{move || text("settings.loading")}</p>
            </Show>

            <label class="settings-page__row">
                <span>{move || text("settings.language")}</span>
                <select
                    prop:value=move || {
                        revision.track();
                        lang.get()
                    }
                    on:change=on_language
                >
                    {languages
                        .into_iter()
                        .map(|code| {
                            let label = code.to_uppercase();
                            view! { <option value=code>{label}</option> }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>

            <label class="settings-page__row">
                <span>{move || text("settings.theme")}</span>
                <select
                    prop:value=move || {
                        revision.track();
                        theme_id.get()
                    }
                    on:change=on_theme
                >
                    {THEMES
                        .iter()
                        .map(|option| {
                            let key = option.label_key;
                            view! { <option value=option.id>{move || text(key)}</option> }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <p class="settings-page__current">{current_theme}</p>

            <label class="settings-page__row">
                <input
                    type="checkbox"
                    prop:checked=move || {
                        revision.track();
                        expanded.get()
                    }
                    on:change=on_expanded
                />
                <span>{move || text("settings.menu_expanded")}</span>
            </label>

            <label class="settings-page__row">
                <input
                    type="checkbox"
                    prop:checked=move || {
                        revision.track();
                        auto_expand.get()
                    }
                    on:change=on_auto_expand
                />
                <span>{move || text("settings.menu_auto_expand")}</span>
            </label>
        </div>
    }
}
