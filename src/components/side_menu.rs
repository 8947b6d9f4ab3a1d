//! Collapsible side menu: navigation and the open book databases.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::state::context::use_scope;
use crate::state::ui::{self, menu_visible};
use crate::util::i18n::t;
use crate::util::reactive::use_observable;

/// Side menu bound to the host-persisted menu preferences.
///
/// A collapsed menu opens while hovered when auto-expand is on.
#[component]
pub fn SideMenu() -> impl IntoView {
    let scope = use_scope();
    let menu = scope.read(&ui::MENU).expect_value();
    let databases = scope.read(&ui::DATABASES).expect_value();
    let language = scope.read(&ui::LANGUAGE).expect_value();

    let lang = use_observable(language.observable());
    let expanded = use_observable(menu.expanded.observable());
    let auto_expand = use_observable(menu.auto_expand.observable());
    let open = use_observable(databases.open_observable());
    let hovered = RwSignal::new(false);

    let visible = move || menu_visible(expanded.get(), auto_expand.get(), hovered.get());
    let text = move |key: &'static str| t(&lang.get(), key);

    let toggle = Callback::new(move |()| {
        let menu = menu.clone();
        spawn_local(async move {
            if let Err(e) = menu.toggle_expanded().await {
                log::debug!("menu toggle discarded: {e}");
            }
        });
    });

    let create = Callback::new(move |()| {
        let databases = databases.clone();
        spawn_local(async move {
            match databases.create().await {
                Ok(key) => log::info!("opened new database `{key}`"),
                Err(e) if e.is_user_abort() => {}
                Err(e) => log::debug!("database creation failed: {e}"),
            }
        });
    });

    view! {
        <nav
            class="side-menu"
            class:side-menu--collapsed=move || !visible()
            on:mouseenter=move |_| hovered.set(true)
            on:mouseleave=move |_| hovered.set(false)
        >
            <button
                class="side-menu__toggle"
                title=move || text(if expanded.get() { "menu.collapse" } else { "menu.expand" })
                on:click=move |_| toggle.run(())
            >
                {move || if expanded.get() { "\u{25C0}" } else { "\u{25B6}" }}
            </button>

            <Show when=visible>
                <div class="side-menu__links">
                    <A href="/">{move || text("menu.library")}</A>
                    <A href="/settings">{move || text("menu.settings")}</A>
                </div>

                <h2 class="side-menu__heading">{move || text("menu.databases")}</h2>
                <Show
                    when=move || !open.get().is_empty()
                    fallback=move || view! { <p class="side-menu__empty">{move || text("menu.no_database")}</p> }
                >
                    <ul class="side-menu__databases">
                        <For each=move || open.get() key=|db: &String| db.clone() children=|db: String| view! { <DatabaseItem db=db/> }/>
                    </ul>
                </Show>
                <button class="side-menu__new" on:click=move |_| create.run(())>
                    {move || text("menu.new_database")}
                </button>
            </Show>
        </nav>
    }
}

/// One open database; clicking makes it the active one.
#[component]
fn DatabaseItem(db: String) -> impl IntoView {
    let databases = use_scope().read(&ui::DATABASES).expect_value();
    let active = use_observable(databases.active_observable());

    let is_active = {
        let db = db.clone();
        move || active.get().as_deref() == Some(db.as_str())
    };
    let switch = {
        let db = db.clone();
        move |_| {
            let databases = databases.clone();
            let db = db.clone();
            spawn_local(async move {
                if let Err(e) = databases.switch_to(&db).await {
                    log::debug!("database switch discarded: {e}");
                }
            });
        }
    };

    view! {
        <li class="side-menu__database" class:side-menu__database--active=is_active>
            <button on:click=switch>{db}</button>
        </li>
    }
}
