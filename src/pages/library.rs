//! Library page: active database, recently opened files and book lookup.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::context::use_scope;
use crate::state::ui;
use crate::util::i18n::t;
use crate::util::reactive::use_observable;

/// Parse a book id typed by the user.
pub fn parse_book_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[component]
pub fn LibraryPage() -> impl IntoView {
    let scope = use_scope();
    let databases = scope.read(&ui::DATABASES).expect_value();
    let history = scope.read(&ui::HISTORY).expect_value();
    let language = scope.read(&ui::LANGUAGE).expect_value();

    let lang = use_observable(language.observable());
    let active = use_observable(databases.active_observable());
    let entries = use_observable(history.observable());
    let text = move |key: &'static str| t(&lang.get(), key);

    let book_id = RwSignal::new(String::new());
    let navigate = use_navigate();
    let open_book = move |_| {
        if let Some(id) = parse_book_id(&book_id.get()) {
            navigate(&format!("/book/{id}"), NavigateOptions::default());
        }
    };

    let forget = Callback::new(move |path: String| {
        let history = history.clone();
        spawn_local(async move {
            if let Err(e) = history.remove(&path).await {
                log::debug!("history entry kept: {e}");
            }
        });
    });

    view! {
        <div class="library-page">
            <header class="library-page__header">
                <h1>{move || text("library.title")}</h1>
                <p class="library-page__active">
                    {move || match active.get() {
                        Some(db) => format!("{}: {db}", text("library.active")),
                        None => text("library.none"),
                    }}
                </p>
            </header>

            <div class="library-page__lookup">
                <input
                    type="number"
                    min="1"
                    prop:disabled=move || active.get().is_none()
                    prop:value=move || book_id.get()
                    on:input=move |ev| book_id.set(event_target_value(&ev))
                />
                <button class="btn" prop:disabled=move || active.get().is_none() on:click=open_book>
                    {move || text("library.open_book")}
                </button>
            </div>

            <section class="library-page__history">
                <h2>{move || text("library.history")}</h2>
                <Show
                    when=move || !entries.get().is_empty()
                    fallback=move || view! { <p>{move || text("library.history_empty")}</p> }
                >
                    <ul>
                        <For
                            each=move || entries.get()
                            key=|path: &String| path.clone()
                            children=move |path: String| {
                                let target = path.clone();
                                view! {
                                    <li class="library-page__history-entry">
                                        <span>{path}</span>
                                        <button class="btn btn--small" on:click=move |_| forget.run(target.clone())>
                                            {move || text("library.forget")}
                                        </button>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </section>
        </div>
    }
}
