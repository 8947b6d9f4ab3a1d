//! Book detail page for `/book/:id`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::pages::library::parse_book_id;
use crate::state::books::{BookState, load_book};
use crate::state::context::use_scope;
use crate::state::ui;
use crate::util::i18n::t;
use crate::util::reactive::use_observable;

/// Read-only view of one book from the active database.
///
/// Reloads when the route id or the active database changes. Only the
/// newest load is shown.
#[component]
pub fn BookPage() -> impl IntoView {
    let scope = use_scope();
    let gateway = scope.read(&ui::GATEWAY).expect_value();
    let databases = scope.read(&ui::DATABASES).expect_value();
    let language = scope.read(&ui::LANGUAGE).expect_value();

    let lang = use_observable(language.observable());
    let active = use_observable(databases.active_observable());
    let text = move |key: &'static str| t(&lang.get(), key);

    let params = use_params_map();
    let state = RwSignal::new(BookState::default());

    Effect::new(move || {
        let raw = params.read().get("id").unwrap_or_default();
        // Tracked so a database switch reloads the page.
        let _ = active.get();
        let Some(id) = parse_book_id(&raw) else {
            state.update(|s| s.reject(format!("invalid book id `{raw}`")));
            return;
        };
        let Some(generation) = state.try_update(BookState::begin_load) else {
            return;
        };
        let gateway = gateway.clone();
        spawn_local(async move {
            let outcome = load_book(&gateway, id).await;
            if !state.try_update(|s| s.finish_load(generation, outcome)).unwrap_or(false) {
                log::debug!("dropping superseded load of book {id}");
            }
        });
    });

    view! {
        <div class="book-page">
            <A href="/">{move || text("book.back")}</A>

            <Show when=move || state.with(|s| s.loading)>
                <p class="book-page__loading">{move || text("book.loading")}</p>
            </Show>

            {move || {
                state
                    .with(|s| s.error.clone())
                    .map(|message| view! { <p class="book-page__error">{message}</p> })
            }}

            {move || match state.with(|s| s.book.clone()) {
                Some(book) => {
                    let authors = book.authors.join(", ");
                    let tags = book.tags.clone().unwrap_or_default().join(", ");
                    view! {
                        <article class="book-page__detail">
                            <h1>{book.title}</h1>
                            {book.sub_title.map(|sub| view! { <h2>{sub}</h2> })}
                            <dl>
                                <dt>{move || text("book.authors")}</dt>
                                <dd>{authors}</dd>
                                <dt>{move || text("book.isbn")}</dt>
                                <dd>{book.isbn}</dd>
                                <dt>{move || text("book.language")}</dt>
                                <dd>{book.lang}</dd>
                                <dt>{move || text("book.publisher")}</dt>
                                <dd>{book.publisher.unwrap_or_default()}</dd>
                                <dt>{move || text("book.tags")}</dt>
                                <dd>{tags}</dd>
                            </dl>
                            {book.description.map(|d| view! { <p class="book-page__description">{d}</p> })}
                        </article>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <Show when=move || state.with(|s| !s.loading && s.error.is_none())>
                            <p>{move || text("book.not_found")}</p>
                        </Show>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
