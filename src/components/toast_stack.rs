//! On-screen toast notifications with auto-dismiss.

use leptos::prelude::*;

use crate::state::context::use_scope;
use crate::state::ui;
use crate::util::i18n::t;
use crate::util::notify::{Toast, ToastLevel};
use crate::util::reactive::use_observable;

/// Bottom-right stack rendering the shared toast queue.
#[component]
pub fn ToastStack() -> impl IntoView {
    let scope = use_scope();
    let toasts = scope.read(&ui::TOASTS).expect_value();
    let language = scope.read(&ui::LANGUAGE).expect_value();

    let items = use_observable(toasts.observable());
    let lang = use_observable(language.observable());
    let dismiss = Callback::new(move |id: u64| toasts.dismiss(id));

    #[cfg(feature = "csr")]
    {
        let toast_ms = scope.read(&ui::CONFIG).expect_value().toast_ms;
        let delay = u32::try_from(toast_ms).unwrap_or(u32::MAX);
        let last_scheduled = StoredValue::new(0_u64);
        Effect::new(move || {
            let due = crate::util::notify::toasts_after(&items.get(), last_scheduled.get_value());
            for id in due {
                last_scheduled.set_value(id);
                leptos::task::spawn_local(async move {
                    gloo_timers::future::TimeoutFuture::new(delay).await;
                    dismiss.run(id);
                });
            }
        });
    }

    view! {
        <div class="toast-stack" aria-live="polite">
            <For
                each=move || items.get()
                key=|toast: &Toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let is_error = toast.level == ToastLevel::Error;
                    view! {
                        <div class="toast" class:toast--error=move || is_error>
                            <span class="toast__message">{toast.message}</span>
                            <button
                                class="toast__dismiss"
                                title=move || t(&lang.get(), "toast.dismiss")
                                on:click=move |_| dismiss.run(id)
                            >
                                "\u{00D7}"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
