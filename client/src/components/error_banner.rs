//! Inline error list with an optional retry action.

use leptos::prelude::*;

#[component]
pub fn ErrorBanner(
    #[prop(into)] messages: Signal<Vec<String>>,
    #[prop(optional)] on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <Show when=move || !messages.get().is_empty()>
            <div class="error-banner" role="alert">
                <ul class="error-banner__list">
                    {move || {
                        messages
                            .get()
                            .into_iter()
                            .map(|message| view! { <li>{message}</li> })
                            .collect_view()
                    }}
                </ul>
                {on_retry.map(|retry| {
                    view! {
                        <button class="btn error-banner__retry" on:click=move |_| retry.run(())>
                            "Try again"
                        </button>
                    }
                })}
            </div>
        </Show>
    }
}
