//! Invisible marker at the end of a list that requests the next window of
//! results when it scrolls into view.
//!
//! DESIGN
//! ======
//! The observer and its JS callback are kept in a local `StoredValue` so they
//! live exactly as long as the component and are disconnected on cleanup.

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
type ObserverSlot = Option<(
    web_sys::IntersectionObserver,
    wasm_bindgen::closure::Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>,
)>;

#[component]
pub fn ScrollSentinel(
    /// Whether more results exist; the sentinel is inert otherwise.
    #[prop(into)]
    active: Signal<bool>,
    on_visible: Callback<()>,
) -> impl IntoView {
    let sentinel_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        let slot: StoredValue<ObserverSlot, LocalStorage> = StoredValue::new_local(None);
        Effect::new(move || {
            let Some(element) = sentinel_ref.get() else {
                return;
            };
            if slot.with_value(Option::is_some) {
                return;
            }
            let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
                move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
                    let visible = entries.iter().any(|entry| {
                        entry
                            .dyn_into::<web_sys::IntersectionObserverEntry>()
                            .is_ok_and(|entry| entry.is_intersecting())
                    });
                    if visible && active.get_untracked() {
                        on_visible.run(());
                    }
                },
            );
            let options = web_sys::IntersectionObserverInit::new();
            options.set_root_margin("200px");
            match web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
                Ok(observer) => {
                    observer.observe(&element);
                    slot.set_value(Some((observer, callback)));
                }
                Err(err) => log::warn!("scroll sentinel: observer unavailable: {err:?}"),
            }
        });
        on_cleanup(move || {
            slot.update_value(|slot| {
                if let Some((observer, _callback)) = slot.take() {
                    observer.disconnect();
                }
            });
        });
    }

    view! {
        <div class="scroll-sentinel" node_ref=sentinel_ref aria-hidden="true">
            <Show when=move || active.get()>
                <span class="scroll-sentinel__hint">"Loading more…"</span>
            </Show>
        </div>
    }
}
