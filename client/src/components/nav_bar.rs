//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn NavBar() -> impl IntoView {
    let menu_open = RwSignal::new(false);
    let close = move |_| menu_open.set(false);

    view! {
        <nav class="nav-bar">
            <A href="/" attr:class="nav-bar__brand">"Smart Face ID"</A>
            <button
                class="nav-bar__toggle"
                title="Menu"
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                "☰"
            </button>
            <div class="nav-bar__links" class:nav-bar__links--open=move || menu_open.get() on:click=close>
                <div class="nav-bar__group">
                    <span class="nav-bar__group-title">"Register"</span>
                    <A href="/register/man">"Man"</A>
                    <A href="/register/woman">"Woman"</A>
                    <A href="/register/child">"Child"</A>
                    <A href="/register/disabled">"Disabled person"</A>
                </div>
                <div class="nav-bar__group">
                    <span class="nav-bar__group-title">"Browse"</span>
                    <A href="/search">"All records"</A>
                    <A href="/search/children">"Children"</A>
                    <A href="/search/disabilities">"Disabilities"</A>
                </div>
                <A href="/identify" attr:class="nav-bar__cta">"Identify a face"</A>
            </div>
        </nav>
    }
}
