//! Landing page: navigation tiles plus backend health and record count.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::api::{BackendStatus, status_label};

/// Tiles shown on the landing page: (href, title, blurb).
const TILES: &[(&str, &str, &str)] = &[
    ("/register/man", "Register a man", "Adult male missing-person report"),
    ("/register/woman", "Register a woman", "Adult female missing-person report"),
    ("/register/child", "Register a child", "Child report with guardian details"),
    ("/register/disabled", "Register a person with a disability", "Includes care and medical needs"),
    ("/identify", "Identify a face", "Upload a photo or use the camera"),
    ("/search", "Browse records", "Search, filter, and sort every registration"),
];

#[component]
pub fn HomePage() -> impl IntoView {
    let status = RwSignal::new(None::<BackendStatus>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::backend_status().await;
        log::info!("backend status: online={} total={:?}", result.online, result.total_records);
        status.set(Some(result));
    });

    let status_text = move || status.get().map_or_else(|| "Checking backend…".to_owned(), |s| status_label(&s));
    let status_class = move || match status.get() {
        None => "home__status",
        Some(s) if s.online => "home__status home__status--online",
        Some(_) => "home__status home__status--offline",
    };

    view! {
        <div class="home">
            <header class="home__hero">
                <h1>"Smart Face ID"</h1>
                <p>"Register missing persons and identify them by face."</p>
                <span class=status_class>{status_text}</span>
            </header>
            <div class="home__tiles">
                {TILES
                    .iter()
                    .map(|(href, title, blurb)| {
                        view! {
                            <A href=*href attr:class="home__tile">
                                <h2>{*title}</h2>
                                <p>{*blurb}</p>
                            </A>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
