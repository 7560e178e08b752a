//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use registry::ClientConfig;

use crate::components::nav_bar::NavBar;
use crate::components::toast_host::ToastHost;
use crate::pages::{
    home::HomePage,
    identify::IdentifyPage,
    person::PersonPage,
    register::{RegisterChildPage, RegisterDisabledPage, RegisterManPage, RegisterWomanPage},
    search::{SearchAllPage, SearchChildrenPage, SearchDisabilitiesPage},
};
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the toast queue and client configuration, and sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    provide_context(toasts);
    provide_context(ClientConfig::from_build_env());

    view! {
        <Stylesheet id="leptos" href="/pkg/smartface.css"/>
        <Title text="Smart Face ID"/>

        <Router>
            <NavBar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=(StaticSegment("register"), StaticSegment("man")) view=RegisterManPage/>
                    <Route path=(StaticSegment("register"), StaticSegment("woman")) view=RegisterWomanPage/>
                    <Route path=(StaticSegment("register"), StaticSegment("child")) view=RegisterChildPage/>
                    <Route path=(StaticSegment("register"), StaticSegment("disabled")) view=RegisterDisabledPage/>
                    <Route path=StaticSegment("identify") view=IdentifyPage/>
                    <Route path=StaticSegment("search") view=SearchAllPage/>
                    <Route path=(StaticSegment("search"), StaticSegment("children")) view=SearchChildrenPage/>
                    <Route path=(StaticSegment("search"), StaticSegment("disabilities")) view=SearchDisabilitiesPage/>
                    <Route path=(StaticSegment("person"), ParamSegment("id")) view=PersonPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
