//! Full record view at `/person/:id`, with delete.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use registry::{ClientConfig, PersonRecord};

use crate::components::error_banner::ErrorBanner;
use crate::components::person_card::{category_label, initials};
use crate::components::person_modal::detail_rows;
use crate::components::toast_host::notify;
use crate::state::toast::{ToastKind, ToastState};

#[derive(Clone, Debug, PartialEq)]
enum Lookup {
    Loading,
    Found(PersonRecord),
    Missing,
    Deleted(String),
    Failed(String),
}

#[component]
pub fn PersonPage() -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let params = use_params_map();
    let lookup = RwSignal::new(Lookup::Loading);
    let deleting = RwSignal::new(false);

    Effect::new(move || {
        let id = params.with(|p| p.get("id")).unwrap_or_default();
        lookup.set(Lookup::Loading);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let next = match crate::net::api::fetch_person(&id).await {
                Ok(Some(record)) => Lookup::Found(record),
                Ok(None) => Lookup::Missing,
                Err(err) => Lookup::Failed(err.to_string()),
            };
            lookup.try_set(next);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    });

    let on_delete = move |_| {
        let Lookup::Found(record) = lookup.get_untracked() else {
            return;
        };
        if deleting.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let prompt = format!("Delete the record for {}?", record.display_name());
            let confirmed = web_sys::window().is_some_and(|w| w.confirm_with_message(&prompt).unwrap_or(false));
            if !confirmed {
                return;
            }
            deleting.set(true);
            leptos::task::spawn_local(async move {
                match crate::net::api::delete_person(&record).await {
                    Ok(()) => {
                        let name = record.display_name().to_owned();
                        notify(toasts, ToastKind::Success, format!("Deleted {name}"));
                        lookup.try_set(Lookup::Deleted(name));
                    }
                    Err(err) => notify(toasts, ToastKind::Error, format!("Delete failed: {err}")),
                }
                deleting.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (record, toasts);
        }
    };

    let errors = Signal::derive(move || match lookup.get() {
        Lookup::Failed(message) => vec![message],
        _ => Vec::new(),
    });
    let api_base_url = config.api_base_url;

    view! {
        <div class="person-page">
            <ErrorBanner messages=errors/>
            {move || match lookup.get() {
                Lookup::Loading => view! { <p class="person-page__status">"Loading…"</p> }.into_any(),
                Lookup::Missing => view! { <p class="person-page__status">"No record with this id."</p> }.into_any(),
                Lookup::Deleted(name) => {
                    view! { <p class="person-page__status">"The record for " {name} " was deleted."</p> }.into_any()
                }
                Lookup::Failed(_) => ().into_any(),
                Lookup::Found(record) => {
                    let name = record.display_name().to_owned();
                    let image = record.image_src(&api_base_url);
                    let avatar = initials(&name);
                    view! {
                        <article class="person-page__record" class:person-page__record--provisional=record.is_provisional()>
                            <header class="person-page__header">
                                {match image {
                                    Some(src) => view! { <img class="person-page__photo" src=src alt=name.clone()/> }.into_any(),
                                    None => view! { <span class="dialog__avatar">{avatar}</span> }.into_any(),
                                }}
                                <div>
                                    <h1>{name.clone()}</h1>
                                    <span class="person-card__badge">{category_label(&record)}</span>
                                </div>
                            </header>
                            <dl class="person-page__details">
                                {detail_rows(&record)
                                    .into_iter()
                                    .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                                    .collect_view()}
                            </dl>
                        </article>
                    }
                        .into_any()
                }
            }}
            <div class="person-page__actions">
                <A href="/search" attr:class="btn">"Back to search"</A>
                <Show when=move || matches!(lookup.get(), Lookup::Found(_))>
                    <button class="btn btn--danger" on:click=on_delete disabled=move || deleting.get()>
                        {move || if deleting.get() { "Deleting…" } else { "Delete record" }}
                    </button>
                </Show>
            </div>
        </div>
    }
}
