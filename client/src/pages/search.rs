//! Search and browse pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page loads one list (cache first, then the network with retries),
//! and from then on answers the search box, filters, sort, and infinite
//! scroll locally through `SearchState`.
//!
//! TRADE-OFFS
//! ==========
//! The whole collection is held in memory. Registries are small enough that
//! this beats server-side paging in responsiveness, and it keeps the page
//! usable from cache when the backend is flaky.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::collections::BTreeSet;

use leptos::prelude::*;
use registry::query::{ListFilter, SearchKind, SortOrder};
use registry::{Category, ClientConfig, PersonRecord};

use crate::components::error_banner::ErrorBanner;
use crate::components::person_card::PersonCard;
use crate::components::person_modal::PersonModal;
use crate::components::scroll_sentinel::ScrollSentinel;
use crate::state::search::SearchState;

/// Categories offered as filter checkboxes; child and disability lists are
/// already single-category.
pub fn category_choices(kind: SearchKind) -> &'static [Category] {
    match kind {
        SearchKind::All => &Category::ALL,
        SearchKind::Children | SearchKind::Disabilities => &[],
    }
}

/// Distinct, sorted disability types present in `records`.
pub fn disability_options(records: &[PersonRecord]) -> Vec<String> {
    let options: BTreeSet<String> = records
        .iter()
        .filter_map(|r| r.disability_type.as_deref())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    options.into_iter().collect()
}

pub fn toggle_category(filter: &mut ListFilter, category: Category, checked: bool) {
    if checked {
        filter.categories.insert(category);
    } else {
        filter.categories.remove(&category);
    }
}

/// Blank select values clear the filter.
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn load(state: RwSignal<SearchState>, refresh: bool) {
    let kind = state.with_untracked(|s| s.kind);
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::load_list(kind, refresh).await;
        if let Ok(records) = &result {
            log::debug!("{} list loaded: {} records", kind.cache_key(), records.len());
        }
        state.try_update(|s| s.finish_load(result.map_err(|err| err.to_string())));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (kind, refresh);
    }
}

#[component]
pub fn SearchPage(kind: SearchKind) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let state = RwSignal::new(SearchState::new(kind, config.page_size));
    let selected = RwSignal::new(None::<PersonRecord>);
    let debounce_ms = config.search_debounce_ms;
    let api_base_url = StoredValue::new(config.api_base_url.clone());

    state.update(SearchState::begin_load);
    load(state, false);

    let on_refresh = move |_| {
        state.update(SearchState::begin_load);
        load(state, true);
    };
    let on_retry = Callback::new(move |()| {
        state.update(SearchState::begin_retry);
        load(state, true);
    });

    let on_term = move |ev: leptos::ev::Event| {
        let ticket = state.try_update(|s| s.type_term(event_target_value(&ev)));
        #[cfg(feature = "hydrate")]
        if let Some(ticket) = ticket {
            gloo_timers::callback::Timeout::new(debounce_ms, move || {
                state.try_update(|s| s.settle_term(ticket));
            })
            .forget();
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ticket, debounce_ms);
        }
    };

    let on_sort = move |ev: leptos::ev::Event| {
        let sort = SortOrder::parse(&event_target_value(&ev));
        state.update(|s| s.set_sort(sort));
    };
    let on_select = Callback::new(move |record: PersonRecord| selected.set(Some(record)));
    let on_close = Callback::new(move |()| selected.set(None));
    let on_more = Callback::new(move |()| {
        state.update(|s| {
            s.load_more();
        });
    });

    let errors = Signal::derive(move || state.with(SearchState::error_lines));
    let has_more = Signal::derive(move || state.with(SearchState::has_more));
    let loading = move || state.with(|s| s.loading);
    let show_disability = kind != SearchKind::Children;

    view! {
        <div class="search-page">
            <header class="search-page__header">
                <h1>{kind.title()}</h1>
                <button class="btn" on:click=on_refresh disabled=loading>
                    "Refresh"
                </button>
            </header>

            <div class="search-page__controls">
                <input
                    class="search-page__term"
                    type="search"
                    placeholder="Search by name, ID, phone, or location"
                    prop:value=move || state.with(|s| s.term_input.clone())
                    on:input=on_term
                />
                <select
                    class="search-page__sort"
                    prop:value=move || state.with(|s| s.query.sort().as_str())
                    on:change=on_sort
                >
                    {SortOrder::ALL
                        .into_iter()
                        .map(|order| view! { <option value=order.as_str()>{order.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="search-page__filters">
                {category_choices(kind)
                    .iter()
                    .map(|category| {
                        let category = *category;
                        view! {
                            <label class="filter-chip">
                                <input
                                    type="checkbox"
                                    prop:checked=move || {
                                        state.with(|s| s.query.filter().categories.contains(&category))
                                    }
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        state.update(|s| s.update_filter(|f| toggle_category(f, category, checked)));
                                    }
                                />
                                {category.label()}
                            </label>
                        }
                    })
                    .collect_view()}
                <select
                    class="filter-select"
                    on:change=move |ev| {
                        let gender = non_blank(event_target_value(&ev));
                        state.update(|s| s.update_filter(|f| f.gender = gender));
                    }
                >
                    <option value="">"Any gender"</option>
                    <option value="male">"Male"</option>
                    <option value="female">"Female"</option>
                </select>
                <Show when=move || show_disability>
                    <select
                        class="filter-select"
                        on:change=move |ev| {
                            let disability = non_blank(event_target_value(&ev));
                            state.update(|s| s.update_filter(|f| f.disability_type = disability));
                        }
                    >
                        <option value="">"Any disability"</option>
                        {move || {
                            state
                                .with(|s| disability_options(&s.records))
                                .into_iter()
                                .map(|option| { let label = option.clone(); view! { <option value=option>{label}</option> } })
                                .collect_view()
                        }}
                    </select>
                </Show>
                <label class="filter-chip">
                    <input
                        type="checkbox"
                        prop:checked=move || state.with(|s| s.query.filter().with_photo_only)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            state.update(|s| s.update_filter(|f| f.with_photo_only = checked));
                        }
                    />
                    "With photo"
                </label>
            </div>

            <ErrorBanner messages=errors on_retry=on_retry/>
            <p class="search-page__summary">
                {move || if loading() { "Loading…".to_owned() } else { state.with(SearchState::summary) }}
            </p>

            <div class="person-grid">
                {move || {
                    state
                        .with(SearchState::visible_records)
                        .into_iter()
                        .map(|record| {
                            view! {
                                <PersonCard
                                    record=record
                                    api_base_url=api_base_url.get_value()
                                    on_select=on_select
                                />
                            }
                        })
                        .collect_view()
                }}
            </div>
            <ScrollSentinel active=has_more on_visible=on_more/>

            {move || {
                selected
                    .get()
                    .map(|record| {
                        view! { <PersonModal record=record api_base_url=api_base_url.get_value() on_close=on_close/> }
                    })
            }}
        </div>
    }
}

#[component]
pub fn SearchAllPage() -> impl IntoView {
    view! { <SearchPage kind=SearchKind::All/> }
}

#[component]
pub fn SearchChildrenPage() -> impl IntoView {
    view! { <SearchPage kind=SearchKind::Children/> }
}

#[component]
pub fn SearchDisabilitiesPage() -> impl IntoView {
    view! { <SearchPage kind=SearchKind::Disabilities/> }
}
