//! Grid card for one person record.

#[cfg(test)]
#[path = "person_card_test.rs"]
mod person_card_test;

use leptos::prelude::*;
use registry::PersonRecord;
use registry::record::NOT_AVAILABLE;

/// Category label, or `N/A` when the record carries no discriminator.
pub fn category_label(record: &PersonRecord) -> &'static str {
    record.category().map_or(NOT_AVAILABLE, |c| c.label())
}

/// Second line of the card: national id, guardian, or disability, in that order.
pub fn card_subtitle(record: &PersonRecord) -> String {
    if let Some(id) = record.field("national_id").filter(|v| !v.trim().is_empty()) {
        return format!("ID {id}");
    }
    if let Some(guardian) = record.field("guardian_name").filter(|v| !v.trim().is_empty()) {
        return format!("Guardian: {guardian}");
    }
    if let Some(disability) = record.field("disability_type").filter(|v| !v.trim().is_empty()) {
        return format!("Disability: {disability}");
    }
    NOT_AVAILABLE.to_owned()
}

/// Initials for the placeholder avatar.
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();
    if initials.is_empty() { "?".to_owned() } else { initials }
}

#[component]
pub fn PersonCard(record: PersonRecord, api_base_url: String, on_select: Callback<PersonRecord>) -> impl IntoView {
    let image = record.image_src(&api_base_url);
    let name = record.display_name().to_owned();
    let avatar = initials(&name);
    let subtitle = card_subtitle(&record);
    let category = category_label(&record);
    let last_seen = record.field_or_na("last_seen_location");
    let provisional = record.is_provisional();
    let selected = record.clone();

    view! {
        <article
            class="person-card"
            class:person-card--provisional=provisional
            on:click=move |_| on_select.run(selected.clone())
        >
            <div class="person-card__photo">
                {match image {
                    Some(src) => view! { <img src=src alt=name.clone() loading="lazy"/> }.into_any(),
                    None => view! { <span class="person-card__avatar">{avatar}</span> }.into_any(),
                }}
            </div>
            <div class="person-card__body">
                <h3 class="person-card__name">{name.clone()}</h3>
                <span class="person-card__badge">{category}</span>
                <p class="person-card__subtitle">{subtitle}</p>
                <p class="person-card__meta">"Last seen: " {last_seen}</p>
            </div>
        </article>
    }
}
