//! Detail modal for a person selected from a list.

#[cfg(test)]
#[path = "person_modal_test.rs"]
mod person_modal_test;

use leptos::prelude::*;
use leptos_router::components::A;
use registry::PersonRecord;
use registry::schemas::schema_for;
use registry::wizard::FieldKind;

use super::person_card::{category_label, initials};

/// Fields shown for records whose category cannot be determined.
const GENERIC_FIELDS: &[(&str, &str)] = &[
    ("Name", "name"),
    ("Full name", "full_name"),
    ("National ID", "national_id"),
    ("Address", "address"),
    ("Phone number", "phone_number"),
    ("Last seen location", "last_seen_location"),
];

/// Label/value pairs for a record, in the order its registration form asks
/// for them. Absent values render as `N/A`.
pub fn detail_rows(record: &PersonRecord) -> Vec<(&'static str, String)> {
    let mut rows: Vec<(&'static str, String)> = match record.category() {
        Some(category) => schema_for(category)
            .fields()
            .filter(|spec| spec.kind != FieldKind::Photo)
            .map(|spec| (spec.label, record.field_or_na(spec.key)))
            .collect(),
        None => GENERIC_FIELDS.iter().map(|(label, key)| (*label, record.field_or_na(key))).collect(),
    };
    rows.push(("Registered", record.field_or_na("created_at")));
    rows
}

#[component]
pub fn PersonModal(record: PersonRecord, api_base_url: String, on_close: Callback<()>) -> impl IntoView {
    let image = record.image_src(&api_base_url);
    let name = record.display_name().to_owned();
    let avatar = initials(&name);
    let category = category_label(&record);
    let rows = detail_rows(&record);
    let detail_href = format!("/person/{}", record.id);
    let provisional = record.is_provisional();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--person"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <header class="dialog__header">
                    {match image {
                        Some(src) => view! { <img class="dialog__photo" src=src alt=name.clone()/> }.into_any(),
                        None => view! { <span class="dialog__avatar">{avatar}</span> }.into_any(),
                    }}
                    <div>
                        <h2>{name.clone()}</h2>
                        <span class="person-card__badge">{category}</span>
                    </div>
                </header>
                <Show when=move || provisional>
                    <p class="dialog__warning">"This record was saved locally and is not confirmed by the server."</p>
                </Show>
                <dl class="dialog__details">
                    {rows
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <dt>{label}</dt>
                                <dd>{value}</dd>
                            }
                        })
                        .collect_view()}
                </dl>
                <div class="dialog__actions">
                    <A href=detail_href attr:class="btn">"Open record"</A>
                    <button class="btn btn--primary" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}
