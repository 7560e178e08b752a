//! One section of a registration wizard, rendered from its field specs.

#[cfg(test)]
#[path = "form_section_test.rs"]
mod form_section_test;

use leptos::prelude::*;
use registry::api::PhotoPart;
use registry::wizard::{FieldKind, FieldSpec, Wizard};

use super::photo_input::PhotoInput;
use crate::util::photo::{revoke_preview, swap_preview};

/// HTML `type` for single-line inputs.
pub fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Date => "date",
        FieldKind::Phone => "tel",
        FieldKind::Number => "text",
        FieldKind::Boolean => "checkbox",
        FieldKind::Photo => "file",
        FieldKind::Text | FieldKind::LongText | FieldKind::Choice(_) => "text",
    }
}

/// Whether a field is currently shown: conditional fields hide while their
/// flag is off.
pub fn is_visible(spec: &FieldSpec, wizard: &Wizard) -> bool {
    spec.required_when.is_none_or(|flag| wizard.draft().flag(flag))
}

/// Label with a required marker.
pub fn label_text(spec: &FieldSpec) -> String {
    if spec.required || spec.required_when.is_some() { format!("{} *", spec.label) } else { spec.label.to_owned() }
}

#[component]
pub fn FormSection(
    wizard: RwSignal<Wizard>,
    photo: RwSignal<Option<PhotoPart>>,
    preview: RwSignal<Option<String>>,
    on_error: Callback<String>,
) -> impl IntoView {
    // Changes only on a section change or a conditional flag flip; typing
    // leaves the rendered inputs in place.
    let fields = Memo::new(move |_| {
        wizard.with(|w| {
            w.current_spec()
                .map(|s| s.fields.iter().filter(|spec| is_visible(spec, w)).cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });
    let title = Memo::new(move |_| wizard.with(|w| w.current_spec().map_or("", |s| s.title)));

    let on_photo = Callback::new(move |(part, url): (PhotoPart, Option<String>)| {
        wizard.update(|w| w.set_photo(Some(part.upload.clone())));
        photo.set(Some(part));
        let displaced = preview.try_update(|slot| swap_preview(slot, url)).flatten();
        revoke_preview(displaced);
    });

    view! {
        <fieldset class="form-section">
            <legend class="form-section__title">{title}</legend>
            {move || {
                fields
                    .get()
                    .into_iter()
                    .map(|spec| render_field(spec, wizard, photo, preview, on_photo, on_error))
                    .collect_view()
            }}
        </fieldset>
    }
}

fn render_field(
    spec: FieldSpec,
    wizard: RwSignal<Wizard>,
    photo: RwSignal<Option<PhotoPart>>,
    preview: RwSignal<Option<String>>,
    on_photo: Callback<(PhotoPart, Option<String>)>,
    on_error: Callback<String>,
) -> AnyView {
    let key = spec.key;
    let label = label_text(&spec);
    let text = move || wizard.with(|w| w.draft().text(key).to_owned());
    let set_text = move |ev: leptos::ev::Event| wizard.update(|w| w.set_text(key, &event_target_value(&ev)));

    match spec.kind {
        FieldKind::Photo => view! {
            <PhotoInput label=label photo=photo preview=preview on_photo=on_photo on_error=on_error/>
        }
        .into_any(),
        FieldKind::Boolean => view! {
            <label class="form-field form-field--checkbox">
                <input
                    type="checkbox"
                    prop:checked=move || wizard.with(|w| w.draft().flag(key))
                    on:change=move |ev| wizard.update(|w| w.set_flag(key, event_target_checked(&ev)))
                />
                <span class="form-field__label">{label}</span>
            </label>
        }
        .into_any(),
        FieldKind::LongText => view! {
            <label class="form-field">
                <span class="form-field__label">{label}</span>
                <textarea rows="4" prop:value=text on:input=set_text></textarea>
            </label>
        }
        .into_any(),
        FieldKind::Choice(options) => view! {
            <label class="form-field">
                <span class="form-field__label">{label}</span>
                <select prop:value=text on:change=set_text>
                    <option value="">"Select…"</option>
                    {options
                        .iter()
                        .map(|option| view! { <option value=*option>{*option}</option> })
                        .collect_view()}
                </select>
            </label>
        }
        .into_any(),
        kind => view! {
            <label class="form-field">
                <span class="form-field__label">{label}</span>
                <input
                    type=input_type(kind)
                    inputmode=if kind == FieldKind::Number { "numeric" } else { "text" }
                    prop:value=text
                    on:input=set_text
                />
            </label>
        }
        .into_any(),
    }
}
