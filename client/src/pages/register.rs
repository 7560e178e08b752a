//! Registration wizard pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! One generic page drives every category; the per-category route
//! components only pick the schema. Submission goes through the shared
//! registry client, which walks the fallback chain and may hand back a
//! provisional record instead of a confirmed one.
//!
//! ERROR HANDLING
//! ==============
//! Validation failures stay inline on the form. Server errors land in the
//! form's error list and a toast; a provisional outcome is shown as a
//! warning so the operator knows the record is not confirmed.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use registry::api::PhotoPart;
use registry::fallback::RegisterOutcome;
use registry::schemas::schema_for;
use registry::wizard::{Wizard, WizardStatus};
use registry::{Category, ClientConfig};

use crate::components::error_banner::ErrorBanner;
use crate::components::form_section::FormSection;
use crate::components::success_animation::SuccessAnimation;
use crate::components::toast_host::notify;
use crate::state::toast::{ToastKind, ToastState};

/// e.g. `"Step 2 of 4"`.
pub fn step_label(current: usize, total: usize) -> String {
    format!("Step {current} of {total}")
}

/// Progress through the wizard as a whole percentage.
pub fn progress_percent(current: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    current.min(total) * 100 / total
}

/// Title and detail for the overlay shown after a submission.
pub fn outcome_message(outcome: &RegisterOutcome) -> (String, String) {
    let name = outcome.record().display_name().to_owned();
    match outcome {
        RegisterOutcome::Confirmed(_) => ("Registration complete".to_owned(), format!("{name} has been registered.")),
        RegisterOutcome::Provisional { reason, .. } => (
            "Saved locally".to_owned(),
            format!("{name} was saved on this device only: {reason}."),
        ),
    }
}

#[component]
pub fn RegisterPage(category: Category) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let wizard = RwSignal::new(Wizard::new(schema_for(category)));
    let photo = RwSignal::new(None::<PhotoPart>);
    let preview = RwSignal::new(None::<String>);
    let outcome = RwSignal::new(None::<RegisterOutcome>);
    let reset_ms = config.success_reset_ms;
    on_cleanup(move || crate::util::photo::revoke_preview(preview.try_get_untracked().flatten()));

    let on_photo_error = Callback::new(move |message: String| notify(toasts, ToastKind::Error, message));

    let on_next = move |_| {
        wizard.update(|w| {
            w.next_section();
        });
    };
    let on_prev = move |_| wizard.update(Wizard::prev_section);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !wizard.try_update(Wizard::begin_submit).unwrap_or(false) {
            return;
        }
        let draft = wizard.with_untracked(|w| w.draft().clone());
        let attached = photo.get_untracked();

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(category, draft, attached).await {
                Ok(result) => {
                    if result.is_confirmed() {
                        crate::net::api::invalidate_lists();
                        notify(toasts, ToastKind::Success, "Registration saved");
                    } else {
                        notify(toasts, ToastKind::Warning, "Server did not confirm the registration");
                    }
                    wizard.update(|w| w.finish_submit(Ok(())));
                    outcome.set(Some(result));
                    gloo_timers::callback::Timeout::new(reset_ms, move || {
                        wizard.try_update(Wizard::reset);
                        photo.try_set(None);
                        let displaced =
                            preview.try_update(|slot| crate::util::photo::swap_preview(slot, None)).flatten();
                        crate::util::photo::revoke_preview(displaced);
                        outcome.try_set(None);
                    })
                    .forget();
                }
                Err(err) => {
                    notify(toasts, ToastKind::Error, err.to_string());
                    wizard.update(|w| w.finish_submit(Err(err.to_string())));
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (draft, attached, reset_ms, outcome);
        }
    };

    let title = wizard.with_untracked(|w| w.schema().title);
    let errors = Signal::derive(move || wizard.with(|w| w.errors().to_vec()));
    let step = move || wizard.with(|w| step_label(w.current_section(), w.section_count()));
    let progress = move || {
        wizard.with(|w| format!("width: {}%", progress_percent(w.current_section(), w.section_count())))
    };
    let on_first = move || wizard.with(|w| w.current_section() == 1);
    let on_last = move || wizard.with(Wizard::is_last_section);
    let submitting = move || wizard.with(|w| *w.status() == WizardStatus::Submitting);

    view! {
        <div class="register-page">
            <h1>{title}</h1>
            <div class="wizard-progress">
                <span class="wizard-progress__label">{step}</span>
                <div class="wizard-progress__bar">
                    <div class="wizard-progress__fill" style=progress></div>
                </div>
            </div>
            {move || {
                outcome
                    .get()
                    .map(|result| {
                        let (title, detail) = outcome_message(&result);
                        view! { <SuccessAnimation title=title detail=detail provisional=!result.is_confirmed()/> }
                    })
            }}
            <form class="wizard" on:submit=on_submit>
                <ErrorBanner messages=errors/>
                <FormSection wizard=wizard photo=photo preview=preview on_error=on_photo_error/>
                <div class="wizard__actions">
                    <button type="button" class="btn" on:click=on_prev disabled=on_first>
                        "Back"
                    </button>
                    <Show
                        when=on_last
                        fallback=move || {
                            view! {
                                <button type="button" class="btn btn--primary" on:click=on_next>
                                    "Next"
                                </button>
                            }
                        }
                    >
                        <button type="submit" class="btn btn--primary" disabled=submitting>
                            {move || if submitting() { "Submitting…" } else { "Submit" }}
                        </button>
                    </Show>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn RegisterManPage() -> impl IntoView {
    view! { <RegisterPage category=Category::Man/> }
}

#[component]
pub fn RegisterWomanPage() -> impl IntoView {
    view! { <RegisterPage category=Category::Woman/> }
}

#[component]
pub fn RegisterChildPage() -> impl IntoView {
    view! { <RegisterPage category=Category::Child/> }
}

#[component]
pub fn RegisterDisabledPage() -> impl IntoView {
    view! { <RegisterPage category=Category::Disabled/> }
}
