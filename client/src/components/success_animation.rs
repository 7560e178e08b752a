//! Check-mark (or warning) overlay shown after a registration.

use leptos::prelude::*;

/// `provisional` swaps the check for a warning badge: the record was kept
/// locally but the server never confirmed it.
#[component]
pub fn SuccessAnimation(title: String, detail: String, provisional: bool) -> impl IntoView {
    let class = if provisional { "success-overlay success-overlay--warning" } else { "success-overlay" };
    view! {
        <div class=class>
            <div class="success-overlay__badge">
                {if provisional {
                    view! {
                        <svg viewBox="0 0 52 52" aria-hidden="true">
                            <circle cx="26" cy="26" r="24" fill="none"></circle>
                            <path d="M26 14 V30 M26 36 V38"></path>
                        </svg>
                    }
                        .into_any()
                } else {
                    view! {
                        <svg viewBox="0 0 52 52" aria-hidden="true">
                            <circle class="success-overlay__circle" cx="26" cy="26" r="24" fill="none"></circle>
                            <path class="success-overlay__check" d="M14 27 L22 35 L38 17"></path>
                        </svg>
                    }
                        .into_any()
                }}
            </div>
            <h2 class="success-overlay__title">{title}</h2>
            <p class="success-overlay__detail">{detail}</p>
        </div>
    }
}
