//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render registry records, form sections, and feedback surfaces
//! while reading/writing shared state from Leptos context providers.

pub mod error_banner;
pub mod form_section;
pub mod nav_bar;
pub mod person_card;
pub mod person_modal;
pub mod photo_input;
pub mod scroll_sentinel;
pub mod success_animation;
pub mod toast_host;
