//! Client-side reactive state modules.
//!
//! Plain structs held in `RwSignal`s: `toast` is shared through context,
//! `search` and `identify` are owned by their pages.

pub mod identify;
pub mod search;
pub mod toast;
