//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! files, camera) from page and component logic to improve reuse and
//! testability.

pub mod camera;
pub mod photo;
pub mod storage;
pub mod time;
