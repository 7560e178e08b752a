//! # client
//!
//! Leptos + WASM front-end for the Smart Face ID missing-persons registry.
//!
//! This crate contains pages, components, reactive state, and the browser
//! side of the network layer. Domain rules (records, wizard validation,
//! payloads, list queries, fallback policy) live in the `registry` crate;
//! this crate only renders them and wires them to browser APIs.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs the panic hook and console logger, then
/// hydrates the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("smartface client starting");
    leptos::mount::hydrate_body(app::App);
}
