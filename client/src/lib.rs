//! # client
//!
//! Leptos + WASM frontend that embeds the panoramic viewer.
//!
//! This crate contains the tour page, the `VrviewHost` bridge component,
//! application state and browser utilities. It integrates with the `viewer`
//! crate, which owns the viewer lifecycle and the engine binding; this crate
//! only wires browser events, timers and reactive state to it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and the panic hook, then hydrate.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already installed: {err}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
