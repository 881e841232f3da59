//! # blog-ui
//!
//! Leptos + WASM front end for the blog platform: login and registration
//! views, a persisted user session, and the HTTP request pipeline shared by
//! all API calls.
//!
//! This crate contains pages, application state, the network layer, toast
//! messaging, and the debounce/throttle helpers used by UI event handlers.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod ui;
pub mod util;

/// WASM entry point: installs panic/console logging and hydrates the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
