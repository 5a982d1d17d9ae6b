//! # client
//!
//! Leptos + WASM front end for the course portal. Every route renders behind
//! the `session` crate's guard: this crate only supplies the browser adapters
//! (HTTP via `gloo-net`, `document.cookie`, the Leptos router) and the pages.
//!
//! Build with `--features csr` for the browser. Without it the adapters are
//! inert stubs so the pure helpers can be unit-tested natively.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    leptos::mount::mount_to_body(app::App);
}
