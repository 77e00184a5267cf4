//! # client
//!
//! Leptos + WASM front-end for the home-staging editor. Pages, components,
//! application state, and the network layer live here; the pixel-level mask
//! engine lives in the `canvas` crate and is driven through the
//! `CanvasHost` bridge component.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: mount the application into `<body>`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger init failed: {e}").into());
    }
    leptos::mount::mount_to_body(app::App);
}
