//! storefront Web Frontend
//!
//! Leptos-based WASM frontend for the pricing page. The pricing and
//! checkout decisions live in `storefront-core`; this crate supplies the
//! browser side of its ports.

mod api;
mod app;
mod auth;
mod browser;
mod components;
mod pages;
mod stripe_js;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
