// services/insight-dash/src/lib.rs
//
// Insight Dashboard - Library exports
//

pub mod app;
pub mod components;
pub mod pages;
pub mod state;

use wasm_bindgen::prelude::*;

/// Mount the dashboard on `<body>`.
pub fn mount() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("AccessTrial insight dashboard starting...");

    leptos::mount_to_body(|| {
        leptos::view! { <app::App /> }
    });
}

/// Entry point for hosts loading the wasm module directly.
#[wasm_bindgen(js_name = startDashboard)]
pub fn start_dashboard() {
    mount();
}
