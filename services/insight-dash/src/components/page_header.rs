// services/insight-dash/src/components/page_header.rs
//
// Insight Dashboard - Page title with export actions
//

use leptos::*;

use crate::state::{DashState, Page};

/// Export buttons only record the request; there is no export backend.
#[component]
pub fn PageHeader(page: Page, state: DashState) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-heading">
                <h1 class="page-title">{page.title()}</h1>
                <p class="page-description">{page.description()}</p>
            </div>
            <div class="page-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| state.log("info", &format!("Export PDF demandé ({})", page.title()))
                >
                    "⎙ Export PDF"
                </button>
                <button
                    class="btn btn-outline-orange"
                    on:click=move |_| state.log("info", &format!("Export CSV demandé ({})", page.title()))
                >
                    "⇩ Export CSV"
                </button>
            </div>
        </div>
    }
}
