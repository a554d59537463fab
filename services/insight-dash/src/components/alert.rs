// services/insight-dash/src/components/alert.rs
//
// Insight Dashboard - Priority alert banner
//

use leptos::*;

use accesstrial_shared::presentation::ALERT_TITLE;

#[component]
pub fn AlertBanner(
    #[prop(into)] description: Signal<String>,
    #[prop(optional)] on_details: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="alert-banner alert-warning" role="alert">
            <span class="alert-icon">"⚠"</span>
            <div class="alert-content">
                <h4 class="alert-title">{ALERT_TITLE}</h4>
                <p class="alert-description">{description}</p>
            </div>
            <button
                class="btn btn-outline alert-action"
                on:click=move |_| {
                    if let Some(cb) = on_details {
                        cb.call(());
                    }
                }
            >
                "Voir les détails"
            </button>
        </div>
    }
}
