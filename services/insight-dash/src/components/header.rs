// services/insight-dash/src/components/header.rs
//
// Insight Dashboard - Header Component
//

use leptos::*;

use crate::state::DashState;

#[component]
pub fn Header(state: DashState) -> impl IntoView {
    let year = js_sys::Date::new_0().get_full_year();
    let unread = move || state.logs.with(|logs| logs.len());

    view! {
        <header class="header">
            <div class="header-left">
                <button
                    class="sidebar-trigger"
                    title="Réduire le menu"
                    on:click=move |_| state.sidebar_collapsed.update(|c| *c = !*c)
                >
                    "☰"
                </button>
                <span class="badge">"Version Bêta Partenaires"</span>
                <span class="header-date">{format!("📅 {}", year)}</span>
            </div>

            <div class="header-actions">
                <span class="notifications" title="Actions récentes">
                    "🔔"
                    <Show when=move || { unread() > 0 } fallback=|| ()>
                        <span class="notification-count">{unread}</span>
                    </Show>
                </span>
                <span class="user">"Utilisateur"</span>
            </div>
        </header>
    }
}
