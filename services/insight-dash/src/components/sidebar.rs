// services/insight-dash/src/components/sidebar.rs
//
// Insight Dashboard - Sidebar navigation
//

use leptos::*;

use crate::state::{DashState, Page};

#[component]
pub fn Sidebar(state: DashState) -> impl IntoView {
    let collapsed = move || state.sidebar_collapsed.get();

    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">
                <span class="brand-mark">"●"</span>
                <Show when=move || !collapsed() fallback=|| ()>
                    <span class="brand-name">"access trial"</span>
                </Show>
            </div>

            <ul class="sidebar-menu">
                {Page::NAVIGATION
                    .into_iter()
                    .map(|page| {
                        let active = move || state.page.get() == page;
                        view! {
                            <li
                                class="sidebar-item"
                                class:active=active
                                title=page.nav_label()
                                on:click=move |_| state.navigate(page)
                            >
                                <span class="sidebar-icon">{page.icon()}</span>
                                <Show when=move || !collapsed() fallback=|| ()>
                                    <span class="sidebar-label">{page.nav_label()}</span>
                                </Show>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>

            <div class="sidebar-footer">
                <span class="sidebar-item logout">"⎋ Déconnexion"</span>
            </div>
        </nav>
    }
}
