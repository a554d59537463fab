// services/insight-dash/src/app.rs
//
// Insight Dashboard - Main Application Component
//

use leptos::*;

use crate::components::{Header, Sidebar};
use crate::pages::{
    CentresPage, OverviewPage, PathologiesPage, RecruitmentPage, ReportsPage, SignalsPage,
    TerritoriesPage,
};
use crate::state::{DashState, Page};

#[component]
pub fn App() -> impl IntoView {
    let state = DashState::new();

    view! {
        <div class="insight-app" class:sidebar-collapsed=move || state.sidebar_collapsed.get()>
            <Sidebar state=state />

            <div class="main-column">
                <Header state=state />

                <main class="dashboard">
                    // Each page is rebuilt on navigation, so its filters start fresh
                    {move || match state.page.get() {
                        Page::Overview => view! { <OverviewPage state=state /> }.into_view(),
                        Page::Pathologies => view! { <PathologiesPage state=state /> }.into_view(),
                        Page::Territories => view! { <TerritoriesPage state=state /> }.into_view(),
                        Page::Centres => view! { <CentresPage state=state /> }.into_view(),
                        Page::Recruitment => view! { <RecruitmentPage state=state /> }.into_view(),
                        Page::Signals => view! { <SignalsPage state=state /> }.into_view(),
                        Page::Reports => view! { <ReportsPage state=state /> }.into_view(),
                    }}
                </main>

                <footer class="footer">
                    <span class="footer-brand">"access trial"</span>
                    <span class="footer-tagline">"Version Bêta Partenaires"</span>
                </footer>
            </div>
        </div>
    }
}
