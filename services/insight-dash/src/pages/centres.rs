// services/insight-dash/src/pages/centres.rs
//
// Insight Dashboard - Centres & activation page
//

use leptos::*;

use accesstrial_shared::pages::{centre_activity, centres::DEFAULT_CENTRE};

use crate::components::{GlobalFilters, PageHeader};
use crate::state::{use_page_filters, DashState, Page};

#[component]
pub fn CentresPage(state: DashState) -> impl IntoView {
    let filters = use_page_filters(Page::Centres);
    let selected = create_rw_signal(DEFAULT_CENTRE.to_string());

    // Unknown ids cannot come from the list below; fall back to the default centre anyway
    let activity = Signal::derive(move || {
        selected.with(|id| centre_activity(Some(id)))
            .or_else(|e| {
                log::warn!("{}", e);
                centre_activity(None)
            })
            .ok()
    });

    view! {
        <PageHeader page=Page::Centres state=state />
        <GlobalFilters filters=filters state=state />

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <h2 class="panel-title">"Centres à fort potentiel"</h2>
                <ul class="centre-list">
                    {move || activity.get().map(|a| {
                        a.centres
                            .into_iter()
                            .map(|centre| {
                                let id = centre.id;
                                view! {
                                    <li
                                        class="centre-item"
                                        class:active=move || selected.with(|s| s == id)
                                        on:click=move |_| {
                                            selected.set(id.to_string());
                                            state.log("info", &format!("Centre sélectionné : {}", centre.name));
                                        }
                                    >
                                        <span class="centre-name">{centre.name}</span>
                                        <span class="centre-meta">
                                            {format!("{} indications · {} RCP", centre.indications, centre.rcps)}
                                        </span>
                                    </li>
                                }
                            })
                            .collect_view()
                    })}
                </ul>
            </section>

            <section class="panel">
                <h2 class="panel-title">
                    "Indicateurs clés - "
                    {move || activity.get().map(|a| a.selected.name)}
                </h2>
                <div class="indicator-grid">
                    {move || activity.get().map(|a| {
                        a.indicators
                            .into_iter()
                            .map(|indicator| view! {
                                <div class="indicator-card" title=indicator.tooltip>
                                    <span class="indicator-label">{indicator.label}</span>
                                    <span class="indicator-value">{indicator.value}</span>
                                </div>
                            })
                            .collect_view()
                    })}
                </div>
            </section>
        </div>
    }
}
