// services/insight-dash/src/pages/overview.rs
//
// Insight Dashboard - Overview page
// KPIs, interest evolution and ranked indications for the current filters
//

use leptos::*;

use accesstrial_shared::{derive_metrics, presentation::priority_alert, ReferenceData};

use crate::components::{
    AlertBanner, EvolutionChart, GlobalFilters, KpiCards, PageHeader, RankingTable,
};
use crate::state::{use_page_filters, DashState, Page};

#[component]
pub fn OverviewPage(state: DashState) -> impl IntoView {
    let reference = ReferenceData::global();
    let filters = use_page_filters(Page::Overview);

    let metrics = create_memo(move |_| filters.with(|f| derive_metrics(reference, f)));
    let alert = create_memo(move |_| filters.with(|f| priority_alert(reference, f)));

    let evolution = Signal::derive(move || metrics.with(|m| m.evolution.clone()));
    let ranked = Signal::derive(move || metrics.with(|m| m.ranked_indications.clone()));

    view! {
        <PageHeader page=Page::Overview state=state />
        <GlobalFilters filters=filters state=state />

        <AlertBanner
            description=alert
            on_details=Callback::new(move |_| state.navigate(Page::Pathologies))
        />

        <KpiCards metrics=metrics />

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <h3 class="panel-title" title="Évolution temporelle du nombre d'essais cliniques actifs">
                    "Évolution des essais cliniques"
                </h3>
                <EvolutionChart points=evolution />
            </section>

            <section class="panel">
                <h3
                    class="panel-title"
                    title="Liste des pathologies présentant le plus fort intérêt médical et le moins d'essais concurrents"
                >
                    "Top indications prioritaires"
                </h3>
                <RankingTable rows=ranked />
            </section>
        </div>
    }
}
