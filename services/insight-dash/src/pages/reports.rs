// services/insight-dash/src/pages/reports.rs
//
// Insight Dashboard - Reports page
//

use leptos::*;

use accesstrial_shared::pages::report_snapshot;

use crate::components::{ChartSeries, GlobalFilters, LineChart, PageHeader};
use crate::state::{use_page_filters, DashState, Page};

#[component]
pub fn ReportsPage(state: DashState) -> impl IntoView {
    let filters = use_page_filters(Page::Reports);
    let snapshot = report_snapshot();

    let series: Vec<ChartSeries> = snapshot
        .series_colors
        .iter()
        .enumerate()
        .map(|(i, color)| ChartSeries {
            label: format!("Série {}", i + 1),
            color: color.to_string(),
            values: snapshot.points.iter().map(|p| p.values[i]).collect(),
        })
        .collect();
    let months: Vec<&'static str> = snapshot.points.iter().map(|p| p.month).collect();
    let overview = snapshot.overview.clone();

    view! {
        <PageHeader page=Page::Reports state=state />
        <GlobalFilters filters=filters state=state />

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <div class="report-heading">
                    <h2 class="panel-title">{snapshot.title}</h2>
                    <span class="report-updated">{snapshot.updated}</span>
                </div>
                <h3 class="report-subtitle">"Snapshot Mensuel"</h3>
                <LineChart series=Signal::derive(move || series.clone()) labels=months />
            </section>

            <section class="panel strategic-overview">
                <h2 class="strategic-title">"STRATEGIC OVERVIEW"</h2>
                <p class="strategic-subtitle">
                    {format!("{} · {}", overview.pathology, overview.quarter)}
                </p>
                <div class="strategic-figures">
                    <div class="strategic-figure">
                        <span class="figure-value">{overview.monthly_patients}</span>
                        <span class="figure-label">"Patients éligibles"</span>
                    </div>
                    <div class="strategic-figure">
                        <span class="figure-value">{overview.market_share}</span>
                        <span class="figure-label">"Part de marché"</span>
                    </div>
                </div>
                <button
                    class="btn btn-primary"
                    on:click=move |_| state.log("info", "Téléchargement du rapport mensuel demandé")
                >
                    "⇩ Télécharger le rapport"
                </button>
            </section>
        </div>
    }
}
