// services/insight-dash/src/pages/signals.rs
//
// Insight Dashboard - Competitive signals page
//

use leptos::*;

use accesstrial_shared::pages::{competitive_signals, signals::TrendingEntry};

use crate::components::{ChartSeries, GlobalFilters, LineChart, PageHeader};
use crate::state::{use_page_filters, DashState, Page};

#[component]
pub fn SignalsPage(state: DashState) -> impl IntoView {
    let filters = use_page_filters(Page::Signals);
    let signals = competitive_signals();

    let series: Vec<ChartSeries> = signals
        .activity
        .iter()
        .map(|s| ChartSeries {
            label: s.label.to_string(),
            color: s.color.to_string(),
            values: s.values.clone(),
        })
        .collect();

    let cards = signals
        .cards
        .iter()
        .map(|card| {
            let saturation_class = format!("saturation-fill tone-{}", card.saturation_tone.as_str());
            view! {
                <div class="signal-card">
                    <div class="signal-card-header">
                        <span class="signal-icon">{card.icon}</span>
                        <span class="signal-label">{card.label}</span>
                        {card.rising.then(|| view! { <span class="signal-rising">"↗"</span> })}
                    </div>
                    <div class="signal-stats">
                        <span>{format!("{} essais concurrents", card.competing_trials)}</span>
                        <span>{format!("{} RCP", card.rcps)}</span>
                        <span>{format!("Confiance {}%", card.confidence)}</span>
                    </div>
                    <div class="signal-progress">
                        {card.progress
                            .iter()
                            .map(|tone| view! { <span class=format!("progress-segment tone-{}", tone.as_str())></span> })
                            .collect_view()}
                    </div>
                    <div class="saturation-track">
                        <div class=saturation_class style=format!("width: {}%", card.saturation_percent) />
                    </div>
                </div>
            }
        })
        .collect_view();

    let distribution = signals
        .saturation_distribution
        .iter()
        .map(|row| view! {
            <tr>
                <td>{row.high}</td>
                <td>{row.moderate}</td>
                <td>{row.low}</td>
                <td>{row.trend}</td>
            </tr>
        })
        .collect_view();

    view! {
        <PageHeader page=Page::Signals state=state />
        <GlobalFilters filters=filters state=state />

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <h3 class="panel-title">"Activité des essais concurrents"</h3>
                <LineChart series=Signal::derive(move || series.clone()) labels=signals.months.clone() />
            </section>

            <section class="panel">
                <h3 class="panel-title">"Saturation perçue"</h3>
                <table class="saturation-table">
                    <thead>
                        <tr>
                            <th>"Élevée"</th>
                            <th>"Modérée"</th>
                            <th>"Faible"</th>
                            <th>"Tendance"</th>
                        </tr>
                    </thead>
                    <tbody>{distribution}</tbody>
                </table>
            </section>
        </div>

        <section class="panel">
            <h2 class="panel-title">"Indications suivies"</h2>
            <div class="signal-grid">{cards}</div>
        </section>

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <h3 class="panel-title">"Pathologies en hausse"</h3>
                <TrendingList entries=signals.rising_pathologies.clone() />
            </section>
            <section class="panel">
                <h3 class="panel-title">"Classes thérapeutiques concurrentes"</h3>
                <TrendingList entries=signals.competing_classes.clone() />
            </section>
        </div>
    }
}

#[component]
fn TrendingList(entries: Vec<TrendingEntry>) -> impl IntoView {
    view! {
        <ul class="trending-list">
            {entries
                .into_iter()
                .map(|entry| view! {
                    <li class="trending-item">
                        <span class="trending-label">{entry.label}</span>
                        <span class="trending-value">{entry.trend}</span>
                    </li>
                })
                .collect_view()}
        </ul>
    }
}
