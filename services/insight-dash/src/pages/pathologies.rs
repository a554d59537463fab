// services/insight-dash/src/pages/pathologies.rs
//
// Insight Dashboard - Pathologies page
//

use leptos::*;

use accesstrial_shared::{
    pages::{indication_insights, PathologyVisibility},
    ReferenceData,
};

use crate::components::{ChartSeries, GlobalFilters, LineChart, PageHeader};
use crate::state::{use_page_filters, DashState, Page};

#[component]
pub fn PathologiesPage(state: DashState) -> impl IntoView {
    let reference = ReferenceData::global();
    let filters = use_page_filters(Page::Pathologies);
    let visibility = create_rw_signal(PathologyVisibility::all(reference));

    // Consultation and saturation samples depend on the period only
    let period = create_memo(move |_| filters.with(|f| f.period));
    let insights = Signal::derive(move || indication_insights(reference, period.get()));

    let series = Signal::derive(move || {
        let visible = visibility.get();
        insights.with(|i| {
            i.evolution
                .iter()
                .filter(|s| visible.is_visible(&s.key))
                .map(|s| ChartSeries {
                    label: s.label.clone(),
                    color: s.color.clone(),
                    values: s.values.iter().map(|v| *v as f64).collect(),
                })
                .collect::<Vec<_>>()
        })
    });
    let months = insights.with_untracked(|i| i.months.clone());

    view! {
        <PageHeader page=Page::Pathologies state=state />
        <GlobalFilters filters=filters state=state />

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <h3 class="panel-title">"Potentiels patients"</h3>
                <div class="bar-list">
                    {move || insights.with(|i| {
                        i.consultations
                            .iter()
                            .map(|row| view! {
                                <div class="bar-row">
                                    <span class="bar-label">{row.indication.clone()}</span>
                                    <div class="bar-track">
                                        <div
                                            class="bar-fill"
                                            style=format!("width: {:.1}%; background: {}", row.fill_percent, row.color)
                                        />
                                    </div>
                                    <span class="bar-value">{row.consultations}</span>
                                </div>
                            })
                            .collect_view()
                    })}
                </div>
            </section>

            <section class="panel">
                <h3 class="panel-title">"Saturation perçue"</h3>
                <table class="saturation-table">
                    <tbody>
                        {move || insights.with(|i| {
                            i.saturation
                                .iter()
                                .map(|row| {
                                    let badge = format!("saturation-badge tone-{}", row.tier.tone().as_str());
                                    view! {
                                        <tr>
                                            <td>{row.indication.clone()}</td>
                                            <td>{format!("{}%", row.percent)}</td>
                                            <td><span class=badge>{row.tier.label()}</span></td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        })}
                    </tbody>
                </table>
            </section>
        </div>

        <section class="panel">
            <h3 class="panel-title">"Nombre d'inscription aux essais cliniques"</h3>
            <div class="series-toggles">
                {reference.pathologies
                    .iter()
                    .map(|p| {
                        let key = p.key.clone();
                        let toggle_key = key.clone();
                        let visible = move || visibility.with(|v| v.is_visible(&key));
                        view! {
                            <label class="series-toggle">
                                <input
                                    type="checkbox"
                                    prop:checked=visible
                                    on:change=move |_| visibility.update(|v| v.toggle(&toggle_key))
                                />
                                <span class="legend-dot" style=format!("background: {}", p.color)></span>
                                {p.label.clone()}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
            <LineChart series=series labels=months />
        </section>
    }
}
