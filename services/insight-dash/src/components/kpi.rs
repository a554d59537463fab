// services/insight-dash/src/components/kpi.rs
//
// Insight Dashboard - KPI Cards Component
//

use leptos::*;

use accesstrial_shared::{
    classify::TrendDirection,
    presentation::{kpi_cards, CardVariant, KpiCard},
    DerivedMetrics,
};

#[component]
pub fn KpiCards(#[prop(into)] metrics: Signal<DerivedMetrics>) -> impl IntoView {
    let cards = move || metrics.with(kpi_cards);

    view! {
        <div class="kpi-grid">
            {move || cards().into_iter().map(|card| view! { <KpiCardView card=card /> }).collect_view()}
        </div>
    }
}

#[component]
fn KpiCardView(card: KpiCard) -> impl IntoView {
    let variant_class = match card.variant {
        CardVariant::Default => "kpi-card",
        CardVariant::Success => "kpi-card kpi-success",
    };
    let trend_class = match card.trend.direction {
        TrendDirection::Up => "kpi-trend trend-up",
        TrendDirection::Down => "kpi-trend trend-down",
        TrendDirection::Neutral => "kpi-trend trend-neutral",
    };

    view! {
        <div class=variant_class title=card.tooltip>
            <div class="kpi-header">
                <span class="kpi-title">{card.title}</span>
                <span class="kpi-info">"ⓘ"</span>
            </div>
            <span class="kpi-value">{card.value}</span>
            <div class="kpi-footer">
                <span class="kpi-subtitle">{card.subtitle}</span>
                <span class=trend_class>
                    {format!("{} {}", card.trend.direction.arrow(), card.trend.value)}
                </span>
            </div>
        </div>
    }
}
