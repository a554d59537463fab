// services/insight-dash/src/pages/recruitment.rs
//
// Insight Dashboard - Recruitment timing page
// Patient journey per pathology and centres that missed trials
//

use leptos::*;

use accesstrial_shared::pages::{recruitment::JourneyStage, recruitment_timing};

use crate::components::{GlobalFilters, PageHeader};
use crate::state::{use_page_filters, DashState, Page};

#[component]
pub fn RecruitmentPage(state: DashState) -> impl IntoView {
    let filters = use_page_filters(Page::Recruitment);
    let timing = recruitment_timing();

    let total_missed: u32 = timing.missed_trials.iter().map(|m| m.count).sum();
    let average_days = if timing.journeys.is_empty() {
        0
    } else {
        timing.journeys.iter().map(|j| j.total_days()).sum::<u32>() / timing.journeys.len() as u32
    };

    let journeys = timing
        .journeys
        .iter()
        .map(|journey| view! {
            <div class="journey-row">
                <span class="journey-label">{journey.label}</span>
                <div class="journey-bar">
                    {journey.segments
                        .iter()
                        .map(|segment| view! {
                            <div
                                class="journey-segment"
                                style=format!("width: {}%; background: {}", segment.width, segment.stage.color())
                                title=format!("{} : {} jours", segment.stage.label(), segment.days)
                            >
                                {format!("{}j", segment.days)}
                            </div>
                        })
                        .collect_view()}
                </div>
                <span class="journey-total">{format!("{} jours", journey.total_days())}</span>
            </div>
        })
        .collect_view();

    let missed = timing
        .missed_trials
        .iter()
        .map(|m| view! {
            <li class="missed-item">
                <span class="missed-name">{m.name}</span>
                <span class="missed-count">{format!("{} essais manqués", m.count)}</span>
                <span class="missed-month">{m.month}</span>
            </li>
        })
        .collect_view();

    view! {
        <PageHeader page=Page::Recruitment state=state />
        <GlobalFilters filters=filters state=state />

        <div class="stat-row">
            <div class="stat-card">
                <h3 class="stat-label">"Parcours analysés"</h3>
                <span class="stat-value">{timing.journeys.len()}</span>
            </div>
            <div class="stat-card">
                <h3 class="stat-label">"Délai moyen"</h3>
                <span class="stat-value">{format!("{} jours", average_days)}</span>
            </div>
            <div class="stat-card">
                <h3 class="stat-label">"Essais manqués"</h3>
                <span class="stat-value">{total_missed}</span>
            </div>
        </div>

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <h2 class="panel-title">"Parcours patient par pathologie"</h2>
                <div class="journey-legend">
                    {JourneyStage::ALL
                        .iter()
                        .map(|stage| view! {
                            <span class="legend-item">
                                <span class="legend-dot" style=format!("background: {}", stage.color())></span>
                                {stage.label()}
                            </span>
                        })
                        .collect_view()}
                </div>
                {journeys}
            </section>

            <section class="panel">
                <h3 class="panel-title">"Centres ayant manqué des essais"</h3>
                <ul class="missed-list">{missed}</ul>
            </section>
        </div>
    }
}
