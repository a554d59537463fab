// services/insight-dash/src/components/filters.rs
//
// Insight Dashboard - Global filter bar
// Indication, region and period selects; date inputs while the period is custom
//

use chrono::NaiveDate;
use leptos::*;

use accesstrial_shared::{
    reference::ReferenceData,
    types::DateRange,
    FilterState, Period, Selection,
};

use crate::state::DashState;

#[component]
pub fn GlobalFilters(filters: RwSignal<FilterState>, state: DashState) -> impl IntoView {
    let reference = ReferenceData::global();

    let on_indication = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        filters.update(|f| f.set_indication(Selection::from(value)));
        state.log("info", &format!("Indication: {}", filters.with_untracked(|f| f.indication.to_string())));
    };

    let on_region = move |ev: ev::Event| {
        let value = event_target_value(&ev);
        filters.update(|f| f.set_region(Selection::from(value)));
        state.log("info", &format!("Région: {}", filters.with_untracked(|f| f.region.to_string())));
    };

    let on_period = move |ev: ev::Event| {
        match event_target_value(&ev).parse::<Period>() {
            Ok(period) => filters.update(|f| f.set_period(period)),
            Err(e) => state.log("warn", &e.to_string()),
        }
    };

    let on_from = move |ev: ev::Event| {
        let from = parse_date_input(&event_target_value(&ev));
        filters.update(|f| {
            let to = f.custom_range.to;
            f.set_custom_range(DateRange::new(from, to));
        });
    };

    let on_to = move |ev: ev::Event| {
        let to = parse_date_input(&event_target_value(&ev));
        filters.update(|f| {
            let from = f.custom_range.from;
            f.set_custom_range(DateRange::new(from, to));
        });
    };

    let is_custom = move || filters.with(|f| f.period == Period::Custom);
    let has_active = move || filters.with(|f| f.has_active_filters());

    view! {
        <div class="global-filters">
            <span class="filters-label">"⏷ Filtres"</span>

            <select
                class="filter-select indication-select"
                prop:value=move || filters.with(|f| f.indication.to_string())
                on:change=on_indication
            >
                {option_views(reference.indication_options())}
            </select>

            <select
                class="filter-select region-select"
                prop:value=move || filters.with(|f| f.region.to_string())
                on:change=on_region
            >
                {option_views(reference.region_options())}
            </select>

            <select
                class="filter-select period-select"
                prop:value=move || filters.with(|f| f.period.to_string())
                on:change=on_period
            >
                {ReferenceData::period_options()
                    .into_iter()
                    .map(|p| view! { <option value=p.key>{p.label}</option> })
                    .collect_view()}
            </select>

            <Show when=is_custom fallback=|| ()>
                <div class="date-range">
                    <span class="date-range-label">
                        "📅 " {move || filters.with(|f| f.date_range_display())}
                    </span>
                    <input
                        type="date"
                        prop:value=move || filters.with(|f| date_input_value(f.custom_range.from))
                        on:change=on_from
                    />
                    <input
                        type="date"
                        prop:value=move || filters.with(|f| date_input_value(f.custom_range.to))
                        on:change=on_to
                    />
                </div>
            </Show>

            <Show when=has_active fallback=|| ()>
                <button
                    class="btn btn-ghost reset-filters"
                    on:click=move |_| {
                        filters.update(|f| f.reset());
                        state.log("info", "Filtres réinitialisés");
                    }
                >
                    "✕ Réinitialiser"
                </button>
            </Show>
        </div>
    }
}

fn option_views(options: Vec<(String, String)>) -> impl IntoView {
    options
        .into_iter()
        .map(|(key, label)| view! { <option value=key>{label}</option> })
        .collect_view()
}

/// `<input type="date">` yields `yyyy-mm-dd`, or an empty string once cleared.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
