// services/insight-dash/src/pages/territories.rs
//
// Insight Dashboard - Territories page
//

use leptos::*;

use accesstrial_shared::{classify::Tone, pages::territory_overview};

use crate::components::{GlobalFilters, PageHeader};
use crate::state::{use_page_filters, DashState, Page};

#[component]
pub fn TerritoriesPage(state: DashState) -> impl IntoView {
    let filters = use_page_filters(Page::Territories);
    let overview = territory_overview();

    let profile_rows = overview
        .rows
        .iter()
        .map(|row| {
            let trend_class = if row.trend_percent >= 0 { "trend-up" } else { "trend-down" };
            view! {
                <div class="bar-row">
                    <span class="bar-label">{row.label}</span>
                    <div class="bar-track">
                        <div
                            class=format!("bar-fill tone-{}", row.bar_tone.as_str())
                            style=format!("width: {:.1}%", row.fill_percent)
                        />
                    </div>
                    <span class="bar-value">{row.eligible_profiles}</span>
                    <span class=trend_class>{format!("{:+}%", row.trend_percent)}</span>
                </div>
            }
        })
        .collect_view();

    let opportunity_rows = overview
        .rows
        .iter()
        .map(|row| view! {
            <tr>
                <td>{row.label}</td>
                <td>{row.saturation}</td>
                <td>
                    <span class=format!("saturation-badge tone-{}", row.base_tone.as_str())>
                        {opportunity_label(row.base_tone)}
                    </span>
                </td>
            </tr>
        })
        .collect_view();

    view! {
        <PageHeader page=Page::Territories state=state />
        <GlobalFilters filters=filters state=state />

        <div class="dashboard-grid two-columns">
            <section class="panel">
                <h3 class="panel-title">"Profils éligibles par région"</h3>
                <div class="bar-list">{profile_rows}</div>
                <p class="panel-note">
                    {format!("Maximum : {} profils éligibles", overview.max_profiles)}
                </p>
            </section>

            <section class="panel">
                <h3 class="panel-title">"Carte des opportunités"</h3>
                <table class="saturation-table">
                    <thead>
                        <tr>
                            <th>"Région"</th>
                            <th>"Saturation"</th>
                            <th>"Opportunité"</th>
                        </tr>
                    </thead>
                    <tbody>{opportunity_rows}</tbody>
                </table>
            </section>
        </div>
    }
}

/// Legend of the opportunity map, keyed by the region's colour.
fn opportunity_label(tone: Tone) -> &'static str {
    match tone {
        Tone::Green => "Élevée",
        Tone::Yellow => "Modérée",
        Tone::Orange => "Faible",
        Tone::Red => "Très faible",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opportunity_labels_are_distinct() {
        let labels = [Tone::Green, Tone::Yellow, Tone::Orange, Tone::Red].map(opportunity_label);
        assert_eq!(labels, ["Élevée", "Modérée", "Faible", "Très faible"]);
    }
}
