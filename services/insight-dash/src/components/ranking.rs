// services/insight-dash/src/components/ranking.rs
//
// Insight Dashboard - Ranked indications table
//

use leptos::*;

use accesstrial_shared::{presentation::format_thousands, types::RankedIndication};

#[component]
pub fn RankingTable(#[prop(into)] rows: Signal<Vec<RankedIndication>>) -> impl IntoView {
    view! {
        <table class="ranking-table">
            <thead>
                <tr>
                    <th>"#"</th>
                    <th>"Indication"</th>
                    <th>"Région"</th>
                    <th>"Intérêt"</th>
                    <th>"Potentiel"</th>
                    <th>"Priorité"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || rows.get()
                    key=row_key
                    children=move |row| {
                        let badge = format!("priority-badge tone-{}", row.priority.tone().as_str());
                        view! {
                            <tr class="ranking-row">
                                <td class="rank">{row.rank}</td>
                                <td class="indication">{row.indication.clone()}</td>
                                <td class="region">{row.region.clone()}</td>
                                <td class="interest">
                                    <div class="interest-bar">
                                        <div
                                            class="interest-fill"
                                            style=format!("width: {}%", row.interest.clamp(0, 100))
                                        />
                                    </div>
                                    <span>{format!("{}%", row.interest)}</span>
                                </td>
                                <td class="potential">{format_thousands(row.potential)}</td>
                                <td><span class=badge>{row.priority.label()}</span></td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

/// `<For>` only rebuilds rows whose key is new, so the key covers every
/// displayed field. A region change rescales rows without reordering them.
fn row_key(row: &RankedIndication) -> RankedIndication {
    row.clone()
}
