// services/insight-dash/src/main.rs
//
// Insight Dashboard - Clinical trial recruitment insights in the browser
//
// Build and serve with: trunk serve
//

fn main() {
    insight_dash::mount();
}
