// services/insight-dash/src/components/mod.rs
//
// Insight Dashboard - UI Components
//

mod alert;
mod chart;
mod filters;
mod header;
mod kpi;
mod page_header;
mod ranking;
mod sidebar;

pub use alert::AlertBanner;
pub use chart::{area_path, line_path, ChartGeometry, ChartSeries, EvolutionChart, LineChart};
pub use filters::GlobalFilters;
pub use header::Header;
pub use kpi::KpiCards;
pub use page_header::PageHeader;
pub use ranking::RankingTable;
pub use sidebar::Sidebar;
