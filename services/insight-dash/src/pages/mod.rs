// services/insight-dash/src/pages/mod.rs
//
// Insight Dashboard - Pages
//

mod centres;
mod overview;
mod pathologies;
mod recruitment;
mod reports;
mod signals;
mod territories;

pub use centres::CentresPage;
pub use overview::OverviewPage;
pub use pathologies::PathologiesPage;
pub use recruitment::RecruitmentPage;
pub use reports::ReportsPage;
pub use signals::SignalsPage;
pub use territories::TerritoriesPage;
