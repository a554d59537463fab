//! Static datasets behind the secondary dashboard pages.

pub mod centres;
pub mod indications;
pub mod recruitment;
pub mod reports;
pub mod signals;
pub mod territories;

pub use centres::{centre_activity, CentreActivity};
pub use indications::{indication_insights, IndicationInsights, PathologyVisibility};
pub use recruitment::{recruitment_timing, RecruitmentTiming};
pub use reports::{report_snapshot, ReportSnapshot};
pub use signals::{competitive_signals, CompetitiveSignals};
pub use territories::{territory_overview, TerritoryOverview};
