use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info};

use accesstrial_shared::{
    derive_metrics,
    errors::Result,
    metrics,
    pages::{self, CentreActivity, CompetitiveSignals, IndicationInsights, RecruitmentTiming,
        ReportSnapshot, TerritoryOverview},
    presentation::{kpi_cards, priority_alert, KpiCard, ALERT_TITLE},
    DerivedMetrics, FilterState, Period, ReferenceData,
};

/// Response body of `/overview`.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub filters: FilterState,
    pub active_filters: bool,
    pub date_range: String,
    pub metrics: DerivedMetrics,
    pub kpi_cards: [KpiCard; 4],
    pub alert_title: &'static str,
    pub alert: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceStats {
    pub total_requests: u64,
    pub failed_requests: u64,
    pub reference_reloads: u64,
}

pub struct InsightService {
    reference: RwLock<Arc<ReferenceData>>,
    stats: Mutex<ServiceStats>,
    metrics_enabled: bool,
    started_at: chrono::DateTime<chrono::Utc>,
}

impl InsightService {
    pub fn new(reference: ReferenceData, metrics_enabled: bool) -> Self {
        Self {
            reference: RwLock::new(Arc::new(reference)),
            stats: Mutex::new(ServiceStats::default()),
            metrics_enabled,
            started_at: chrono::Utc::now(),
        }
    }

    pub fn reference(&self) -> Arc<ReferenceData> {
        self.reference.read().clone()
    }

    /// Swap in new reference tables; the next derivation reads them.
    pub fn replace_reference(&self, reference: ReferenceData) {
        *self.reference.write() = Arc::new(reference);
        self.stats.lock().reference_reloads += 1;
        info!("Reference data replaced");
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }

    pub fn started_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.started_at
    }

    pub fn overview(&self, filters: FilterState) -> Overview {
        let reference = self.reference();
        let derived = timed("overview", || derive_metrics(&reference, &filters));

        Overview {
            active_filters: filters.has_active_filters(),
            date_range: filters.date_range_display(),
            kpi_cards: kpi_cards(&derived),
            alert_title: ALERT_TITLE,
            alert: priority_alert(&reference, &filters),
            metrics: derived,
            filters,
        }
    }

    pub fn territories(&self) -> TerritoryOverview {
        timed("territories", pages::territory_overview)
    }

    pub fn indications(&self, period: Period) -> IndicationInsights {
        let reference = self.reference();
        timed("indications", || pages::indication_insights(&reference, period))
    }

    pub fn centres(&self, centre: Option<&str>) -> Result<CentreActivity> {
        timed("centres", || pages::centre_activity(centre))
    }

    pub fn recruitment(&self) -> RecruitmentTiming {
        timed("recruitment", pages::recruitment_timing)
    }

    pub fn signals(&self) -> CompetitiveSignals {
        timed("signals", pages::competitive_signals)
    }

    pub fn reports(&self) -> ReportSnapshot {
        timed("reports", pages::report_snapshot)
    }

    pub fn record_request(&self, route: &str, success: bool) {
        {
            let mut stats = self.stats.lock();
            stats.total_requests += 1;
            if !success {
                stats.failed_requests += 1;
            }
        }
        metrics::record_request(route, success);
    }

    pub fn get_stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }
}

fn timed<T>(page: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed().as_secs_f64();
    metrics::record_derivation(page, elapsed);
    debug!("Derived {} dataset in {:.3}ms", page, elapsed * 1000.0);
    out
}
