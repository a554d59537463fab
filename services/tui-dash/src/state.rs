// services/tui-dash/src/state.rs
//
// Dashboard state: current filters, last derived metrics, activity log

use chrono::{DateTime, Local};

use accesstrial_shared::{
    presentation::{kpi_cards, KpiCard},
    reference::ReferenceData,
    DerivedMetrics, FilterState, Selection,
};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
pub struct DashboardState {
    // Filters
    pub filters: FilterState,
    pub indication_options: Vec<(String, String)>,
    pub region_options: Vec<(String, String)>,

    // Last result
    pub metrics: Option<DerivedMetrics>,
    pub cards: Option<[KpiCard; 4]>,
    pub alert: String,
    pub last_updated: Option<DateTime<Local>>,

    // Set whenever the filters change; cleared once new metrics arrive
    pub needs_refresh: bool,

    // Tour
    pub is_paused: bool,

    pub activity_log: Vec<LogEntry>,
    pub scroll_offset: usize,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: String,  // INFO, WARN, ERROR
    pub message: String,
}

impl DashboardState {
    pub fn new(reference: &ReferenceData) -> Self {
        Self {
            filters: FilterState::default(),
            indication_options: reference.indication_options(),
            region_options: reference.region_options(),
            metrics: None,
            cards: None,
            alert: String::new(),
            last_updated: None,
            needs_refresh: true,
            is_paused: false,
            activity_log: Vec::new(),
            scroll_offset: 0,
        }
    }

    pub fn cycle_indication(&mut self, forward: bool) {
        let next = ReferenceData::cycle(&self.indication_options, &self.filters.indication, forward);
        self.filters.set_indication(next);
        self.filters_changed();
    }

    pub fn cycle_region(&mut self, forward: bool) {
        let next = ReferenceData::cycle(&self.region_options, &self.filters.region, forward);
        self.filters.set_region(next);
        self.filters_changed();
    }

    /// Step through the preset periods; the custom period has no date picker here.
    pub fn next_period(&mut self) {
        let mut next = self.filters.period.next();
        if next == accesstrial_shared::Period::Custom {
            next = next.next();
        }
        self.filters.set_period(next);
        self.filters_changed();
    }

    pub fn set_filters(&mut self, indication: Selection, region: Selection) {
        self.filters.set_indication(indication);
        self.filters.set_region(region);
        self.filters_changed();
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.scroll_offset = 0;
        self.needs_refresh = true;
        self.add_log("INFO", "Filters reset");
    }

    fn filters_changed(&mut self) {
        self.needs_refresh = true;
        self.scroll_offset = 0;
        let message = format!("Filters: {}", self.filter_summary());
        self.add_log("INFO", &message);
    }

    pub fn filter_summary(&self) -> String {
        format!(
            "{} / {} / {}",
            option_label(&self.indication_options, &self.filters.indication),
            option_label(&self.region_options, &self.filters.region),
            self.filters.period.label()
        )
    }

    pub fn apply_metrics(&mut self, metrics: DerivedMetrics, alert: String) {
        self.cards = Some(kpi_cards(&metrics));
        self.metrics = Some(metrics);
        self.alert = alert;
        self.last_updated = Some(Local::now());
        self.needs_refresh = false;
    }

    pub fn toggle_pause(&mut self) {
        self.is_paused = !self.is_paused;
        if self.is_paused {
            self.add_log("WARN", "Filter tour paused");
        } else {
            self.add_log("INFO", "Filter tour resumed");
        }
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        }
    }

    pub fn scroll_down(&mut self) {
        let rows = self.metrics.as_ref().map(|m| m.ranked_indications.len()).unwrap_or(0);
        if self.scroll_offset + 1 < rows {
            self.scroll_offset += 1;
        }
    }

    pub fn add_log(&mut self, level: &str, message: &str) {
        self.activity_log.push(LogEntry {
            timestamp: Local::now(),
            level: level.to_string(),
            message: message.to_string(),
        });

        if self.activity_log.len() > MAX_LOG_ENTRIES {
            self.activity_log.remove(0);
        }
    }
}

fn option_label(options: &[(String, String)], selection: &Selection) -> String {
    options
        .iter()
        .find(|(key, _)| key == selection.as_str())
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| selection.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesstrial_shared::{derive_metrics, Period};

    fn state() -> DashboardState {
        DashboardState::new(ReferenceData::global())
    }

    #[test]
    fn test_cycle_indication_wraps() {
        let mut state = state();
        state.cycle_indication(true);
        assert_eq!(state.filters.indication, Selection::from("cancer-sein"));
        assert!(state.needs_refresh);

        state.cycle_indication(false);
        state.cycle_indication(false);
        assert_eq!(state.filters.indication, Selection::from("llc-richter"));
    }

    #[test]
    fn test_period_skips_custom() {
        let mut state = state();
        state.filters.set_period(Period::Last12Months);
        state.next_period();
        assert_eq!(state.filters.period, Period::Last30Days);
    }

    #[test]
    fn test_apply_metrics_clears_refresh() {
        let mut state = state();
        let metrics = derive_metrics(ReferenceData::global(), &state.filters);
        state.apply_metrics(metrics, "alert".into());
        assert!(!state.needs_refresh);
        assert_eq!(state.cards.as_ref().unwrap()[0].value, "73%");
    }

    #[test]
    fn test_reset_and_summary() {
        let mut state = state();
        state.cycle_region(true);
        assert_eq!(
            state.filter_summary(),
            "Toutes les pathologies / Auvergne-Rhône-Alpes / 90 derniers jours"
        );
        state.reset_filters();
        assert!(!state.filters.has_active_filters());
    }

    #[test]
    fn test_log_is_capped() {
        let mut state = state();
        for i in 0..150 {
            state.add_log("INFO", &format!("entry {}", i));
        }
        assert_eq!(state.activity_log.len(), MAX_LOG_ENTRIES);
        assert_eq!(state.activity_log[0].message, "entry 50");
    }

    #[test]
    fn test_scroll_bounds() {
        let mut state = state();
        state.scroll_down();
        assert_eq!(state.scroll_offset, 0);

        let metrics = derive_metrics(ReferenceData::global(), &state.filters);
        state.apply_metrics(metrics, String::new());
        for _ in 0..20 {
            state.scroll_down();
        }
        assert_eq!(state.scroll_offset, 7);
        state.scroll_up();
        assert_eq!(state.scroll_offset, 6);
    }
}
