// services/tui-dash/src/demo.rs
//
// Local metrics source for demo mode, and the automatic filter tour

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use accesstrial_shared::{
    derive_metrics,
    presentation::priority_alert,
    reference::ReferenceData,
    Selection,
};

use crate::state::DashboardState;

/// Derives metrics in-process from the built-in reference tables.
pub struct LocalSource {
    reference: &'static ReferenceData,
}

impl LocalSource {
    pub fn new() -> Self {
        Self {
            reference: ReferenceData::global(),
        }
    }

    pub fn refresh(&self, state: &mut DashboardState) {
        if !state.needs_refresh {
            return;
        }
        let metrics = derive_metrics(self.reference, &state.filters);
        let alert = priority_alert(self.reference, &state.filters);
        debug!("Local derivation for {}", state.filters.fingerprint());
        state.apply_metrics(metrics, alert);
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks a new indication/region pair every `interval` unless paused.
pub struct FilterTour {
    rng: StdRng,
    interval: Duration,
    last_step: Instant,
    steps: u64,
}

impl FilterTour {
    pub fn new(interval: Duration, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            interval,
            last_step: Instant::now(),
            steps: 0,
        }
    }

    pub fn tick(&mut self, state: &mut DashboardState) {
        if state.is_paused || self.last_step.elapsed() < self.interval {
            return;
        }
        self.step(state);
        self.last_step = Instant::now();
    }

    pub fn step(&mut self, state: &mut DashboardState) {
        self.steps += 1;

        // Every third stop shows the unfiltered overview
        let (indication, region) = if self.steps % 3 == 0 {
            (Selection::All, Selection::All)
        } else {
            (
                self.pick(&state.indication_options),
                self.pick(&state.region_options),
            )
        };
        state.set_filters(indication, region);
    }

    fn pick(&mut self, options: &[(String, String)]) -> Selection {
        if options.is_empty() {
            return Selection::All;
        }
        let idx = self.rng.gen_range(0..options.len());
        Selection::from(options[idx].0.as_str())
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
