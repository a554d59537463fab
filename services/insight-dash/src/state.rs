// services/insight-dash/src/state.rs
//
// Insight Dashboard - Navigation and shared reactive state
//

use leptos::*;
use serde::{Deserialize, Serialize};

use accesstrial_shared::FilterState;

const MAX_LOG_ENTRIES: usize = 100;

/// Pages reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Overview,
    Pathologies,
    Territories,
    Centres,
    Recruitment,
    Signals,
    Reports,
}

impl Page {
    pub const NAVIGATION: [Page; 7] = [
        Page::Overview,
        Page::Pathologies,
        Page::Territories,
        Page::Centres,
        Page::Recruitment,
        Page::Signals,
        Page::Reports,
    ];

    pub fn nav_label(&self) -> &'static str {
        match self {
            Page::Overview => "Vue d'ensemble",
            Page::Pathologies => "Pathologies",
            Page::Territories => "Territoires",
            Page::Centres => "Centres & activation",
            Page::Recruitment => "Recrutement",
            Page::Signals => "Signaux concurrentiels",
            Page::Reports => "Rapports",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Overview => "⌂",
            Page::Pathologies => "▤",
            Page::Territories => "◉",
            Page::Centres => "▦",
            Page::Recruitment => "◷",
            Page::Signals => "↗",
            Page::Reports => "▧",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Recruitment => "Recrutements",
            other => other.nav_label(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Page::Overview => "Synthèse détaillée de vos données sur le Dashboard d'AccessTrial",
            Page::Pathologies => "Analyse détaillée des indications médicales sur le territoire national",
            Page::Territories => "Analyse détaillée des essais cliniques par géographie sur le territoire national",
            Page::Centres => "Analyse détaillée des centres et de leurs impacts sur le territoire national",
            Page::Recruitment => "Analyse détaillées des recrutements sur le territoire national",
            Page::Signals => "Analyse détaillée des essais cliniques de vos concurrents sur le territoire national",
            Page::Reports => "Téléchargez vos rapports mensuels. Exportez vos données-clés.",
        }
    }

    /// Filters a page starts with each time it is opened.
    pub fn default_filters(&self) -> FilterState {
        match self {
            Page::Territories | Page::Centres | Page::Recruitment => {
                FilterState::for_indication("cancer-poumon")
            }
            _ => FilterState::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String, // "info", "warn"
    pub message: String,
}

/// App-wide state. All fields are signals, so the struct is Copy.
#[derive(Clone, Copy)]
pub struct DashState {
    pub page: RwSignal<Page>,
    pub sidebar_collapsed: RwSignal<bool>,
    pub logs: RwSignal<Vec<LogEntry>>,
}

impl DashState {
    pub fn new() -> Self {
        Self {
            page: create_rw_signal(Page::default()),
            sidebar_collapsed: create_rw_signal(false),
            logs: create_rw_signal(vec![]),
        }
    }

    pub fn navigate(&self, page: Page) {
        if self.page.get_untracked() != page {
            log::debug!("Navigate to {:?}", page);
            self.page.set(page);
        }
    }

    /// Record a user action; also forwarded to the browser console.
    pub fn log(&self, level: &str, message: &str) {
        match level {
            "warn" => log::warn!("{}", message),
            _ => log::info!("{}", message),
        }

        let entry = LogEntry {
            timestamp: js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default(),
            level: level.to_string(),
            message: message.to_string(),
        };

        self.logs.update(|logs| {
            logs.push(entry);
            if logs.len() > MAX_LOG_ENTRIES {
                logs.remove(0);
            }
        });
    }
}

impl Default for DashState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh filter signal for a page; dropped with the page's reactive scope.
pub fn use_page_filters(page: Page) -> RwSignal<FilterState> {
    create_rw_signal(page.default_filters())
}
