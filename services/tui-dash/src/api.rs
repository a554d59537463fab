// services/tui-dash/src/api.rs
//
// Blocking client for the insight-api overview and reference endpoints

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use accesstrial_shared::{
    errors::{InsightError, Result},
    reference::{Pathology, Region, ALL_PATHOLOGIES_LABEL, ALL_REGIONS_LABEL},
    types::ALL_KEY,
    DerivedMetrics, FilterState,
};

use crate::state::DashboardState;

#[derive(Debug, Deserialize)]
pub struct OverviewResponse {
    pub metrics: DerivedMetrics,
    pub alert: String,
}

#[derive(Debug, Deserialize)]
pub struct ReferenceResponse {
    pub pathologies: Vec<Pathology>,
    pub regions: Vec<Region>,
}

pub struct ApiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    connected: bool,
    last_error: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            connected: false,
            last_error: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the selector options with the server's catalogue.
    pub fn fetch_reference(&mut self, state: &mut DashboardState) {
        let url = format!("{}/reference", self.base_url);
        match self.get_json::<ReferenceResponse>(&url) {
            Ok(reference) => {
                state.indication_options = with_all(
                    ALL_PATHOLOGIES_LABEL,
                    reference.pathologies.into_iter().map(|p| (p.key, p.label)),
                );
                state.region_options = with_all(
                    ALL_REGIONS_LABEL,
                    reference.regions.into_iter().map(|r| (r.key, r.label)),
                );
                state.add_log(
                    "INFO",
                    &format!("Loaded catalogue from {}", self.base_url),
                );
            }
            Err(e) => {
                state.add_log("WARN", &format!("Using built-in catalogue: {}", e));
            }
        }
    }

    pub fn fetch_overview(&mut self, state: &mut DashboardState) {
        if !state.needs_refresh && self.connected {
            return;
        }

        let url = overview_url(&self.base_url, &state.filters);
        match self.get_json::<OverviewResponse>(&url) {
            Ok(overview) => {
                if !self.connected {
                    state.add_log("INFO", &format!("Connected to insight-api at {}", self.base_url));
                }
                self.connected = true;
                self.last_error = None;
                state.apply_metrics(overview.metrics, overview.alert);
            }
            Err(e) => {
                if self.connected {
                    state.add_log("WARN", &format!("Lost connection to insight-api: {}", e));
                } else if self.last_error.is_none() {
                    state.add_log("INFO", &format!("Connecting to {}...", self.base_url));
                }
                warn!("Overview request failed: {}", e);
                self.connected = false;
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| InsightError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(InsightError::NetworkError(format!("HTTP {}", response.status())));
        }
        response
            .json::<T>()
            .map_err(|e| InsightError::NetworkError(format!("Parse error: {}", e)))
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// `/overview` URL for the given filters; `all` dimensions are omitted.
pub fn overview_url(base_url: &str, filters: &FilterState) -> String {
    let mut params = Vec::new();
    if let Some(key) = filters.indication.key() {
        params.push(format!("indication={}", key));
    }
    if let Some(key) = filters.region.key() {
        params.push(format!("region={}", key));
    }
    params.push(format!("period={}", filters.period));
    if let Some(from) = filters.custom_range.from {
        params.push(format!("from={}", from.format("%Y-%m-%d")));
    }
    if let Some(to) = filters.custom_range.to {
        params.push(format!("to={}", to.format("%Y-%m-%d")));
    }
    format!("{}/overview?{}", base_url, params.join("&"))
}

fn with_all(
    all_label: &str,
    entries: impl Iterator<Item = (String, String)>,
) -> Vec<(String, String)> {
    std::iter::once((ALL_KEY.to_string(), all_label.to_string()))
        .chain(entries)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesstrial_shared::types::{DateRange, Selection};
    use chrono::NaiveDate;

    #[test]
    fn test_overview_url_defaults() {
        let url = overview_url("http://localhost:8080", &FilterState::default());
        assert_eq!(url, "http://localhost:8080/overview?period=last-90-days");
    }

    #[test]
    fn test_overview_url_with_filters() {
        let mut filters = FilterState::for_indication("lymphome");
        filters.set_region(Selection::from("bretagne"));
        filters.set_custom_range(DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 2, 1),
        ));
        let url = overview_url("http://api", &filters);
        assert_eq!(
            url,
            "http://api/overview?indication=lymphome&region=bretagne&period=custom&from=2024-01-01&to=2024-02-01"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert!(!client.is_connected());
        assert!(client.last_error().is_none());
    }

    #[test]
    fn test_overview_response_parses_api_body() {
        let body = serde_json::json!({
            "metrics": {
                "kpi": { "interest": 73, "potential": 336, "competition": 2, "feasibility": 77 },
                "evolution": [{ "month": "Jan", "interest": 53 }],
                "ranked_indications": [{
                    "rank": 1, "key": "cancer-sein", "indication": "Cancer du sein",
                    "region": "Auvergne-Rhône-Alpes", "interest": 92, "potential": 1250,
                    "priority": "Très haute"
                }]
            },
            "alert": "x",
            "kpi_cards": []
        });
        let parsed: OverviewResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.metrics.kpi.interest, 73);
        assert_eq!(parsed.metrics.ranked_indications[0].rank, 1);
    }
}
