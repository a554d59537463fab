use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::PriorityTier;
use crate::errors::InsightError;

/// Sentinel key meaning "no restriction" on a filter dimension.
pub const ALL_KEY: &str = "all";

/// A filter dimension value: either every entry or one reference key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Key(String),
}

impl Selection {
    pub fn key(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Key(key) => Some(key.as_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        self.key().unwrap_or(ALL_KEY)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value.is_empty() || value == ALL_KEY {
            Selection::All
        } else {
            Selection::Key(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(value: Selection) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window offered by the period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "last-30-days")]
    Last30Days,
    #[default]
    #[serde(rename = "last-90-days")]
    Last90Days,
    #[serde(rename = "last-6-months")]
    Last6Months,
    #[serde(rename = "last-12-months")]
    Last12Months,
    #[serde(rename = "custom")]
    Custom,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::Last30Days,
        Period::Last90Days,
        Period::Last6Months,
        Period::Last12Months,
        Period::Custom,
    ];

    pub fn as_key(&self) -> &'static str {
        match self {
            Period::Last30Days => "last-30-days",
            Period::Last90Days => "last-90-days",
            Period::Last6Months => "last-6-months",
            Period::Last12Months => "last-12-months",
            Period::Custom => "custom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Last30Days => "30 derniers jours",
            Period::Last90Days => "90 derniers jours",
            Period::Last6Months => "6 derniers mois",
            Period::Last12Months => "12 derniers mois",
            Period::Custom => "Date personnalisée",
        }
    }

    /// Next period in selector order, wrapping around.
    pub fn next(&self) -> Period {
        let idx = Period::ALL.iter().position(|p| p == self).unwrap_or(0);
        Period::ALL[(idx + 1) % Period::ALL.len()]
    }
}

impl FromStr for Period {
    type Err = InsightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .iter()
            .copied()
            .find(|p| p.as_key() == s)
            .ok_or_else(|| InsightError::UnknownPeriod(s.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Filter selection shared by every page.
///
/// `custom_range` is only ever populated while `period` is [`Period::Custom`];
/// every mutator below keeps that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub indication: Selection,
    pub region: Selection,
    pub period: Period,
    #[serde(default)]
    pub custom_range: DateRange,
}

impl FilterState {
    /// Default filters with one indication preselected.
    pub fn for_indication(key: &str) -> Self {
        Self {
            indication: Selection::from(key),
            ..Self::default()
        }
    }

    pub fn set_indication(&mut self, indication: Selection) {
        self.indication = indication;
    }

    pub fn set_region(&mut self, region: Selection) {
        self.region = region;
    }

    pub fn set_period(&mut self, period: Period) {
        self.period = period;
        if period != Period::Custom {
            self.custom_range = DateRange::default();
        }
    }

    /// Picking dates implies a custom period.
    pub fn set_custom_range(&mut self, range: DateRange) {
        self.period = Period::Custom;
        self.custom_range = range;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.indication.is_all()
            || !self.region.is_all()
            || (self.period == Period::Custom && !self.custom_range.is_empty())
    }

    /// Label of the custom date button.
    pub fn date_range_display(&self) -> String {
        if self.period != Period::Custom {
            return Period::Custom.label().to_string();
        }
        match (self.custom_range.from, self.custom_range.to) {
            (Some(from), Some(to)) => format!(
                "{} - {}",
                from.format("%d/%m/%Y"),
                to.format("%d/%m/%Y")
            ),
            (Some(from), None) => format!("À partir du {}", from.format("%d/%m/%Y")),
            _ => Period::Custom.label().to_string(),
        }
    }

    /// Concatenated key used to seed the cosmetic variation.
    pub fn fingerprint(&self) -> String {
        format!("{}-{}-{}", self.indication, self.region, self.period)
    }
}

/// Static scores for one pathology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathologyMetric {
    pub interest: i64,
    pub potential: i64,
    pub competition: i64,
    pub feasibility: i64,
}

/// Multiplicative factors applied when a region is selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionModifier {
    pub interest: f64,
    pub potential: f64,
}

impl RegionModifier {
    pub const IDENTITY: RegionModifier = RegionModifier {
        interest: 1.0,
        potential: 1.0,
    };
}

impl Default for RegionModifier {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub interest: i64,
    pub potential: i64,
    pub competition: i64,
    pub feasibility: i64,
}

impl From<PathologyMetric> for Kpi {
    fn from(metric: PathologyMetric) -> Self {
        Self {
            interest: metric.interest,
            potential: metric.potential,
            competition: metric.competition,
            feasibility: metric.feasibility,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub month: String,
    pub interest: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankedIndication {
    pub rank: usize,
    pub key: String,
    pub indication: String,
    pub region: String,
    pub interest: i64,
    pub potential: i64,
    pub priority: PriorityTier,
}

/// Everything the overview page renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub kpi: Kpi,
    pub evolution: Vec<EvolutionPoint>,
    pub ranked_indications: Vec<RankedIndication>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_filters() {
        let filters = FilterState::default();
        assert!(filters.indication.is_all());
        assert!(filters.region.is_all());
        assert_eq!(filters.period, Period::Last90Days);
        assert!(filters.custom_range.is_empty());
        assert!(!filters.has_active_filters());
    }

    #[test]
    fn test_leaving_custom_period_clears_range() {
        let mut filters = FilterState::default();
        filters.set_custom_range(DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 3, 31))));
        assert_eq!(filters.period, Period::Custom);

        for period in [Period::Last30Days, Period::Last90Days, Period::Last6Months, Period::Last12Months] {
            let mut f = filters.clone();
            f.set_period(period);
            assert!(f.custom_range.is_empty(), "range kept for {}", period);
        }

        // Re-selecting custom keeps the chosen dates
        let mut f = filters.clone();
        f.set_period(Period::Custom);
        assert_eq!(f.custom_range.from, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_active_filters() {
        let mut filters = FilterState::default();
        filters.set_period(Period::Custom);
        // Custom period without dates is not an active filter
        assert!(!filters.has_active_filters());

        filters.set_custom_range(DateRange::new(None, Some(date(2024, 5, 1))));
        assert!(filters.has_active_filters());

        filters.reset();
        filters.set_region(Selection::from("bretagne"));
        assert!(filters.has_active_filters());
    }

    #[test]
    fn test_date_range_display() {
        let mut filters = FilterState::default();
        assert_eq!(filters.date_range_display(), "Date personnalisée");

        filters.set_custom_range(DateRange::new(Some(date(2024, 2, 5)), None));
        assert_eq!(filters.date_range_display(), "À partir du 05/02/2024");

        filters.set_custom_range(DateRange::new(Some(date(2024, 2, 5)), Some(date(2024, 3, 9))));
        assert_eq!(filters.date_range_display(), "05/02/2024 - 09/03/2024");

        filters.set_custom_range(DateRange::new(None, Some(date(2024, 3, 9))));
        assert_eq!(filters.date_range_display(), "Date personnalisée");
    }

    #[test]
    fn test_selection_serde() {
        let filters = FilterState::for_indication("cancer-sein");
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json["indication"], "cancer-sein");
        assert_eq!(json["region"], "all");
        assert_eq!(json["period"], "last-90-days");

        let back: FilterState = serde_json::from_value(json).unwrap();
        assert_eq!(back, filters);
    }

    #[test]
    fn test_period_parsing() {
        assert_eq!("last-6-months".parse::<Period>().unwrap(), Period::Last6Months);
        assert!(matches!(
            "last-2-weeks".parse::<Period>(),
            Err(InsightError::UnknownPeriod(_))
        ));
        assert_eq!(Period::Custom.next(), Period::Last30Days);
    }

    #[test]
    fn test_fingerprint() {
        assert_eq!(FilterState::default().fingerprint(), "all-all-last-90-days");
    }
}
