//! Eligible patient profiles per region.

use serde::Serialize;

use crate::classify::{territory_bar_tone, Tone};

/// Share of eligible profiles already engaged in competing trials.
pub const SATURATION_RATIO: f64 = 0.85;

// (region key, label, eligible profiles, trend %, base tone)
const TERRITORY_TABLE: [(&str, &str, u32, i32, Tone); 13] = [
    ("ile-de-france", "Île-de-France", 815, 55, Tone::Green),
    ("auvergne-rhone-alpes", "Auvergne-Rhône-Alpes", 634, 42, Tone::Green),
    ("nouvelle-aquitaine", "Nouvelle-Aquitaine", 520, 35, Tone::Green),
    ("occitanie", "Occitanie", 480, 32, Tone::Green),
    ("hauts-de-france", "Hauts-de-France", 380, -12, Tone::Green),
    ("grand-est", "Grand Est", 351, 28, Tone::Orange),
    ("provence-alpes-cote-azur", "Provence-Alpes-Côte d'Azur", 340, -8, Tone::Orange),
    ("pays-de-la-loire", "Pays de la Loire", 280, 20, Tone::Orange),
    ("normandie", "Normandie", 260, 18, Tone::Orange),
    ("bretagne", "Bretagne", 240, 16, Tone::Yellow),
    ("centre-val-de-loire", "Centre-Val de Loire", 220, -5, Tone::Yellow),
    ("bourgogne-franche-comte", "Bourgogne-Franche-Comté", 192, 15, Tone::Red),
    ("corse", "Corse", 85, 8, Tone::Red),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritoryRow {
    pub key: &'static str,
    pub label: &'static str,
    pub eligible_profiles: u32,
    pub trend_percent: i32,
    pub base_tone: Tone,
    /// Bar width relative to the best-covered region.
    pub fill_percent: f64,
    pub bar_tone: Tone,
    pub saturation: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TerritoryOverview {
    pub rows: Vec<TerritoryRow>,
    pub max_profiles: u32,
}

pub fn territory_overview() -> TerritoryOverview {
    let max_profiles = TERRITORY_TABLE.iter().map(|t| t.2).max().unwrap_or(0);

    let rows = TERRITORY_TABLE
        .iter()
        .map(|&(key, label, value, trend, tone)| TerritoryRow {
            key,
            label,
            eligible_profiles: value,
            trend_percent: trend,
            base_tone: tone,
            fill_percent: if max_profiles == 0 {
                0.0
            } else {
                value as f64 / max_profiles as f64 * 100.0
            },
            bar_tone: territory_bar_tone(value, tone),
            saturation: (value as f64 * SATURATION_RATIO).floor() as u32,
        })
        .collect();

    TerritoryOverview { rows, max_profiles }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    #[test]
    fn test_rows_cover_every_region() {
        let overview = territory_overview();
        let data = ReferenceData::global();
        assert_eq!(overview.rows.len(), data.regions.len());
        for row in &overview.rows {
            assert!(data.region(row.key).is_some(), "unknown region {}", row.key);
        }
    }

    #[test]
    fn test_fill_and_saturation() {
        let overview = territory_overview();
        assert_eq!(overview.max_profiles, 815);

        let first = &overview.rows[0];
        assert_eq!(first.fill_percent, 100.0);
        assert_eq!(first.saturation, 692);

        let corse = overview.rows.iter().find(|r| r.key == "corse").unwrap();
        assert_eq!(corse.saturation, 72);
        assert!(corse.fill_percent < 11.0);
    }

    #[test]
    fn test_low_regions_are_red() {
        let overview = territory_overview();
        for row in &overview.rows {
            if row.eligible_profiles < 210 {
                assert_eq!(row.bar_tone, Tone::Red);
            } else {
                assert_eq!(row.bar_tone, row.base_tone);
            }
        }
    }
}
