//! Competitive signals: competing-trial activity over time, per-indication
//! cards and the rising/declining lists.

use serde::Serialize;

use crate::classify::Tone;

pub const ACTIVITY_MONTHS: [&str; 7] = [
    "oct. 2022", "sept. 2022", "déc. 2023", "jul. 2023", "jan. 2024", "mars 2024", "avr. 2024",
];

// (key, label, colour, activity per month)
const ACTIVITY_TABLE: [(&str, &str, &str, [f64; 7]); 15] = [
    ("cancer-poumon", "Cancer du poumon", "hsl(195 66% 54%)", [10.0, 10.5, 13.0, 14.0, 15.0, 15.5, 15.8]),
    ("carcinome-colorectal", "Carcinome colorectal", "hsl(142 76% 46%)", [5.5, 6.0, 9.0, 10.0, 11.0, 11.5, 11.8]),
    ("lymphome-diffus", "Lymphome diffus", "hsl(30 100% 55%)", [4.0, 4.1, 7.5, 8.5, 8.0, 6.5, 6.2]),
    ("cancer-pancreas", "Cancer du pancréas", "hsl(0 84% 60%)", [2.5, 2.6, 5.2, 5.8, 6.0, 4.5, 4.2]),
    ("cancer-sein", "Cancer du sein", "hsl(280 65% 55%)", [8.5, 8.8, 11.2, 12.0, 12.8, 13.2, 13.5]),
    ("cancer-prostate", "Cancer de la prostate", "hsl(200 70% 50%)", [6.2, 6.4, 8.5, 9.2, 9.8, 10.0, 10.2]),
    ("cancer-colon", "Cancer du colon", "hsl(45 100% 60%)", [7.8, 8.0, 10.5, 11.5, 12.2, 12.5, 12.8]),
    ("cancer-rectum", "Cancer du rectum", "hsl(320 60% 55%)", [3.5, 3.6, 5.5, 6.2, 6.8, 6.5, 6.2]),
    ("cancer-anus", "Cancer de l'anus", "hsl(15 90% 50%)", [2.2, 2.3, 3.8, 4.2, 4.5, 4.2, 4.0]),
    ("cancer-rein", "Cancer du rein", "hsl(160 70% 45%)", [5.8, 6.0, 8.2, 9.0, 9.5, 9.2, 9.0]),
    ("cancer-foie", "Cancer du foie et des voies biliaires", "hsl(60 80% 55%)", [3.2, 3.3, 5.5, 6.0, 6.5, 6.2, 6.0]),
    ("cancer-vessie", "Cancer de la vessie / VES / urètre", "hsl(220 65% 50%)", [4.5, 4.6, 6.8, 7.5, 8.0, 7.8, 7.5]),
    ("cancer-estomac", "Cancer de l'estomac et de l'oesophage", "hsl(180 60% 50%)", [3.8, 3.9, 5.8, 6.5, 7.0, 6.8, 6.5]),
    ("cancer-endometre", "Cancer de l'endomètre", "hsl(340 70% 55%)", [6.5, 6.7, 9.2, 10.0, 10.5, 10.2, 10.0]),
    ("llc-richter", "LLC & syndrome de Richter", "hsl(270 65% 55%)", [2.8, 2.9, 4.2, 4.8, 5.0, 4.8, 4.5]),
];

use Tone::{Green as G, Orange as O, Yellow as Y};

// (key, label, icon, competing trials, rising, rcps, progress, confidence /10)
#[allow(clippy::type_complexity)]
const CARD_TABLE: [(&str, &str, &str, u32, bool, u32, [Tone; 4], u8); 15] = [
    ("cancer-poumon", "Cancer du poumon", "Z", 7, true, 51, [G, G, G, G], 9),
    ("carcinome-colorectal", "Carcinome colorectal", "e", 11, false, 52, [G, G, G, Y], 8),
    ("lymphome-diffus", "Lymphome diffus", "●", 8, false, 44, [O, O, O, O], 6),
    ("cancer-pancreas", "Cancer du pancréas", "▲", 5, false, 38, [O, O, O, O], 5),
    ("cancer-sein", "Cancer du sein", "S", 9, false, 48, [G, G, G, G], 8),
    ("cancer-prostate", "Cancer de la prostate", "P", 6, false, 42, [G, G, G, Y], 7),
    ("cancer-colon", "Cancer du colon", "C", 10, false, 49, [G, G, G, Y], 7),
    ("cancer-rectum", "Cancer du rectum", "R", 4, false, 35, [O, O, O, Y], 6),
    ("cancer-anus", "Cancer de l'anus", "A", 3, false, 28, [O, O, O, O], 4),
    ("cancer-rein", "Cancer du rein", "K", 6, false, 40, [G, G, G, O], 6),
    ("cancer-foie", "Cancer du foie et des voies biliaires", "F", 4, false, 32, [O, O, O, Y], 5),
    ("cancer-vessie", "Cancer de la vessie / VES / urètre", "V", 5, false, 36, [O, O, O, Y], 5),
    ("cancer-estomac", "Cancer de l'estomac et de l'oesophage", "E", 4, false, 33, [O, O, O, O], 5),
    ("cancer-endometre", "Cancer de l'endomètre", "D", 7, false, 45, [G, G, G, Y], 7),
    ("llc-richter", "LLC & syndrome de Richter", "L", 3, false, 26, [O, O, O, O], 4),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySeries {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicationCard {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub competing_trials: u32,
    pub rising: bool,
    pub rcps: u32,
    pub progress: [Tone; 4],
    pub confidence: u8,
    /// `min(100, competing_trials * 10)`.
    pub saturation_percent: u32,
    pub saturation_tone: Tone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendingEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub trend: &'static str,
}

/// One bar of the perceived-saturation distribution, shares in percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaturationDistribution {
    pub high: u32,
    pub moderate: u32,
    pub low: u32,
    pub trend: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitiveSignals {
    pub months: Vec<&'static str>,
    pub activity: Vec<ActivitySeries>,
    pub cards: Vec<IndicationCard>,
    pub rising_pathologies: Vec<TrendingEntry>,
    pub competing_classes: Vec<TrendingEntry>,
    pub saturation_distribution: Vec<SaturationDistribution>,
}

pub fn competition_saturation(competing_trials: u32) -> u32 {
    competing_trials.saturating_mul(10).min(100)
}

/// Above 80 is red, 60 to 80 orange, 40 to 59 yellow, below 40 green.
pub fn competition_saturation_tone(percent: u32) -> Tone {
    match percent {
        p if p > 80 => Tone::Red,
        60..=80 => Tone::Orange,
        40..=59 => Tone::Yellow,
        _ => Tone::Green,
    }
}

pub fn activity_series() -> Vec<ActivitySeries> {
    ACTIVITY_TABLE
        .iter()
        .map(|(key, label, color, values)| ActivitySeries {
            key,
            label,
            color,
            values: values.to_vec(),
        })
        .collect()
}

pub fn indication_cards() -> Vec<IndicationCard> {
    CARD_TABLE
        .iter()
        .map(|&(key, label, icon, trials, rising, rcps, progress, confidence)| {
            let saturation_percent = competition_saturation(trials);
            IndicationCard {
                key,
                label,
                icon,
                competing_trials: trials,
                rising,
                rcps,
                progress,
                confidence,
                saturation_percent,
                saturation_tone: competition_saturation_tone(saturation_percent),
            }
        })
        .collect()
}

pub fn competitive_signals() -> CompetitiveSignals {
    CompetitiveSignals {
        months: ACTIVITY_MONTHS.to_vec(),
        activity: activity_series(),
        cards: indication_cards(),
        rising_pathologies: vec![
            TrendingEntry { key: "cancer-sein", label: "Cancer du sein", trend: "+18%" },
            TrendingEntry { key: "cancer-poumon", label: "Cancer du poumon", trend: "+15%" },
            TrendingEntry { key: "cancer-prostate", label: "Cancer de la prostate", trend: "+12%" },
        ],
        competing_classes: vec![
            TrendingEntry { key: "cancer-anus", label: "Cancer de l'anus", trend: "+25%" },
            TrendingEntry { key: "cancer-rectum", label: "Cancer du rectum", trend: "+20%" },
            TrendingEntry { key: "cancer-pancreas", label: "Cancer du pancréas", trend: "+18%" },
        ],
        saturation_distribution: vec![
            SaturationDistribution { high: 45, moderate: 30, low: 25, trend: "↑45%" },
            SaturationDistribution { high: 40, moderate: 35, low: 25, trend: "↑33%" },
            SaturationDistribution { high: 35, moderate: 40, low: 25, trend: "↑18%" },
            SaturationDistribution { high: 30, moderate: 35, low: 35, trend: "↑4%" },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_matches_months() {
        let signals = competitive_signals();
        assert_eq!(signals.activity.len(), 15);
        for series in &signals.activity {
            assert_eq!(series.values.len(), signals.months.len(), "{}", series.key);
        }
    }

    #[test]
    fn test_competition_saturation() {
        assert_eq!(competition_saturation(7), 70);
        assert_eq!(competition_saturation(11), 100);
        assert_eq!(competition_saturation_tone(100), Tone::Red);
        assert_eq!(competition_saturation_tone(80), Tone::Orange);
        assert_eq!(competition_saturation_tone(60), Tone::Orange);
        assert_eq!(competition_saturation_tone(50), Tone::Yellow);
        assert_eq!(competition_saturation_tone(30), Tone::Green);
    }

    #[test]
    fn test_cards() {
        let cards = indication_cards();
        let lung = &cards[0];
        assert!(lung.rising);
        assert_eq!(lung.saturation_percent, 70);
        assert_eq!(lung.saturation_tone, Tone::Orange);
        assert!(cards.iter().all(|c| c.confidence <= 10));
        assert_eq!(cards.iter().filter(|c| c.rising).count(), 1);
    }

    #[test]
    fn test_distribution_rows_sum_to_100() {
        for row in competitive_signals().saturation_distribution {
            assert_eq!(row.high + row.moderate + row.low, 100);
        }
    }
}
