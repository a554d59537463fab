//! Pathology insights: trial consultations, perceived saturation and the
//! medical-interest evolution curves.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::classify::SaturationTier;
use crate::derive::round_half_up;
use crate::reference::ReferenceData;
use crate::types::Period;

pub const CONSULTATIONS_MIN: u32 = 200;
pub const CONSULTATIONS_MAX: u32 = 1400;
pub const SATURATION_MIN: u32 = 5;
pub const SATURATION_MAX: u32 = 70;

pub const EVOLUTION_MONTHS: [&str; 11] = [
    "mai 2023", "jun. 2023", "jul. 2023", "août 2023", "sep. 2023", "oct. 2023",
    "nov. 2023", "déc. 2023", "jan. 2024", "fév. 2024", "mars 2024",
];

// (pathology key, start, end, trend)
const EVOLUTION_BASES: [(&str, f64, f64, f64); 14] = [
    ("cancer-sein", 6.2, 8.8, 0.25),
    ("cancer-poumon", 5.2, 8.4, 0.29),
    ("cancer-prostate", 5.8, 7.9, 0.19),
    ("cancer-colon", 4.5, 6.8, 0.21),
    ("cancer-rectum", 4.2, 6.2, 0.18),
    ("cancer-anus", 3.8, 5.5, 0.15),
    ("cancer-rein", 4.0, 5.9, 0.17),
    ("cancer-pancreas", 2.1, 3.0, 0.08),
    ("cancer-foie", 3.5, 5.2, 0.15),
    ("cancer-vessie", 4.3, 6.4, 0.19),
    ("cancer-estomac", 4.1, 6.1, 0.18),
    ("cancer-endometre", 4.4, 6.5, 0.19),
    ("lymphome", 3.2, 4.8, 0.14),
    ("llc-richter", 2.8, 4.2, 0.13),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsultationRow {
    pub key: String,
    pub indication: String,
    pub color: String,
    pub consultations: u32,
    /// Bar width against the top of the consultation scale.
    pub fill_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaturationRow {
    pub key: String,
    pub indication: String,
    pub percent: u32,
    pub tier: SaturationTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionSeries {
    pub key: String,
    pub label: String,
    pub color: String,
    pub trend: f64,
    pub values: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndicationInsights {
    pub period: Period,
    pub consultations: Vec<ConsultationRow>,
    pub saturation: Vec<SaturationRow>,
    pub months: Vec<&'static str>,
    pub evolution: Vec<EvolutionSeries>,
}

/// Stable per (period, pathology) so a page reload shows the same figures.
fn rng_for(period: Period, key: &str) -> StdRng {
    let seed = period
        .as_key()
        .bytes()
        .chain(std::iter::once(b'/'))
        .chain(key.bytes())
        .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
            (acc ^ b as u64).wrapping_mul(0x0100_0000_01b3)
        });
    StdRng::seed_from_u64(seed)
}

pub fn consultations(reference: &ReferenceData, period: Period) -> Vec<ConsultationRow> {
    reference
        .pathologies
        .iter()
        .map(|p| {
            let count = rng_for(period, &p.key).gen_range(CONSULTATIONS_MIN..CONSULTATIONS_MAX);
            ConsultationRow {
                key: p.key.clone(),
                indication: p.label.clone(),
                color: p.color.clone(),
                consultations: count,
                fill_percent: count as f64 / CONSULTATIONS_MAX as f64 * 100.0,
            }
        })
        .collect()
}

pub fn perceived_saturation(reference: &ReferenceData, period: Period) -> Vec<SaturationRow> {
    reference
        .pathologies
        .iter()
        .map(|p| {
            // Consultations consume the first draw of the same stream
            let mut rng = rng_for(period, &p.key);
            let _ = rng.gen_range(CONSULTATIONS_MIN..CONSULTATIONS_MAX);
            let percent = rng.gen_range(SATURATION_MIN..=SATURATION_MAX);
            SaturationRow {
                key: p.key.clone(),
                indication: p.label.clone(),
                percent,
                tier: SaturationTier::classify(percent as f64),
            }
        })
        .collect()
}

/// Linear ramp from `start` to `end` with a one-period sine wobble of 0.1.
pub fn evolution_values(start: f64, end: f64, points: usize) -> Vec<i64> {
    let span = points.saturating_sub(1).max(1) as f64;
    (0..points)
        .map(|i| {
            let progress = i as f64 / span;
            let wobble = (progress * PI * 2.0).sin() * 0.1;
            round_half_up(start + (end - start) * progress + wobble)
        })
        .collect()
}

pub fn interest_evolution(reference: &ReferenceData) -> Vec<EvolutionSeries> {
    reference
        .pathologies
        .iter()
        .filter_map(|p| {
            let &(_, start, end, trend) = EVOLUTION_BASES.iter().find(|b| b.0 == p.key)?;
            Some(EvolutionSeries {
                key: p.key.clone(),
                label: p.label.clone(),
                color: p.color.clone(),
                trend,
                values: evolution_values(start, end, EVOLUTION_MONTHS.len()),
            })
        })
        .collect()
}

pub fn indication_insights(reference: &ReferenceData, period: Period) -> IndicationInsights {
    IndicationInsights {
        period,
        consultations: consultations(reference, period),
        saturation: perceived_saturation(reference, period),
        months: EVOLUTION_MONTHS.to_vec(),
        evolution: interest_evolution(reference),
    }
}

/// Pathologies shown on the evolution chart; every one starts visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathologyVisibility {
    visible: BTreeSet<String>,
}

impl PathologyVisibility {
    pub fn all(reference: &ReferenceData) -> Self {
        Self {
            visible: reference.pathologies.iter().map(|p| p.key.clone()).collect(),
        }
    }

    pub fn toggle(&mut self, key: &str) {
        if !self.visible.remove(key) {
            self.visible.insert(key.to_string());
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges_hold_for_every_period() {
        let data = ReferenceData::global();
        for period in Period::ALL {
            let insights = indication_insights(data, period);
            assert_eq!(insights.consultations.len(), 14);
            for row in &insights.consultations {
                assert!((CONSULTATIONS_MIN..CONSULTATIONS_MAX).contains(&row.consultations));
                assert!(row.fill_percent < 100.0);
            }
            for row in &insights.saturation {
                assert!((SATURATION_MIN..=SATURATION_MAX).contains(&row.percent));
                assert_eq!(row.tier, SaturationTier::classify(row.percent as f64));
            }
        }
    }

    #[test]
    fn test_figures_are_deterministic() {
        let data = ReferenceData::global();
        let a = consultations(data, Period::Last6Months);
        let b = consultations(data, Period::Last6Months);
        assert_eq!(a, b);
        assert_eq!(
            perceived_saturation(data, Period::Last30Days),
            perceived_saturation(data, Period::Last30Days)
        );
    }

    #[test]
    fn test_evolution_curve() {
        // 6.2 -> 8.8 over 11 months
        let values = evolution_values(6.2, 8.8, EVOLUTION_MONTHS.len());
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 6);
        assert_eq!(values[10], 9);
        assert!(values.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_evolution_covers_catalogue() {
        let series = interest_evolution(ReferenceData::global());
        assert_eq!(series.len(), 14);
        let pancreas = series.iter().find(|s| s.key == "cancer-pancreas").unwrap();
        assert!(pancreas.values.iter().all(|v| (2..=3).contains(v)));
    }

    #[test]
    fn test_visibility_toggle() {
        let mut visibility = PathologyVisibility::all(ReferenceData::global());
        assert_eq!(visibility.len(), 14);

        visibility.toggle("lymphome");
        assert!(!visibility.is_visible("lymphome"));
        assert_eq!(visibility.len(), 13);

        visibility.toggle("lymphome");
        assert!(visibility.is_visible("lymphome"));
    }
}
