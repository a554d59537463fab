//! Filter-driven metrics derivation for the overview page.
//!
//! [`derive_metrics`] is total: every filter combination yields a result.
//! Keys missing from the reference tables fall back to fixed defaults
//! ([`DEFAULT_KPI`], [`DEFAULT_RANK_INTEREST`], [`DEFAULT_RANK_POTENTIAL`]).

use tracing::{debug, warn};

use crate::classify::PriorityTier;
use crate::reference::ReferenceData;
use crate::types::{
    DerivedMetrics, EvolutionPoint, FilterState, Kpi, PathologyMetric, RankedIndication,
    RegionModifier,
};

/// KPI used when the selected indication has no metric.
pub const DEFAULT_KPI: Kpi = Kpi {
    interest: 78,
    potential: 2450,
    competition: 3,
    feasibility: 85,
};

/// Interest used for a ranked row whose pathology has no metric.
pub const DEFAULT_RANK_INTEREST: i64 = 75;
/// Potential used for a ranked row whose pathology has no metric.
pub const DEFAULT_RANK_POTENTIAL: i64 = 500;

pub const INTEREST_MIN: i64 = 50;
pub const INTEREST_MAX: i64 = 100;
pub const POTENTIAL_FLOOR: i64 = 200;
pub const MAX_RANKED: usize = 8;

pub const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc",
];

/// Round half up, matching how the dashboard has always displayed scores.
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn scale(value: i64, factor: f64) -> i64 {
    round_half_up(value as f64 * factor)
}

/// Deterministic seed of the cosmetic variation: length of the filter fingerprint.
pub fn variation_seed(filters: &FilterState) -> usize {
    filters.fingerprint().chars().count()
}

/// Signed offset in `[-5, 4]` derived from the seed.
pub fn variation(seed: usize) -> i64 {
    (seed % 10) as i64 - 5
}

/// Mean of every pathology metric, each field rounded independently.
pub fn average_metric(reference: &ReferenceData) -> Option<PathologyMetric> {
    let metrics: Vec<PathologyMetric> = reference
        .pathologies
        .iter()
        .filter_map(|p| reference.metric(&p.key))
        .collect();
    if metrics.is_empty() {
        return None;
    }

    let n = metrics.len() as f64;
    let mean = |field: fn(&PathologyMetric) -> i64| {
        round_half_up(metrics.iter().map(field).sum::<i64>() as f64 / n)
    };

    Some(PathologyMetric {
        interest: mean(|m| m.interest),
        potential: mean(|m| m.potential),
        competition: mean(|m| m.competition),
        feasibility: mean(|m| m.feasibility),
    })
}

/// KPI before the cosmetic variation: selected (or averaged) metric, region-scaled.
pub fn base_kpi(reference: &ReferenceData, filters: &FilterState) -> Kpi {
    let mut kpi = match filters.indication.key() {
        Some(key) => match reference.metric(key) {
            Some(metric) => Kpi::from(metric),
            None => {
                warn!("No metric for indication '{}', using defaults", key);
                DEFAULT_KPI
            }
        },
        None => average_metric(reference).map(Kpi::from).unwrap_or(DEFAULT_KPI),
    };

    if !filters.region.is_all() {
        let modifier = reference.modifier_for(&filters.region);
        kpi.interest = scale(kpi.interest, modifier.interest);
        kpi.potential = scale(kpi.potential, modifier.potential);
    }
    kpi
}

/// Shift interest and potential by the seed's offset and clamp them.
pub fn apply_variation(kpi: Kpi, seed: usize) -> Kpi {
    let offset = variation(seed);
    Kpi {
        interest: (kpi.interest + offset).clamp(INTEREST_MIN, INTEREST_MAX),
        potential: (kpi.potential + offset * 50).max(POTENTIAL_FLOOR),
        ..kpi
    }
}

/// Twelve monthly points ramping up to the KPI interest.
pub fn evolution_series(interest: i64, seed: usize) -> Vec<EvolutionPoint> {
    let offset = (seed % 5) as i64;
    MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| EvolutionPoint {
            month: month.to_string(),
            interest: (interest - 20 + 2 * i as i64 + offset).clamp(INTEREST_MIN, INTEREST_MAX),
        })
        .collect()
}

/// Top indications for the current filters.
///
/// Rows are sorted by interest (ties keep catalogue order). A selected
/// indication is pinned to rank 1 whatever its score; the list is then cut to
/// [`MAX_RANKED`] rows and renumbered from 1.
pub fn rank_indications(reference: &ReferenceData, filters: &FilterState) -> Vec<RankedIndication> {
    let modifier = reference.modifier_for(&filters.region);
    let selected_region = (!filters.region.is_all()).then(|| reference.region_label(&filters.region));

    let mut rows: Vec<RankedIndication> = reference
        .pathologies
        .iter()
        .enumerate()
        .map(|(idx, pathology)| {
            let (interest, potential) = scaled_scores(reference.metric(&pathology.key), modifier);
            let region = selected_region.clone().unwrap_or_else(|| round_robin_region(reference, idx));
            RankedIndication {
                rank: idx + 1,
                key: pathology.key.clone(),
                indication: pathology.label.clone(),
                region,
                interest,
                potential,
                priority: PriorityTier::from_interest(interest),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.interest.cmp(&a.interest));

    if let Some(key) = filters.indication.key() {
        if let Some(pos) = rows.iter().position(|row| row.key == key) {
            let pinned = rows.remove(pos);
            rows.insert(0, pinned);
        }
    }

    rows.truncate(MAX_RANKED);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = idx + 1;
    }
    rows
}

fn scaled_scores(metric: Option<PathologyMetric>, modifier: RegionModifier) -> (i64, i64) {
    let (interest, potential) = metric
        .map(|m| (m.interest, m.potential))
        .unwrap_or((DEFAULT_RANK_INTEREST, DEFAULT_RANK_POTENTIAL));
    (scale(interest, modifier.interest), scale(potential, modifier.potential))
}

fn round_robin_region(reference: &ReferenceData, idx: usize) -> String {
    if reference.regions.is_empty() {
        return crate::reference::ALL_REGIONS_LABEL.to_string();
    }
    reference.regions[idx % reference.regions.len()].label.clone()
}

/// Recompute everything the overview shows for `filters`.
pub fn derive_metrics(reference: &ReferenceData, filters: &FilterState) -> DerivedMetrics {
    let seed = variation_seed(filters);
    let kpi = apply_variation(base_kpi(reference, filters), seed);
    let evolution = evolution_series(kpi.interest, seed);
    let ranked_indications = rank_indications(reference, filters);

    debug!(
        indication = %filters.indication,
        region = %filters.region,
        period = %filters.period,
        interest = kpi.interest,
        potential = kpi.potential,
        "Derived overview metrics"
    );

    DerivedMetrics {
        kpi,
        evolution,
        ranked_indications,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Period, Selection};

    fn reference() -> &'static ReferenceData {
        ReferenceData::global()
    }

    fn filters(indication: &str, region: &str, period: Period) -> FilterState {
        FilterState {
            indication: Selection::from(indication),
            region: Selection::from(region),
            period,
            ..FilterState::default()
        }
    }

    #[test]
    fn test_base_kpi_matches_static_metric() {
        let data = reference();
        for pathology in &data.pathologies {
            let kpi = base_kpi(data, &filters(&pathology.key, "all", Period::Last90Days));
            let metric = data.metric(&pathology.key).unwrap();
            assert_eq!(kpi, Kpi::from(metric), "mismatch for {}", pathology.key);
        }
    }

    #[test]
    fn test_average_of_all_pathologies() {
        let kpi = base_kpi(reference(), &FilterState::default());
        // 1097 / 14 = 78.36, 8210 / 14 = 586.4, 34 / 14 = 2.43, 1078 / 14 = 77
        assert_eq!(
            kpi,
            Kpi {
                interest: 78,
                potential: 586,
                competition: 2,
                feasibility: 77
            }
        );
    }

    #[test]
    fn test_default_filters_derivation() {
        // "all-all-last-90-days" is 20 chars long: variation -5, evolution offset 0
        let derived = derive_metrics(reference(), &FilterState::default());
        assert_eq!(derived.kpi.interest, 73);
        assert_eq!(derived.kpi.potential, 336);
        assert_eq!(derived.kpi.competition, 2);
        assert_eq!(derived.kpi.feasibility, 77);
        assert_eq!(derived.evolution[0].interest, 53);
        assert_eq!(derived.evolution[11].interest, 75);
    }

    #[test]
    fn test_selected_indication_derivation() {
        // "cancer-sein-all-last-90-days" is 28 chars: variation +3, evolution offset 3
        let derived = derive_metrics(reference(), &filters("cancer-sein", "all", Period::Last90Days));
        assert_eq!(derived.kpi.interest, 95);
        assert_eq!(derived.kpi.potential, 1400);
        assert_eq!(derived.kpi.competition, 3);
        assert_eq!(derived.kpi.feasibility, 88);

        let values: Vec<i64> = derived.evolution.iter().map(|p| p.interest).collect();
        assert_eq!(values, vec![78, 80, 82, 84, 86, 88, 90, 92, 94, 96, 98, 100]);
    }

    #[test]
    fn test_region_scaling_and_clamp() {
        let data = reference();
        let f = filters("cancer-sein", "ile-de-france", Period::Last30Days);
        let base = base_kpi(data, &f);
        // 92 * 1.15 = 105.8, 1250 * 1.3 = 1625
        assert_eq!(base.interest, 106);
        assert_eq!(base.potential, 1625);

        let derived = derive_metrics(data, &f);
        assert_eq!(derived.kpi.interest, INTEREST_MAX);
    }

    #[test]
    fn test_potential_floor() {
        let kpi = apply_variation(
            Kpi {
                interest: 40,
                potential: 150,
                competition: 1,
                feasibility: 60,
            },
            0,
        );
        assert_eq!(kpi.interest, INTEREST_MIN);
        assert_eq!(kpi.potential, POTENTIAL_FLOOR);
        assert_eq!(kpi.competition, 1);
        assert_eq!(kpi.feasibility, 60);
    }

    #[test]
    fn test_unknown_keys_fall_back() {
        let data = reference();
        let kpi = base_kpi(data, &filters("maladie-inconnue", "atlantis", Period::Last90Days));
        assert_eq!(kpi, DEFAULT_KPI);

        // Unknown indication is not in the catalogue, so nothing is pinned
        let ranked = rank_indications(data, &filters("maladie-inconnue", "atlantis", Period::Last90Days));
        assert_eq!(ranked[0].key, "cancer-sein");
        assert!(ranked.iter().all(|r| r.region == "Toutes les régions"));
    }

    #[test]
    fn test_missing_metric_uses_rank_defaults() {
        let mut data = ReferenceData::builtin();
        data.metrics.remove("llc-richter");
        let ranked = rank_indications(&data, &filters("llc-richter", "all", Period::Last90Days));
        assert_eq!(ranked[0].key, "llc-richter");
        assert_eq!(ranked[0].interest, DEFAULT_RANK_INTEREST);
        assert_eq!(ranked[0].potential, DEFAULT_RANK_POTENTIAL);
    }

    #[test]
    fn test_ranking_invariants_for_every_filter() {
        let data = reference();
        let indications = data.indication_options();
        let regions = data.region_options();

        for (ind, _) in &indications {
            for (reg, _) in &regions {
                for period in Period::ALL {
                    let f = filters(ind, reg, period);
                    let derived = derive_metrics(data, &f);
                    let ranked = &derived.ranked_indications;

                    assert!(ranked.len() <= MAX_RANKED);
                    let ranks: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
                    assert_eq!(ranks, (1..=ranked.len()).collect::<Vec<_>>());

                    // Sorted after the pinned head (or entirely when nothing is pinned)
                    let sorted_from = if f.indication.is_all() { 0 } else { 1 };
                    for pair in ranked[sorted_from..].windows(2) {
                        assert!(pair[0].interest >= pair[1].interest);
                    }

                    if let Some(key) = f.indication.key() {
                        assert_eq!(ranked[0].indication, data.pathology(key).unwrap().label);
                    }

                    assert_eq!(derived.evolution.len(), 12);
                    assert!(derived
                        .evolution
                        .iter()
                        .all(|p| (INTEREST_MIN..=INTEREST_MAX).contains(&p.interest)));
                    assert!((INTEREST_MIN..=INTEREST_MAX).contains(&derived.kpi.interest));
                    assert!(derived.kpi.potential >= POTENTIAL_FLOOR);
                }
            }
        }
    }

    #[test]
    fn test_low_interest_indication_is_pinned_first() {
        let ranked = rank_indications(reference(), &filters("llc-richter", "all", Period::Last90Days));
        assert_eq!(ranked[0].indication, "LLC & syndrome de Richter");
        assert_eq!(ranked[0].interest, 70);
        assert_eq!(ranked[0].priority, PriorityTier::Moderate);
        assert_eq!(ranked[1].indication, "Cancer du sein");
        assert_eq!(ranked.len(), MAX_RANKED);
    }

    #[test]
    fn test_unfiltered_ranking_order() {
        let ranked = rank_indications(reference(), &FilterState::default());
        let keys: Vec<&str> = ranked.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "cancer-sein",
                "cancer-poumon",
                "cancer-prostate",
                "lymphome",
                "cancer-colon",
                "cancer-endometre",
                "cancer-vessie",
                "cancer-rectum",
            ]
        );
        assert_eq!(ranked[0].priority, PriorityTier::VeryHigh);
        assert_eq!(ranked[4].priority, PriorityTier::High);
    }

    #[test]
    fn test_region_labels() {
        let data = reference();

        let ranked = rank_indications(data, &filters("all", "bretagne", Period::Last90Days));
        assert!(ranked.iter().all(|r| r.region == "Bretagne"));

        // Without a region each row gets a catalogue-index based label
        let ranked = rank_indications(data, &FilterState::default());
        assert_eq!(ranked[0].region, "Auvergne-Rhône-Alpes");
        assert_eq!(ranked[1].region, "Bourgogne-Franche-Comté");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let f = filters("lymphome", "occitanie", Period::Last6Months);
        assert_eq!(derive_metrics(reference(), &f), derive_metrics(reference(), &f));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(105.8), 106);
    }
}
