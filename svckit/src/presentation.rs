// Display helpers shared by the terminal and browser dashboards.

use serde::Serialize;

use crate::classify::{CompetitionLevel, TrendDirection};
use crate::derive::round_half_up;
use crate::reference::ReferenceData;
use crate::types::{DerivedMetrics, FilterState, Selection};

pub const BASELINE_INTEREST: i64 = 78;
pub const BASELINE_POTENTIAL: i64 = 2450;
pub const BASELINE_FEASIBILITY: i64 = 85;
/// Competition count considered normal; the card trend is the signed gap to it.
pub const BASELINE_COMPETITION: i64 = 3;

pub const ALERT_TITLE: &str = "Voici où vous devez regarder en priorité";
const ALERT_DEFAULT_PATHOLOGY: &str = "Cancer du sein";
const ALERT_DEFAULT_REGION: &str = "Île-de-France";
const ALERT_UNKNOWN_PATHOLOGY: &str = "pathologie sélectionnée";
const ALERT_UNKNOWN_REGION: &str = "région sélectionnée";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    Default,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiTrend {
    pub value: i64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: String,
    pub tooltip: &'static str,
    pub trend: KpiTrend,
    pub variant: CardVariant,
}

/// The four overview cards: interest, potential, competition, feasibility.
pub fn kpi_cards(metrics: &DerivedMetrics) -> [KpiCard; 4] {
    let kpi = &metrics.kpi;
    let potential_trend = round_half_up((kpi.potential - BASELINE_POTENTIAL) as f64 / 50.0);
    let plural = if kpi.competition > 1 { "s" } else { "" };

    [
        KpiCard {
            title: "Intérêt médical",
            value: format!("{}%", kpi.interest),
            subtitle: "Score global".to_string(),
            tooltip: "Mesure de l'intérêt des médecins lors des RCPs",
            trend: KpiTrend {
                value: (kpi.interest - BASELINE_INTEREST).abs(),
                direction: TrendDirection::between(kpi.interest, BASELINE_INTEREST),
            },
            variant: CardVariant::Default,
        },
        KpiCard {
            title: "Potentiel patients",
            value: format_thousands(kpi.potential),
            subtitle: "Patients éligibles estimés".to_string(),
            tooltip: "Estimation du nombre de patients pouvant bénéficier d'un essai",
            trend: KpiTrend {
                value: potential_trend.abs(),
                direction: TrendDirection::between(kpi.potential, BASELINE_POTENTIAL),
            },
            variant: CardVariant::Default,
        },
        KpiCard {
            title: "Niveau de concurrence",
            value: CompetitionLevel::from_count(kpi.competition).label().to_string(),
            subtitle: format!("{} essai{} actif{}", kpi.competition, plural, plural),
            tooltip: "Nombre d'essais concurrents sur les mêmes indications",
            trend: KpiTrend {
                value: kpi.competition - BASELINE_COMPETITION,
                direction: TrendDirection::Neutral,
            },
            variant: CardVariant::Default,
        },
        KpiCard {
            title: "Faisabilité globale",
            value: format!("{}%", kpi.feasibility),
            subtitle: "Score composite".to_string(),
            tooltip: "Score combinant intérêt médical, potentiel patients et niveau de concurrence",
            trend: KpiTrend {
                value: (kpi.feasibility - BASELINE_FEASIBILITY).abs(),
                direction: TrendDirection::between(kpi.feasibility, BASELINE_FEASIBILITY),
            },
            variant: CardVariant::Success,
        },
    ]
}

/// Body of the priority banner for the current selection.
pub fn priority_alert(reference: &ReferenceData, filters: &FilterState) -> String {
    let pathology = match &filters.indication {
        Selection::All => ALERT_DEFAULT_PATHOLOGY,
        Selection::Key(key) => reference
            .pathology(key)
            .map_or(ALERT_UNKNOWN_PATHOLOGY, |p| p.label.as_str()),
    };
    let region = match &filters.region {
        Selection::All => ALERT_DEFAULT_REGION,
        Selection::Key(key) => reference
            .region(key)
            .map_or(ALERT_UNKNOWN_REGION, |r| r.label.as_str()),
    };

    format!(
        "La pathologie \"{}\" en {} montre un fort intérêt médical avec une saturation faible.",
        pathology, region
    )
}

/// Group digits by three with spaces: `12450` becomes `"12 450"`.
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive_metrics;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1400), "1 400");
        assert_eq!(format_thousands(1234567), "1 234 567");
        assert_eq!(format_thousands(-2450), "-2 450");
    }

    #[test]
    fn test_default_kpi_cards() {
        let derived = derive_metrics(ReferenceData::global(), &FilterState::default());
        let cards = kpi_cards(&derived);

        assert_eq!(cards[0].value, "73%");
        assert_eq!(cards[0].trend.value, 5);
        assert_eq!(cards[0].trend.direction, TrendDirection::Down);

        assert_eq!(cards[1].value, "336");
        // (336 - 2450) / 50 = -42.28
        assert_eq!(cards[1].trend.value, 42);
        assert_eq!(cards[1].trend.direction, TrendDirection::Down);

        assert_eq!(cards[2].value, "Modéré");
        assert_eq!(cards[2].subtitle, "2 essais actifs");
        assert_eq!(cards[2].trend.value, -1);

        assert_eq!(cards[3].value, "77%");
        assert_eq!(cards[3].variant, CardVariant::Success);
    }

    #[test]
    fn test_competition_card_singular() {
        let derived = derive_metrics(
            ReferenceData::global(),
            &FilterState::for_indication("cancer-anus"),
        );
        let cards = kpi_cards(&derived);
        assert_eq!(cards[2].value, "Faible");
        assert_eq!(cards[2].subtitle, "1 essai actif");
    }

    #[test]
    fn test_priority_alert_defaults() {
        let data = ReferenceData::global();
        assert_eq!(
            priority_alert(data, &FilterState::default()),
            "La pathologie \"Cancer du sein\" en Île-de-France montre un fort intérêt médical avec une saturation faible."
        );

        let mut filters = FilterState::for_indication("lymphome");
        filters.set_region(Selection::from("corse"));
        let text = priority_alert(data, &filters);
        assert!(text.contains("\"Lymphome\" en Corse"));
    }

    #[test]
    fn test_priority_alert_unknown_keys() {
        let data = ReferenceData::global();
        let mut filters = FilterState::for_indication("foo");
        filters.set_region(Selection::from("atlantide"));
        assert_eq!(
            priority_alert(data, &filters),
            "La pathologie \"pathologie sélectionnée\" en région sélectionnée montre un fort intérêt médical avec une saturation faible."
        );

        // A known region keeps its label next to an unknown pathology
        let mut filters = FilterState::for_indication("foo");
        filters.set_region(Selection::from("bretagne"));
        assert!(priority_alert(data, &filters).contains("\"pathologie sélectionnée\" en Bretagne"));
    }
}
