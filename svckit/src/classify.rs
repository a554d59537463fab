// Tier classifiers shared by the overview, pathologies and signals pages.

use serde::{Deserialize, Serialize};

/// Display colour token; front ends map it to their own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Green => "green",
            Tone::Yellow => "yellow",
            Tone::Orange => "orange",
            Tone::Red => "red",
        }
    }
}

/// Priority of an indication, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityTier {
    #[serde(rename = "Modérée")]
    Moderate,
    #[serde(rename = "Haute")]
    High,
    #[serde(rename = "Très haute")]
    VeryHigh,
}

impl PriorityTier {
    pub const HIGH_THRESHOLD: i64 = 75;
    pub const VERY_HIGH_THRESHOLD: i64 = 85;

    /// Thresholds are inclusive on the higher tier.
    pub fn from_interest(interest: i64) -> Self {
        if interest >= Self::VERY_HIGH_THRESHOLD {
            PriorityTier::VeryHigh
        } else if interest >= Self::HIGH_THRESHOLD {
            PriorityTier::High
        } else {
            PriorityTier::Moderate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::Moderate => "Modérée",
            PriorityTier::High => "Haute",
            PriorityTier::VeryHigh => "Très haute",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            PriorityTier::Moderate => Tone::Yellow,
            PriorityTier::High => Tone::Orange,
            PriorityTier::VeryHigh => Tone::Red,
        }
    }
}

/// Perceived saturation, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SaturationTier {
    #[serde(rename = "Très Faible")]
    VeryLow,
    #[serde(rename = "Faible")]
    Low,
    #[serde(rename = "Modérée")]
    Moderate,
    #[serde(rename = "Élevée")]
    High,
}

impl SaturationTier {
    pub const ALL: [SaturationTier; 4] = [
        SaturationTier::VeryLow,
        SaturationTier::Low,
        SaturationTier::Moderate,
        SaturationTier::High,
    ];

    /// Upper bounds are inclusive on the lower tier: 10 is very low, 11 is low.
    /// Negative and NaN inputs land in the lowest tier.
    pub fn classify(value: f64) -> Self {
        if value.is_nan() || value <= 10.0 {
            SaturationTier::VeryLow
        } else if value <= 30.0 {
            SaturationTier::Low
        } else if value <= 50.0 {
            SaturationTier::Moderate
        } else {
            SaturationTier::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaturationTier::VeryLow => "Très Faible",
            SaturationTier::Low => "Faible",
            SaturationTier::Moderate => "Modérée",
            SaturationTier::High => "Élevée",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            SaturationTier::VeryLow => Tone::Green,
            SaturationTier::Low => Tone::Yellow,
            SaturationTier::Moderate => Tone::Orange,
            SaturationTier::High => Tone::Red,
        }
    }
}

/// Label of the competition KPI card, from the count of active competing trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompetitionLevel {
    #[serde(rename = "Faible")]
    Low,
    #[serde(rename = "Modéré")]
    Moderate,
    #[serde(rename = "Élevé")]
    High,
}

impl CompetitionLevel {
    pub fn from_count(count: i64) -> Self {
        match count {
            1 => CompetitionLevel::Low,
            n if n >= 4 => CompetitionLevel::High,
            _ => CompetitionLevel::Moderate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompetitionLevel::Low => "Faible",
            CompetitionLevel::Moderate => "Modéré",
            CompetitionLevel::High => "Élevé",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    /// Deltas within ±3 of the baseline read as flat.
    pub fn between(current: i64, baseline: i64) -> Self {
        let diff = current - baseline;
        if diff > 3 {
            TrendDirection::Up
        } else if diff < -3 {
            TrendDirection::Down
        } else {
            TrendDirection::Neutral
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Neutral => "→",
        }
    }
}

/// Territories with fewer eligible profiles than this are flagged red.
pub const LOW_PROFILE_THRESHOLD: u32 = 210;

pub fn territory_bar_tone(eligible_profiles: u32, base: Tone) -> Tone {
    if eligible_profiles < LOW_PROFILE_THRESHOLD {
        Tone::Red
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_boundaries() {
        assert_eq!(PriorityTier::from_interest(74), PriorityTier::Moderate);
        assert_eq!(PriorityTier::from_interest(75), PriorityTier::High);
        assert_eq!(PriorityTier::from_interest(84), PriorityTier::High);
        assert_eq!(PriorityTier::from_interest(85), PriorityTier::VeryHigh);
        assert_eq!(PriorityTier::from_interest(0), PriorityTier::Moderate);
        assert_eq!(PriorityTier::from_interest(120), PriorityTier::VeryHigh);
    }

    #[test]
    fn test_priority_is_monotonic() {
        let mut previous = PriorityTier::from_interest(0);
        for interest in 1..=110 {
            let tier = PriorityTier::from_interest(interest);
            assert!(tier >= previous, "tier dropped at {}", interest);
            previous = tier;
        }
    }

    #[test]
    fn test_saturation_boundaries() {
        let labels: Vec<&str> = [10.0, 11.0, 30.0, 31.0, 50.0, 51.0]
            .iter()
            .map(|v| SaturationTier::classify(*v).label())
            .collect();
        assert_eq!(
            labels,
            vec!["Très Faible", "Faible", "Faible", "Modérée", "Modérée", "Élevée"]
        );
    }

    #[test]
    fn test_saturation_fractional_and_degenerate_inputs() {
        assert_eq!(SaturationTier::classify(10.5), SaturationTier::Low);
        assert_eq!(SaturationTier::classify(0.0), SaturationTier::VeryLow);
        assert_eq!(SaturationTier::classify(-3.0), SaturationTier::VeryLow);
        assert_eq!(SaturationTier::classify(f64::NAN), SaturationTier::VeryLow);
        assert_eq!(SaturationTier::classify(1_000.0), SaturationTier::High);
    }

    #[test]
    fn test_tones() {
        assert_eq!(SaturationTier::VeryLow.tone(), Tone::Green);
        assert_eq!(SaturationTier::High.tone(), Tone::Red);
        assert_eq!(PriorityTier::VeryHigh.tone(), Tone::Red);
        assert_eq!(PriorityTier::Moderate.tone(), Tone::Yellow);
    }

    #[test]
    fn test_competition_level() {
        assert_eq!(CompetitionLevel::from_count(0), CompetitionLevel::Moderate);
        assert_eq!(CompetitionLevel::from_count(1), CompetitionLevel::Low);
        assert_eq!(CompetitionLevel::from_count(2), CompetitionLevel::Moderate);
        assert_eq!(CompetitionLevel::from_count(3), CompetitionLevel::Moderate);
        assert_eq!(CompetitionLevel::from_count(4), CompetitionLevel::High);
    }

    #[test]
    fn test_trend_direction() {
        assert_eq!(TrendDirection::between(82, 78), TrendDirection::Up);
        assert_eq!(TrendDirection::between(81, 78), TrendDirection::Neutral);
        assert_eq!(TrendDirection::between(75, 78), TrendDirection::Neutral);
        assert_eq!(TrendDirection::between(74, 78), TrendDirection::Down);
    }

    #[test]
    fn test_territory_bar_tone() {
        assert_eq!(territory_bar_tone(192, Tone::Orange), Tone::Red);
        assert_eq!(territory_bar_tone(210, Tone::Yellow), Tone::Yellow);
    }

    #[test]
    fn test_priority_serializes_as_label() {
        let json = serde_json::to_string(&PriorityTier::VeryHigh).unwrap();
        assert_eq!(json, "\"Très haute\"");
    }
}
