//! Recruitment timing: where patients spend their time between first analysis
//! and trial enrolment, and which centres let trials slip.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyStage {
    Analysis,
    Diagnosis,
    TumourBoard,
    Enrolment,
}

impl JourneyStage {
    pub const ALL: [JourneyStage; 4] = [
        JourneyStage::Analysis,
        JourneyStage::Diagnosis,
        JourneyStage::TumourBoard,
        JourneyStage::Enrolment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JourneyStage::Analysis => "Analyse",
            JourneyStage::Diagnosis => "Diagnostic",
            JourneyStage::TumourBoard => "RCP",
            JourneyStage::Enrolment => "Inscription à l'essai",
        }
    }

    /// CSS-ish colour token used by both dashboards.
    pub fn color(&self) -> &'static str {
        match self {
            JourneyStage::Analysis => "blue",
            JourneyStage::Diagnosis => "orange",
            JourneyStage::TumourBoard => "light-blue",
            JourneyStage::Enrolment => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub stage: JourneyStage,
    /// Share of the bar, in percent.
    pub width: u32,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientJourney {
    pub id: &'static str,
    pub label: &'static str,
    pub segments: [Segment; 4],
}

impl PatientJourney {
    pub fn total_days(&self) -> u32 {
        self.segments.iter().map(|s| s.days).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissedTrials {
    pub id: &'static str,
    pub name: &'static str,
    pub count: u32,
    pub month: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecruitmentTiming {
    pub journeys: Vec<PatientJourney>,
    pub missed_trials: Vec<MissedTrials>,
}

// (id, label, [(width, days); 4]) in stage order
const JOURNEY_TABLE: [(&str, &str, [(u32, u32); 4]); 9] = [
    ("lymphome", "Lymphome", [(20, 12), (30, 18), (25, 15), (25, 15)]),
    ("cancer-prostate", "Cancer de la Prostate", [(25, 15), (35, 21), (20, 12), (20, 12)]),
    ("myelome", "Myélome Multiple", [(15, 9), (40, 24), (30, 18), (15, 9)]),
    ("leucemie", "Leucémie", [(30, 18), (25, 15), (25, 15), (20, 12)]),
    ("cancer-poumon", "Cancer du Poumon", [(18, 11), (32, 19), (28, 17), (22, 13)]),
    ("tumeur-solide-rare", "Tumeur solide rare", [(22, 13), (28, 17), (30, 18), (20, 12)]),
    ("sarcome", "Sarcome", [(20, 12), (30, 18), (28, 17), (22, 13)]),
    ("cancer-sein", "Cancer du Sein", [(25, 15), (30, 18), (25, 15), (20, 12)]),
    ("cancer-colorectal", "Cancer Colorectal", [(20, 12), (35, 21), (25, 15), (20, 12)]),
];

const MISSED_TRIALS: [MissedTrials; 4] = [
    MissedTrials { id: "chu-lille", name: "CHU Lille", count: 2, month: "Décembre" },
    MissedTrials { id: "chu-strasbourg", name: "CHU Strasbourg", count: 2, month: "Décembre" },
    MissedTrials { id: "hcl-lyon", name: "Hospices Civils de Lyon", count: 1, month: "Novembre" },
    MissedTrials { id: "iuct-oncopole", name: "IUCT-Oncopole", count: 1, month: "Novembre" },
];

pub fn patient_journeys() -> Vec<PatientJourney> {
    JOURNEY_TABLE
        .iter()
        .map(|&(id, label, stages)| PatientJourney {
            id,
            label,
            segments: std::array::from_fn(|i| Segment {
                stage: JourneyStage::ALL[i],
                width: stages[i].0,
                days: stages[i].1,
            }),
        })
        .collect()
}

pub fn recruitment_timing() -> RecruitmentTiming {
    RecruitmentTiming {
        journeys: patient_journeys(),
        missed_trials: MISSED_TRIALS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_widths_sum_to_100() {
        for journey in patient_journeys() {
            let total: u32 = journey.segments.iter().map(|s| s.width).sum();
            assert_eq!(total, 100, "{} widths sum to {}", journey.id, total);
        }
    }

    #[test]
    fn test_segments_follow_stage_order() {
        let journeys = patient_journeys();
        assert_eq!(journeys.len(), 9);
        for journey in &journeys {
            let stages: Vec<JourneyStage> = journey.segments.iter().map(|s| s.stage).collect();
            assert_eq!(stages, JourneyStage::ALL.to_vec());
        }
        assert_eq!(journeys[0].total_days(), 60);
    }

    #[test]
    fn test_missed_trials() {
        let timing = recruitment_timing();
        assert_eq!(timing.missed_trials.len(), 4);
        let total: u32 = timing.missed_trials.iter().map(|m| m.count).sum();
        assert_eq!(total, 6);
    }
}
