//! High-potential centres and the key indicators of the selected one.

use serde::Serialize;

use crate::errors::{InsightError, Result};

pub const DEFAULT_CENTRE: &str = "chu-lille";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Centre {
    pub id: &'static str,
    pub name: &'static str,
    pub indications: u32,
    /// Tumour board meetings held over the period.
    pub rcps: u32,
}

pub const CENTRES: [Centre; 5] = [
    Centre { id: "chu-lille", name: "CHU Lille", indications: 7, rcps: 61 },
    Centre { id: "chu-toulouse", name: "CHU Toulouse", indications: 5, rcps: 52 },
    Centre { id: "hopital-bichat", name: "Hôpital Bichat", indications: 4, rcps: 44 },
    Centre { id: "chu-nantes", name: "CHU Nantes", indications: 5, rcps: 38 },
    Centre { id: "chu-bordeaux", name: "CHU Bordeaux", indications: 5, rcps: 31 },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub label: &'static str,
    pub tooltip: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CentreActivity {
    pub centres: Vec<Centre>,
    pub selected: Centre,
    pub indicators: Vec<Indicator>,
}

pub fn find_centre(id: &str) -> Option<Centre> {
    CENTRES.iter().copied().find(|c| c.id == id)
}

pub fn key_indicators(centre: &Centre) -> Vec<Indicator> {
    vec![
        Indicator {
            label: "Taux d'utilisation AccessTrial",
            tooltip: "Pourcentage des essais cliniques utilisant la fonctionnalité de pré-screening AccessTrial",
            value: "67% des essais avec pré-screening réalisé".to_string(),
        },
        Indicator {
            label: "Évolution activité essais",
            tooltip: "Variation du nombre d'essais cliniques actifs par rapport à la période précédente",
            value: "+23% vs période précédente".to_string(),
        },
        Indicator {
            label: "Diversité des indications",
            tooltip: "Nombre de pathologies différentes couvertes par les essais du centre",
            value: format!("{} indications couvertes", centre.indications),
        },
        Indicator {
            label: "Accès aux essais ouverts",
            tooltip: "Pourcentage des essais cliniques actuellement ouverts et accessibles",
            value: "80% des essais disponibles actuellement".to_string(),
        },
    ]
}

/// Centre list (most RCPs first) with the indicators of `selected`.
pub fn centre_activity(selected: Option<&str>) -> Result<CentreActivity> {
    let id = selected.unwrap_or(DEFAULT_CENTRE);
    let centre = find_centre(id)
        .ok_or_else(|| InsightError::ValidationError(format!("unknown centre '{}'", id)))?;

    let mut centres = CENTRES.to_vec();
    centres.sort_by(|a, b| b.rcps.cmp(&a.rcps));

    Ok(CentreActivity {
        centres,
        selected: centre,
        indicators: key_indicators(&centre),
    })
}
