//! Reference tables: pathologies, regions, their display labels and the static
//! scores the overview derivation starts from.
//!
//! The built-in tables are process-wide and immutable; [`ReferenceData::global`]
//! hands out a shared `'static` reference. Services may instead load a YAML
//! file once at start-up (see [`ReferenceData::load`]) and share it behind an
//! `Arc`.

use std::collections::{BTreeMap, HashSet};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::errors::{InsightError, Result};
use crate::types::{PathologyMetric, Period, RegionModifier, Selection, ALL_KEY};

pub const ALL_PATHOLOGIES_LABEL: &str = "Toutes les pathologies";
pub const ALL_REGIONS_LABEL: &str = "Toutes les régions";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pathology {
    pub key: String,
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodOption {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub pathologies: Vec<Pathology>,
    pub regions: Vec<Region>,
    pub metrics: BTreeMap<String, PathologyMetric>,
    pub modifiers: BTreeMap<String, RegionModifier>,
}

lazy_static! {
    static ref BUILTIN: ReferenceData = ReferenceData::builtin();
}

const PATHOLOGY_TABLE: [(&str, &str, &str); 14] = [
    ("cancer-sein", "Cancer du sein", "hsl(195 66% 54%)"),
    ("cancer-poumon", "Cancer du poumon", "hsl(142 76% 46%)"),
    ("cancer-prostate", "Cancer de la prostate", "hsl(30 100% 55%)"),
    ("cancer-colon", "Cancer du colon", "hsl(45 100% 60%)"),
    ("cancer-rectum", "Cancer du rectum", "hsl(280 65% 55%)"),
    ("cancer-anus", "Cancer de l'anus", "hsl(0 84% 60%)"),
    ("cancer-rein", "Cancer du rein", "hsl(200 70% 50%)"),
    ("cancer-pancreas", "Cancer du pancréas", "hsl(15 90% 50%)"),
    ("cancer-foie", "Cancer du foie et des voies biliaires", "hsl(160 70% 45%)"),
    ("cancer-vessie", "Cancer de la vessie / VES / urètre", "hsl(320 60% 55%)"),
    ("cancer-estomac", "Cancer de l'estomac et de l'oesophage", "hsl(220 65% 50%)"),
    ("cancer-endometre", "Cancer de l'endomètre", "hsl(60 80% 55%)"),
    ("lymphome", "Lymphome", "hsl(180 60% 50%)"),
    ("llc-richter", "LLC & syndrome de Richter", "hsl(340 70% 55%)"),
];

const REGION_TABLE: [(&str, &str); 13] = [
    ("auvergne-rhone-alpes", "Auvergne-Rhône-Alpes"),
    ("bourgogne-franche-comte", "Bourgogne-Franche-Comté"),
    ("bretagne", "Bretagne"),
    ("centre-val-de-loire", "Centre-Val de Loire"),
    ("corse", "Corse"),
    ("grand-est", "Grand Est"),
    ("hauts-de-france", "Hauts-de-France"),
    ("ile-de-france", "Île-de-France"),
    ("normandie", "Normandie"),
    ("nouvelle-aquitaine", "Nouvelle-Aquitaine"),
    ("occitanie", "Occitanie"),
    ("pays-de-la-loire", "Pays de la Loire"),
    ("provence-alpes-cote-azur", "Provence-Alpes-Côte d'Azur"),
];

// (key, interest, potential, competition, feasibility)
const METRIC_TABLE: [(&str, i64, i64, i64, i64); 14] = [
    ("cancer-sein", 92, 1250, 3, 88),
    ("cancer-poumon", 88, 980, 4, 85),
    ("cancer-prostate", 85, 750, 2, 82),
    ("cancer-colon", 79, 580, 3, 78),
    ("cancer-rectum", 76, 450, 2, 75),
    ("cancer-anus", 72, 380, 1, 72),
    ("cancer-rein", 73, 420, 2, 74),
    ("cancer-pancreas", 76, 450, 3, 75),
    ("cancer-foie", 74, 400, 2, 73),
    ("cancer-vessie", 77, 520, 2, 76),
    ("cancer-estomac", 75, 480, 3, 74),
    ("cancer-endometre", 78, 550, 2, 77),
    ("lymphome", 82, 620, 3, 80),
    ("llc-richter", 70, 380, 2, 69),
];

const MODIFIER_TABLE: [(&str, f64, f64); 13] = [
    ("ile-de-france", 1.15, 1.3),
    ("auvergne-rhone-alpes", 1.1, 1.2),
    ("provence-alpes-cote-azur", 1.08, 1.15),
    ("nouvelle-aquitaine", 1.05, 1.1),
    ("occitanie", 1.05, 1.1),
    ("hauts-de-france", 1.03, 1.05),
    ("grand-est", 1.02, 1.05),
    ("normandie", 1.0, 1.0),
    ("bretagne", 0.98, 0.95),
    ("pays-de-la-loire", 0.97, 0.95),
    ("centre-val-de-loire", 0.95, 0.9),
    ("bourgogne-franche-comte", 0.95, 0.9),
    ("corse", 0.9, 0.8),
];

impl ReferenceData {
    pub fn builtin() -> Self {
        Self {
            pathologies: PATHOLOGY_TABLE
                .iter()
                .map(|(key, label, color)| Pathology {
                    key: key.to_string(),
                    label: label.to_string(),
                    color: color.to_string(),
                })
                .collect(),
            regions: REGION_TABLE
                .iter()
                .map(|(key, label)| Region {
                    key: key.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            metrics: METRIC_TABLE
                .iter()
                .map(|(key, interest, potential, competition, feasibility)| {
                    (
                        key.to_string(),
                        PathologyMetric {
                            interest: *interest,
                            potential: *potential,
                            competition: *competition,
                            feasibility: *feasibility,
                        },
                    )
                })
                .collect(),
            modifiers: MODIFIER_TABLE
                .iter()
                .map(|(key, interest, potential)| {
                    (
                        key.to_string(),
                        RegionModifier {
                            interest: *interest,
                            potential: *potential,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Shared built-in tables.
    pub fn global() -> &'static ReferenceData {
        &BUILTIN
    }

    /// Load tables from a YAML file and validate them.
    #[cfg(feature = "server")]
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;
        let data: ReferenceData = settings.try_deserialize()?;
        data.validate()?;

        tracing::info!(
            "Loaded reference data from {}: {} pathologies, {} regions",
            path,
            data.pathologies.len(),
            data.regions.len()
        );
        Ok(data)
    }

    /// Reject tables the derivation cannot rely on.
    pub fn validate(&self) -> Result<()> {
        if self.pathologies.is_empty() {
            return Err(InsightError::ValidationError("no pathologies defined".into()));
        }
        if self.regions.is_empty() {
            return Err(InsightError::ValidationError("no regions defined".into()));
        }

        let pathology_keys = unique_keys("pathology", self.pathologies.iter().map(|p| p.key.as_str()))?;
        let region_keys = unique_keys("region", self.regions.iter().map(|r| r.key.as_str()))?;

        for key in self.metrics.keys() {
            if !pathology_keys.contains(key.as_str()) {
                return Err(InsightError::ValidationError(format!(
                    "metric defined for unknown pathology '{}'",
                    key
                )));
            }
        }
        for (key, modifier) in &self.modifiers {
            if !region_keys.contains(key.as_str()) {
                return Err(InsightError::ValidationError(format!(
                    "modifier defined for unknown region '{}'",
                    key
                )));
            }
            if !(modifier.interest > 0.0 && modifier.potential > 0.0) {
                return Err(InsightError::ValidationError(format!(
                    "modifier for '{}' must be positive",
                    key
                )));
            }
        }

        for pathology in &self.pathologies {
            if !self.metrics.contains_key(&pathology.key) {
                tracing::warn!("Pathology '{}' has no metric, defaults will be used", pathology.key);
            }
        }
        Ok(())
    }

    pub fn pathology(&self, key: &str) -> Option<&Pathology> {
        self.pathologies.iter().find(|p| p.key == key)
    }

    pub fn region(&self, key: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.key == key)
    }

    pub fn metric(&self, key: &str) -> Option<PathologyMetric> {
        self.metrics.get(key).copied()
    }

    /// Factors for a region selection; `All` and unknown keys scale by 1.
    pub fn modifier_for(&self, region: &Selection) -> RegionModifier {
        match region.key() {
            None => RegionModifier::IDENTITY,
            Some(key) => self.modifiers.get(key).copied().unwrap_or_else(|| {
                tracing::warn!("No modifier for region '{}', using identity", key);
                RegionModifier::IDENTITY
            }),
        }
    }

    pub fn indication_label(&self, selection: &Selection) -> String {
        match selection.key() {
            None => ALL_PATHOLOGIES_LABEL.to_string(),
            Some(key) => self
                .pathology(key)
                .map(|p| p.label.clone())
                .unwrap_or_else(|| key.to_string()),
        }
    }

    pub fn region_label(&self, selection: &Selection) -> String {
        selection
            .key()
            .and_then(|key| self.region(key))
            .map(|r| r.label.clone())
            .unwrap_or_else(|| ALL_REGIONS_LABEL.to_string())
    }

    /// Options of the indication selector, `all` first.
    pub fn indication_options(&self) -> Vec<(String, String)> {
        std::iter::once((ALL_KEY.to_string(), ALL_PATHOLOGIES_LABEL.to_string()))
            .chain(self.pathologies.iter().map(|p| (p.key.clone(), p.label.clone())))
            .collect()
    }

    /// Options of the region selector, `all` first.
    pub fn region_options(&self) -> Vec<(String, String)> {
        std::iter::once((ALL_KEY.to_string(), ALL_REGIONS_LABEL.to_string()))
            .chain(self.regions.iter().map(|r| (r.key.clone(), r.label.clone())))
            .collect()
    }

    pub fn period_options() -> Vec<PeriodOption> {
        Period::ALL
            .iter()
            .map(|p| PeriodOption {
                key: p.as_key(),
                label: p.label(),
            })
            .collect()
    }

    /// Step through `options` from `current`, wrapping around; used by the
    /// keyboard-driven terminal filters.
    pub fn cycle(options: &[(String, String)], current: &Selection, forward: bool) -> Selection {
        if options.is_empty() {
            return Selection::All;
        }
        let idx = options
            .iter()
            .position(|(key, _)| key == current.as_str())
            .unwrap_or(0);
        let len = options.len();
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Selection::from(options[next].0.as_str())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

fn unique_keys<'a>(kind: &str, keys: impl Iterator<Item = &'a str>) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for key in keys {
        if key == ALL_KEY {
            return Err(InsightError::ValidationError(format!(
                "'{}' is reserved and cannot be a {} key",
                ALL_KEY, kind
            )));
        }
        if !seen.insert(key) {
            return Err(InsightError::ValidationError(format!(
                "duplicate {} key '{}'",
                kind, key
            )));
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_complete() {
        let data = ReferenceData::global();
        assert_eq!(data.pathologies.len(), 14);
        assert_eq!(data.regions.len(), 13);
        assert!(data.validate().is_ok());

        for pathology in &data.pathologies {
            assert!(data.metric(&pathology.key).is_some(), "{} has no metric", pathology.key);
        }
        for region in &data.regions {
            assert!(data.modifiers.contains_key(&region.key), "{} has no modifier", region.key);
        }
    }

    #[test]
    fn test_labels_and_fallbacks() {
        let data = ReferenceData::global();
        assert_eq!(data.indication_label(&Selection::All), "Toutes les pathologies");
        assert_eq!(data.indication_label(&Selection::from("lymphome")), "Lymphome");
        assert_eq!(data.region_label(&Selection::from("corse")), "Corse");
        assert_eq!(data.region_label(&Selection::from("atlantis")), "Toutes les régions");

        let identity = data.modifier_for(&Selection::from("atlantis"));
        assert_eq!(identity, RegionModifier::IDENTITY);
    }

    #[test]
    fn test_options_start_with_all() {
        let data = ReferenceData::global();
        let options = data.indication_options();
        assert_eq!(options.len(), 15);
        assert_eq!(options[0].0, "all");

        let regions = data.region_options();
        assert_eq!(regions.len(), 14);
        assert_eq!(regions[0].1, "Toutes les régions");
    }

    #[test]
    fn test_cycle_wraps() {
        let data = ReferenceData::global();
        let options = data.region_options();

        let first = ReferenceData::cycle(&options, &Selection::All, true);
        assert_eq!(first, Selection::from("auvergne-rhone-alpes"));

        let last = ReferenceData::cycle(&options, &Selection::All, false);
        assert_eq!(last, Selection::from("provence-alpes-cote-azur"));

        let back = ReferenceData::cycle(&options, &last, true);
        assert_eq!(back, Selection::All);
    }

    #[test]
    fn test_validate_rejects_reserved_and_duplicate_keys() {
        let mut data = ReferenceData::builtin();
        data.regions.push(Region {
            key: "all".into(),
            label: "Partout".into(),
        });
        assert!(matches!(data.validate(), Err(InsightError::ValidationError(_))));

        let mut data = ReferenceData::builtin();
        let duplicate = data.pathologies[0].clone();
        data.pathologies.push(duplicate);
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_orphan_entries() {
        let mut data = ReferenceData::builtin();
        data.modifiers.insert("atlantis".into(), RegionModifier::IDENTITY);
        assert!(data.validate().is_err());

        let mut data = ReferenceData::builtin();
        data.modifiers.insert(
            "corse".into(),
            RegionModifier {
                interest: 0.0,
                potential: 1.0,
            },
        );
        assert!(data.validate().is_err());
    }

    #[cfg(feature = "server")]
    #[test]
    fn test_load_yaml() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            r#"
pathologies:
  - key: cancer-sein
    label: Cancer du sein
    color: "hsl(195 66% 54%)"
regions:
  - key: corse
    label: Corse
metrics:
  cancer-sein: {{ interest: 92, potential: 1250, competition: 3, feasibility: 88 }}
modifiers:
  corse: {{ interest: 0.9, potential: 0.8 }}
"#
        )
        .unwrap();

        let data = ReferenceData::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(data.pathologies.len(), 1);
        assert_eq!(data.metric("cancer-sein").unwrap().interest, 92);
        assert_eq!(data.modifier_for(&Selection::from("corse")).potential, 0.8);
    }
}
