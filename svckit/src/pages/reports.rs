use serde::Serialize;

use crate::presentation::format_thousands;

pub const SNAPSHOT_TITLE: &str = "Avril 2024";
pub const SNAPSHOT_UPDATED: &str = "Mis à jour il y a 3 jours";

pub const SERIES_COLORS: [&str; 4] = [
    "hsl(195 66% 54%)",
    "hsl(142 76% 46%)",
    "hsl(30 100% 55%)",
    "hsl(0 84% 60%)",
];

const SNAPSHOT_TABLE: [(&str, [f64; 4]); 19] = [
    ("oct. 2022", [10.0, 5.5, 4.0, 2.5]),
    ("nov. 2022", [10.5, 6.0, 4.1, 2.6]),
    ("déc. 2022", [11.0, 6.5, 4.5, 2.8]),
    ("jan. 2023", [11.5, 7.0, 5.0, 3.0]),
    ("fév. 2023", [12.0, 7.5, 5.5, 3.5]),
    ("mars 2023", [12.5, 8.0, 6.0, 4.0]),
    ("avr. 2023", [13.0, 8.5, 6.5, 4.5]),
    ("mai 2023", [13.5, 9.0, 7.0, 5.0]),
    ("jun. 2023", [14.0, 9.5, 7.5, 5.2]),
    ("jul. 2023", [14.5, 10.0, 8.0, 5.5]),
    ("août 2023", [15.0, 10.5, 8.5, 5.8]),
    ("sep. 2023", [15.2, 11.0, 8.2, 5.5]),
    ("oct. 2023", [15.5, 11.2, 7.8, 5.2]),
    ("nov. 2023", [15.8, 11.5, 7.5, 5.0]),
    ("déc. 2023", [16.0, 11.8, 7.2, 4.8]),
    ("jan. 2024", [16.5, 12.0, 7.0, 4.5]),
    ("fév. 2024", [16.8, 12.2, 6.8, 4.3]),
    ("mars 2024", [17.0, 12.5, 6.5, 4.2]),
    ("avr. 2024", [17.2, 12.8, 6.2, 4.0]),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotPoint {
    pub month: &'static str,
    pub values: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategicOverview {
    pub pathology: &'static str,
    pub quarter: &'static str,
    pub monthly_patients: String,
    pub market_share: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportSnapshot {
    pub title: &'static str,
    pub updated: &'static str,
    pub series_colors: [&'static str; 4],
    pub points: Vec<SnapshotPoint>,
    pub overview: StrategicOverview,
}

pub fn report_snapshot() -> ReportSnapshot {
    ReportSnapshot {
        title: SNAPSHOT_TITLE,
        updated: SNAPSHOT_UPDATED,
        series_colors: SERIES_COLORS,
        points: SNAPSHOT_TABLE
            .iter()
            .map(|&(month, values)| SnapshotPoint { month, values })
            .collect(),
        overview: StrategicOverview {
            pathology: "Cancer du Poumon",
            quarter: "Q3 2024",
            monthly_patients: format!("{}/mois", format_thousands(2450)),
            market_share: "63%".to_string(),
        },
    }
}
