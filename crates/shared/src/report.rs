use crate::models::{RegionalDistribution, TopTreatment};
use crate::reference;

/// Shown wherever a treatment field is absent.
pub const NO_TREATMENT: &str = "None recorded";

/// Shown when the server reports nothing and supplies no message of its own.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No affected trees found in this area.";

/// Share of `count` in `total`, in percent. Zero when `total` is zero.
pub fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// One-decimal percentage label; a zero total renders as "0%".
pub fn format_percentage(count: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", percentage(count, total))
}

/// "1 affected tree", "0 affected trees", "7 affected trees".
pub fn affected_trees(count: u64) -> String {
    if count == 1 {
        "1 affected tree".to_string()
    } else {
        format!("{} affected trees", count)
    }
}

/// Treatment text with the placeholder for missing or blank values.
pub fn treatment_text(treatment: Option<&str>) -> &str {
    match treatment {
        Some(t) if !t.trim().is_empty() => t,
        _ => NO_TREATMENT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityLevel {
    High,
    Moderate,
    Low,
}

impl SeverityLevel {
    /// Rank 3 and up is high, 2 is moderate, anything else (or unknown) is low.
    pub fn from_rank(rank: Option<u8>) -> Self {
        match rank {
            Some(r) if r >= 3 => SeverityLevel::High,
            Some(r) if r >= 2 => SeverityLevel::Moderate,
            _ => SeverityLevel::Low,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            SeverityLevel::High => "red",
            SeverityLevel::Moderate => "orange",
            SeverityLevel::Low => "green",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            SeverityLevel::High => "severity-high",
            SeverityLevel::Moderate => "severity-moderate",
            SeverityLevel::Low => "severity-low",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub disease: String,
    pub count: u64,
    pub percentage: String,
    pub severity: Option<u8>,
    pub level: SeverityLevel,
}

impl SummaryRow {
    pub fn severity_label(&self) -> String {
        match self.severity {
            Some(rank) => rank.to_string(),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
    pub total: u64,
}

impl SummaryTable {
    /// The total row always reads 100.0%.
    pub fn total_percentage(&self) -> &'static str {
        "100.0%"
    }
}

/// Build the summary table, most affected disease first.
///
/// Callers pass the affected distribution (without `Healthy`). The sort is
/// stable, so equal counts keep the map's alphabetical order.
pub fn summary_table(distribution: &RegionalDistribution) -> SummaryTable {
    let total: u64 = distribution.values().sum();
    let mut entries: Vec<(&String, &u64)> = distribution.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1));

    let rows = entries
        .into_iter()
        .map(|(disease, &count)| {
            let severity = reference::severity_of(disease);
            SummaryRow {
                disease: disease.clone(),
                count,
                percentage: format_percentage(count, total),
                severity,
                level: SeverityLevel::from_rank(severity),
            }
        })
        .collect();

    SummaryTable { rows, total }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreatmentCard {
    pub rank: usize,
    pub disease: String,
    pub affected: String,
    pub organic: String,
    pub chemical: String,
}

/// One card per top treatment, in server rank order.
pub fn treatment_cards(treatments: &[TopTreatment]) -> Vec<TreatmentCard> {
    treatments
        .iter()
        .enumerate()
        .map(|(i, t)| TreatmentCard {
            rank: i + 1,
            disease: t.name.clone(),
            affected: affected_trees(t.count),
            organic: treatment_text(t.organic.as_deref()).to_string(),
            chemical: treatment_text(t.chemical.as_deref()).to_string(),
        })
        .collect()
}

/// Status line shown under the report once data is on screen.
pub fn report_status(diseases: usize, total: u64, latitude: f64, longitude: f64) -> String {
    let noun = if diseases == 1 { "disease" } else { "diseases" };
    format!(
        "{} {} across {} near ({}, {})",
        diseases,
        noun,
        affected_trees(total),
        latitude,
        longitude
    )
}
