use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the sentinel record that is never shown as an affected disease.
pub const HEALTHY: &str = "Healthy";

/// A saved location as returned by the farms API. Coordinates may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmRecord {
    pub name: String,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
}

/// A saved location that carries both coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl FarmRecord {
    /// Both coordinates or nothing; a half-tagged record is not a location.
    pub fn geotagged(self) -> Option<Farm> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Farm {
                name: self.name,
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// Keep only the farms that can be used as a report location.
pub fn geotagged_farms(records: Vec<FarmRecord>) -> Vec<Farm> {
    records.into_iter().filter_map(FarmRecord::geotagged).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseCatalogEntry {
    pub name: String,
    #[serde(default, alias = "organic_treatment")]
    pub organic_treatment: Option<String>,
    #[serde(default, alias = "chemical_treatment")]
    pub chemical_treatment: Option<String>,
}

impl DiseaseCatalogEntry {
    pub fn is_healthy(&self) -> bool {
        self.name == HEALTHY
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTreatment {
    pub name: String,
    pub count: u64,
    #[serde(default)]
    pub organic: Option<String>,
    #[serde(default)]
    pub chemical: Option<String>,
}

/// Disease name to affected-tree count.
pub type RegionalDistribution = BTreeMap<String, u64>;

/// Response of the regional statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalReport {
    #[serde(default)]
    pub distribution: RegionalDistribution,
    #[serde(default, alias = "top_treatments")]
    pub top_treatments: Vec<TopTreatment>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RegionalReport {
    /// The distribution without the `Healthy` sentinel.
    pub fn affected(&self) -> RegionalDistribution {
        self.distribution
            .iter()
            .filter(|(name, _)| name.as_str() != HEALTHY)
            .map(|(name, count)| (name.clone(), *count))
            .collect()
    }

    pub fn affected_total(&self) -> u64 {
        self.affected().values().sum()
    }

    /// Nothing to chart: no diseases, or every count is zero.
    pub fn is_empty(&self) -> bool {
        self.affected_total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farm_with_both_coordinates_is_kept() {
        let farms = geotagged_farms(vec![FarmRecord {
            name: "North Block".to_string(),
            latitude: Some(12.34),
            longitude: Some(56.78),
        }]);
        assert_eq!(farms.len(), 1);
        assert_eq!(farms[0].latitude, 12.34);
        assert_eq!(farms[0].longitude, 56.78);
    }

    #[test]
    fn test_farm_missing_a_coordinate_is_dropped() {
        let farms = geotagged_farms(vec![
            FarmRecord {
                name: "No Lat".to_string(),
                latitude: None,
                longitude: Some(1.0),
            },
            FarmRecord {
                name: "No Lon".to_string(),
                latitude: Some(1.0),
                longitude: None,
            },
            FarmRecord {
                name: "Untagged".to_string(),
                latitude: None,
                longitude: None,
            },
        ]);
        assert!(farms.is_empty());
    }

    #[test]
    fn test_farm_record_accepts_short_keys() {
        let json = r#"{"name":"Hill","lat":-1.5,"lon":36.8}"#;
        let record: FarmRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.latitude, Some(-1.5));
        assert_eq!(record.longitude, Some(36.8));
    }

    #[test]
    fn test_catalog_entry_accepts_both_casings() {
        let camel = r#"{"name":"Black Rot","organicTreatment":"Prune cankers","chemicalTreatment":null}"#;
        let snake = r#"{"name":"Black Rot","organic_treatment":"Prune cankers"}"#;
        let a: DiseaseCatalogEntry = serde_json::from_str(camel).unwrap();
        let b: DiseaseCatalogEntry = serde_json::from_str(snake).unwrap();
        assert_eq!(a, b);
        assert!(a.chemical_treatment.is_none());
    }

    #[test]
    fn test_report_defaults_missing_parts_to_empty() {
        let report: RegionalReport = serde_json::from_str("{}").unwrap();
        assert!(report.distribution.is_empty());
        assert!(report.top_treatments.is_empty());
        assert!(report.message.is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn test_affected_excludes_healthy() {
        let json = r#"{"distribution":{"Healthy":40,"Black Rot":3,"Apple Scab":2}}"#;
        let report: RegionalReport = serde_json::from_str(json).unwrap();
        let affected = report.affected();
        assert!(!affected.contains_key(HEALTHY));
        assert_eq!(report.affected_total(), 5);
    }

    #[test]
    fn test_only_healthy_trees_is_empty() {
        let json = r#"{"distribution":{"Healthy":12},"message":"All clear"}"#;
        let report: RegionalReport = serde_json::from_str(json).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.message.as_deref(), Some("All clear"));
    }

    #[test]
    fn test_all_zero_counts_is_empty() {
        let json = r#"{"distribution":{"Black Rot":0,"Fire Blight":0}}"#;
        let report: RegionalReport = serde_json::from_str(json).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_top_treatments_keep_server_order() {
        let json = r#"{"topTreatments":[{"name":"Fire Blight","count":9},{"name":"Apple Scab","count":11,"organic":"Sulfur spray"}]}"#;
        let report: RegionalReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.top_treatments[0].name, "Fire Blight");
        assert_eq!(report.top_treatments[1].organic.as_deref(), Some("Sulfur spray"));
    }
}
