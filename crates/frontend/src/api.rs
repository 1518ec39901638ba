use blightwatch_shared::location::{report_path, Coordinates};
use blightwatch_shared::models::{
    geotagged_farms, DiseaseCatalogEntry, Farm, FarmRecord, RegionalReport,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },

    #[error("unexpected response: {0}")]
    Parse(#[from] serde_json::Error),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

/// Pull a human-readable reason out of an error body, if it has one.
pub fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

pub fn farms_url(origin: &str) -> String {
    format!("{}/api/farms", origin)
}

pub fn diseases_url(origin: &str) -> String {
    format!("{}/api/diseases", origin)
}

/// Regional statistics endpoint for a location. `f64` display never needs escaping.
pub fn regional_stats_url(origin: &str, coordinates: Coordinates) -> String {
    format!(
        "{}/api/stats/regional?lat={}&lon={}",
        origin, coordinates.latitude, coordinates.longitude
    )
}

/// Build a shareable report URL from origin and location.
pub fn build_report_url(origin: &str, coordinates: Coordinates) -> String {
    format!("{}{}", origin, report_path(coordinates))
}

pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    tracing::debug!(url, "GET");
    let resp = reqwest::Client::new().get(url).send().await?;
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail: error_detail(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Saved farms that carry both coordinates.
pub async fn fetch_farms() -> Result<Vec<Farm>, ApiError> {
    let records: Vec<FarmRecord> = get_json(&farms_url(&page_origin())).await?;
    let fetched = records.len();
    let farms = geotagged_farms(records);
    tracing::info!(fetched, geotagged = farms.len(), "loaded farms");
    Ok(farms)
}

pub async fn fetch_disease_catalog() -> Result<Vec<DiseaseCatalogEntry>, ApiError> {
    let catalog: Vec<DiseaseCatalogEntry> = get_json(&diseases_url(&page_origin())).await?;
    tracing::info!(entries = catalog.len(), "loaded disease catalog");
    Ok(catalog)
}

pub async fn fetch_regional_report(coordinates: Coordinates) -> Result<RegionalReport, ApiError> {
    get_json(&regional_stats_url(&page_origin(), coordinates)).await
}
