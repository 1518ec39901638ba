use thiserror::Error;

use crate::models::Farm;

/// Decimal places written into the fields for a device fix.
pub const DEVICE_FIX_PRECISION: usize = 8;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Please enter a latitude or pick a location first.")]
    MissingLatitude,
    #[error("Please enter a longitude or pick a location first.")]
    MissingLongitude,
    #[error("'{0}' is not a valid coordinate.")]
    InvalidNumber(String),
    #[error("{axis} {value} is outside the valid range of -{limit} to {limit}.")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        limit: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

fn parse_axis(
    raw: &str,
    axis: &'static str,
    limit: f64,
    missing: CoordinateError,
) -> Result<f64, CoordinateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(missing);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| CoordinateError::InvalidNumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(CoordinateError::InvalidNumber(raw.to_string()));
    }
    if value.abs() > limit {
        return Err(CoordinateError::OutOfRange { axis, value, limit });
    }
    Ok(value)
}

impl Coordinates {
    /// Validate the two text fields. Both are required.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        let latitude = parse_axis(latitude, "Latitude", 90.0, CoordinateError::MissingLatitude)?;
        let longitude =
            parse_axis(longitude, "Longitude", 180.0, CoordinateError::MissingLongitude)?;
        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

/// Where the current field values came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    Manual,
    SavedFarm(String),
    Device,
}

/// The two coordinate fields. They always reflect exactly one source.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFields {
    pub latitude: String,
    pub longitude: String,
    pub source: LocationSource,
}

impl Default for LocationFields {
    fn default() -> Self {
        LocationFields {
            latitude: String::new(),
            longitude: String::new(),
            source: LocationSource::Manual,
        }
    }
}

impl LocationFields {
    /// Overwrite both fields from a saved farm.
    pub fn select_farm(&mut self, farm: &Farm) {
        self.latitude = farm.latitude.to_string();
        self.longitude = farm.longitude.to_string();
        self.source = LocationSource::SavedFarm(farm.name.clone());
    }

    /// Overwrite both fields from a device fix, rounded to eight decimals.
    pub fn apply_device_fix(&mut self, latitude: f64, longitude: f64) {
        self.latitude = format!("{:.*}", DEVICE_FIX_PRECISION, latitude);
        self.longitude = format!("{:.*}", DEVICE_FIX_PRECISION, longitude);
        self.source = LocationSource::Device;
    }

    pub fn edit_latitude(&mut self, value: String) {
        self.detach_from_farm();
        self.latitude = value;
    }

    pub fn edit_longitude(&mut self, value: String) {
        self.detach_from_farm();
        self.longitude = value;
    }

    /// Back to an empty manual entry, e.g. when the farm dropdown is reset.
    pub fn clear(&mut self) {
        *self = LocationFields::default();
    }

    /// Name of the farm the fields were filled from, if any.
    pub fn selected_farm(&self) -> Option<&str> {
        match &self.source {
            LocationSource::SavedFarm(name) => Some(name),
            _ => None,
        }
    }

    pub fn coordinates(&self) -> Result<Coordinates, CoordinateError> {
        Coordinates::parse(&self.latitude, &self.longitude)
    }

    // A hand edit of a farm's values means the values are no longer that farm's.
    fn detach_from_farm(&mut self) {
        self.source = LocationSource::Manual;
    }
}

/// Path of the shareable report page for a location.
pub fn report_path(coordinates: Coordinates) -> String {
    format!("/report/{}/{}", coordinates.latitude, coordinates.longitude)
}
