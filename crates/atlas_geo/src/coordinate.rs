use std::fmt;

use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
///
/// Both axes are always present and always within range: latitude in
/// `[-90, 90]`, longitude in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !in_range(latitude, Self::LATITUDE_RANGE) {
            return Err(CoordinateError::Latitude(latitude));
        }

        if !in_range(longitude, Self::LONGITUDE_RANGE) {
            return Err(CoordinateError::Longitude(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

// NaN fails both comparisons, so non-finite values are rejected too.
fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    value >= min && value <= max
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A geocoder's answer for a single query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,

    /// Human-readable label, when the provider supplied one.
    pub display_name: Option<String>,
}

impl ResolvedLocation {
    #[must_use]
    pub fn new(coordinate: Coordinate, display_name: Option<String>) -> Self {
        Self {
            coordinate,
            display_name,
        }
    }
}

/// A rectangle used to bias geocoding results towards an area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl BoundingBox {
    /// Greater Tehran.
    pub const TEHRAN: Self = Self {
        south_west: Coordinate {
            latitude: 35.5,
            longitude: 51.2,
        },
        north_east: Coordinate {
            latitude: 35.8,
            longitude: 51.6,
        },
    };
}

#[cfg(test)]
#[path = "coordinate_tests.rs"]
mod tests;
