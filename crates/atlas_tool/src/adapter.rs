//! The tools offered to the orchestrator.
//!
//! Every adapter follows the same shape: validated input, then the shared
//! location resolver, then an optional downstream fetch, then exactly one
//! result.

mod address;
mod map;
mod reverse;
mod weather;

use atlas_geo::{Coordinate, ResolveError};

pub use address::{AddressInput, AddressPoint, AddressToPoint};
pub use map::{GetMap, MapInput, MapView};
pub use reverse::{ReverseGeocode, ReverseInput, ReversePlace};
pub use weather::{GetWeather, WeatherInput};

use crate::ToolError;

/// A latitude/longitude pair in the shape tools return it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Coordinate> for Point {
    fn from(coordinate: Coordinate) -> Self {
        Self {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
        }
    }
}

fn check_range(field: &str, value: Option<f64>, (min, max): (f64, f64)) -> Result<(), String> {
    match value {
        Some(v) if !(min..=max).contains(&v) => {
            Err(format!("{field} must be between {min} and {max}, got {v}"))
        }
        _ => Ok(()),
    }
}

fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), String> {
    check_range("latitude", latitude, Coordinate::LATITUDE_RANGE)?;
    check_range("longitude", longitude, Coordinate::LONGITUDE_RANGE)
}

/// Turn a resolver failure into the tool's outward error.
///
/// `subject` names what the tool wanted (e.g. "city name"), `not_found`
/// words the message for a query the geocoder could not place.
fn resolve_failure(
    tool: &str,
    subject: &'static str,
    error: ResolveError,
    not_found: impl FnOnce(&str) -> String,
) -> ToolError {
    match error {
        ResolveError::MissingInput => ToolError::MissingInput { subject },
        ResolveError::GeocodingFailed { query } => ToolError::GeocodingFailed {
            message: not_found(&query),
            query,
        },
        ResolveError::InvalidCoordinate(error) => ToolError::invalid_input(tool, error),
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
