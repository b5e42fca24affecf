use std::sync::Arc;

use async_trait::async_trait;
use atlas_geo::{Coordinate, ReverseGeocoder};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::check_coordinates;
use crate::{Tool, ToolError, Validate};

const NAME: &str = "reverseGeocode";

/// Coordinates to the nearest human-readable address.
pub struct ReverseGeocode {
    geocoder: Arc<dyn ReverseGeocoder>,
}

impl ReverseGeocode {
    #[must_use]
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>) -> Self {
        Self { geocoder }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct ReverseInput {
    /// Latitude coordinate (range: -90 to 90).
    #[schemars(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    /// Longitude coordinate (range: -180 to 180).
    #[schemars(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl Validate for ReverseInput {
    fn validate(&self) -> Result<(), String> {
        check_coordinates(Some(self.latitude), Some(self.longitude))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReversePlace {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

#[async_trait]
impl Tool for ReverseGeocode {
    type Input = ReverseInput;
    type Output = ReversePlace;

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Find the address of a pair of geographic coordinates."
    }

    async fn execute(&self, input: ReverseInput) -> Result<ReversePlace, ToolError> {
        let coordinate = Coordinate::new(input.latitude, input.longitude)
            .map_err(|error| ToolError::invalid_input(NAME, error))?;

        let not_found = || ToolError::GeocodingFailed {
            query: coordinate.to_string(),
            message: format!("No address found for coordinates ({coordinate})."),
        };

        let place = self.geocoder.reverse(coordinate).await.ok_or_else(not_found)?;
        let display_name = place.display_name.ok_or_else(not_found)?;

        Ok(ReversePlace {
            latitude: place.coordinate.latitude(),
            longitude: place.coordinate.longitude(),
            display_name,
        })
    }
}

#[cfg(test)]
#[path = "reverse_tests.rs"]
mod tests;
