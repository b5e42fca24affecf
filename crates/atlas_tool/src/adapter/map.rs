use std::sync::Arc;

use async_trait::async_trait;
use atlas_geo::{Geocoder, LocationQuery, ResolvedLocation, resolve};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{check_coordinates, resolve_failure};
use crate::{Tool, ToolError, Validate};

const NAME: &str = "getMap";
const ZOOM: (f64, f64) = (1.0, 18.0);

/// Display an interactive map for a place name or coordinates.
pub struct GetMap {
    geocoder: Arc<dyn Geocoder<Place = ResolvedLocation>>,
}

impl GetMap {
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder<Place = ResolvedLocation>>) -> Self {
        Self { geocoder }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapInput {
    /// Latitude coordinate.
    #[schemars(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    /// Longitude coordinate.
    #[schemars(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    /// Location name (e.g., 'Amsterdam', 'Eiffel Tower', '123 Main St').
    pub location: Option<String>,

    /// Zoom level (1-18, default 13).
    #[serde(default = "default_zoom")]
    #[schemars(range(min = 1.0, max = 18.0))]
    pub zoom: f64,

    /// Show marker on the location.
    #[serde(default = "default_marker")]
    pub marker: bool,
}

fn default_zoom() -> f64 {
    13.0
}

fn default_marker() -> bool {
    true
}

impl Validate for MapInput {
    fn validate(&self) -> Result<(), String> {
        if !(ZOOM.0..=ZOOM.1).contains(&self.zoom) {
            return Err(format!(
                "zoom must be between {} and {}, got {}",
                ZOOM.0, ZOOM.1, self.zoom
            ));
        }

        check_coordinates(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub zoom: f64,
    pub marker: bool,
}

#[async_trait]
impl Tool for GetMap {
    type Input = MapInput;
    type Output = MapView;

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Display an interactive map for a location. You can provide coordinates, a city name, \
         address, or landmark."
    }

    async fn execute(&self, input: MapInput) -> Result<MapView, ToolError> {
        let query = LocationQuery {
            name: input.location,
            latitude: input.latitude,
            longitude: input.longitude,
        };

        let resolution = resolve(&query, self.geocoder.as_ref())
            .await
            .map_err(|error| {
                resolve_failure(NAME, "location name", error, |name| {
                    format!("Could not find location \"{name}\". Please check the location name.")
                })
            })?;

        let coordinate = resolution.coordinate();
        Ok(MapView {
            latitude: coordinate.latitude(),
            longitude: coordinate.longitude(),
            display_name: resolution.label().map(str::to_owned),
            zoom: input.zoom,
            marker: input.marker,
        })
    }
}

#[cfg(test)]
#[path = "map_tests.rs"]
mod tests;
