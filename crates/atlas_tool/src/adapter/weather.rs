use std::sync::Arc;

use async_trait::async_trait;
use atlas_geo::{Geocoder, LocationQuery, ResolvedLocation, resolve};
use atlas_weather::Forecast;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::{check_coordinates, resolve_failure};
use crate::{Tool, ToolError, Validate};

const NAME: &str = "getWeather";

/// Current temperature, hourly forecast and sunrise/sunset for a place.
pub struct GetWeather {
    geocoder: Arc<dyn Geocoder<Place = ResolvedLocation>>,
    forecast: Arc<dyn Forecast>,
}

impl GetWeather {
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder<Place = ResolvedLocation>>,
        forecast: Arc<dyn Forecast>,
    ) -> Self {
        Self { geocoder, forecast }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherInput {
    /// Latitude coordinate (range: -90 to 90).
    #[schemars(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    /// Longitude coordinate (range: -180 to 180).
    #[schemars(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    /// City or location name in any language (e.g., 'San Francisco', 'تهران',
    /// 'London').
    pub city: Option<String>,
}

impl Validate for WeatherInput {
    fn validate(&self) -> Result<(), String> {
        check_coordinates(self.latitude, self.longitude)
    }
}

#[async_trait]
impl Tool for GetWeather {
    type Input = WeatherInput;

    /// The upstream forecast object, with `cityName` added when known.
    type Output = Map<String, Value>;

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Get real-time weather data for any location worldwide. Provides current temperature, \
         hourly forecast, and sunrise/sunset times. Supports both city names and geographic \
         coordinates."
    }

    async fn execute(&self, input: WeatherInput) -> Result<Map<String, Value>, ToolError> {
        let query = LocationQuery {
            name: input.city,
            latitude: input.latitude,
            longitude: input.longitude,
        };

        let resolution = resolve(&query, self.geocoder.as_ref())
            .await
            .map_err(|error| {
                resolve_failure(NAME, "city name", error, |name| {
                    format!(
                        "Could not find coordinates for \"{name}\". Please verify the location \
                         name or try using coordinates."
                    )
                })
            })?;

        let mut payload = self
            .forecast
            .forecast(resolution.coordinate())
            .await
            .map_err(|error| {
                warn!(%error, timeout = error.is_timeout(), "Forecast request failed.");
                ToolError::UpstreamService {
                    service: "Weather",
                    status: error.status(),
                }
            })?;

        let city_name = resolution
            .label()
            .filter(|label| !label.is_empty())
            .or_else(|| query.name());
        if let Some(name) = city_name {
            payload.insert("cityName".to_owned(), Value::String(name.to_owned()));
        }

        Ok(payload)
    }
}

#[cfg(test)]
#[path = "weather_tests.rs"]
mod tests;
