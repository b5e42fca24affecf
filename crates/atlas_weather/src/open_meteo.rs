//! Open-Meteo forecast API.
//!
//! See: <https://open-meteo.com/en/docs>

use async_trait::async_trait;
use atlas_geo::Coordinate;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{Error, Forecast, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const CURRENT: &str = "temperature_2m";
const HOURLY: &str = "temperature_2m";
const DAILY: &str = "sunrise,sunset";

#[derive(Debug, Clone)]
pub struct OpenMeteo {
    client: Client,
    base_url: String,
}

impl OpenMeteo {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl Forecast for OpenMeteo {
    async fn forecast(&self, coordinate: Coordinate) -> Result<Map<String, Value>> {
        let url = format!("{}/v1/forecast", self.base_url);
        let latitude = coordinate.latitude().to_string();
        let longitude = coordinate.longitude().to_string();
        trace!(%url, %coordinate, "Triggering forecast request.");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT),
                ("hourly", HOURLY),
                ("daily", DAILY),
                ("timezone", "auto"),
            ])
            .send()
            .await?;

        let status = response.status();
        trace!(status = status.as_u16(), "Received response.");
        if !status.is_success() {
            debug!(status = status.as_u16(), "Forecast request failed.");
            return Err(Error::Status(status.as_u16()));
        }

        match serde_json::from_str(&response.text().await?)? {
            Value::Object(payload) => Ok(payload),
            _ => Err(Error::NotAnObject),
        }
    }
}

#[cfg(test)]
#[path = "open_meteo_tests.rs"]
mod tests;
