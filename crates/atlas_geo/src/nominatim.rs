//! OpenStreetMap Nominatim, the global geocoder.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::{Coordinate, Error, Geocoder, ResolvedLocation, Result, ReverseGeocoder};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone)]
pub struct Nominatim {
    client: Client,
    base_url: String,
}

/// A single entry of the `/search` response array.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// The `/reverse` response. Failures arrive as `200 {"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ReverseHit {
    lat: Option<String>,
    lon: Option<String>,
    display_name: Option<String>,
    error: Option<String>,
}

impl Nominatim {
    /// The client is expected to carry a `User-Agent`, the public instance
    /// rejects anonymous requests.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    async fn search(&self, query: &str) -> Result<Option<ResolvedLocation>> {
        let url = format!("{}/search", self.base_url);
        trace!(%url, query, "Triggering search request.");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = response.status();
        trace!(status = status.as_u16(), "Received response.");
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let hits: Vec<SearchHit> = serde_json::from_str(&response.text().await?)?;
        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        let coordinate = Coordinate::new(
            parse_degrees("lat", &hit.lat)?,
            parse_degrees("lon", &hit.lon)?,
        )?;

        Ok(Some(ResolvedLocation::new(coordinate, hit.display_name)))
    }

    async fn lookup(&self, coordinate: Coordinate) -> Result<ResolvedLocation> {
        let url = format!("{}/reverse", self.base_url);
        trace!(%url, %coordinate, "Triggering reverse request.");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude().to_string()),
                ("lon", coordinate.longitude().to_string()),
                ("format", "json".to_owned()),
            ])
            .send()
            .await?;

        let status = response.status();
        trace!(status = status.as_u16(), "Received response.");
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let hit: ReverseHit = serde_json::from_str(&response.text().await?)?;
        if let Some(error) = hit.error {
            return Err(Error::LogicalStatus(error));
        }

        let display_name = hit.display_name.ok_or(Error::MissingField("display_name"))?;

        // The reverse lookup snaps to the nearest known object. Prefer its
        // position, fall back to the requested one.
        let coordinate = match (hit.lat, hit.lon) {
            (Some(lat), Some(lon)) => {
                Coordinate::new(parse_degrees("lat", &lat)?, parse_degrees("lon", &lon)?)?
            }
            _ => coordinate,
        };

        Ok(ResolvedLocation::new(coordinate, Some(display_name)))
    }
}

#[async_trait]
impl Geocoder for Nominatim {
    type Place = ResolvedLocation;

    async fn resolve(&self, query: &str) -> Option<ResolvedLocation> {
        match self.search(query).await {
            Ok(Some(location)) => {
                debug!(query, coordinate = %location.coordinate, "Geocoded query.");
                Some(location)
            }
            Ok(None) => {
                debug!(query, "No geocoding result.");
                None
            }
            Err(error) => {
                warn!(query, %error, "Geocoding request failed.");
                None
            }
        }
    }
}

#[async_trait]
impl ReverseGeocoder for Nominatim {
    async fn reverse(&self, coordinate: Coordinate) -> Option<ResolvedLocation> {
        self.lookup(coordinate)
            .await
            .inspect_err(|error| warn!(%coordinate, %error, "Reverse geocoding failed."))
            .ok()
    }
}

fn parse_degrees(field: &'static str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}

#[cfg(test)]
#[path = "nominatim_tests.rs"]
mod tests;
