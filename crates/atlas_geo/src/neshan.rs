//! Neshan, the regional geocoder for Persian addresses.
//!
//! Neshan differs from Nominatim in three ways that matter here:
//!
//! - it authenticates with an `Api-Key` header,
//! - it reports logical failures through a `status` field on a `200` response,
//! - it returns points as `{x, y}`, where `x` is the longitude and `y` the
//!   latitude.
//!
//! See: <https://platform.neshan.org/api/geocoding>

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{BoundingBox, Coordinate, Error, Geocoder, Place, ResolvedLocation, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.neshan.org";

const API_KEY_HEADER: &str = "Api-Key";
const STATUS_OK: &str = "OK";

#[derive(Clone)]
pub struct Neshan {
    client: Client,
    base_url: String,
    api_key: String,
    extent: Option<BoundingBox>,
}

impl std::fmt::Debug for Neshan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neshan")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("extent", &self.extent)
            .finish_non_exhaustive()
    }
}

/// A geocoded Persian address.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalLocation {
    pub location: ResolvedLocation,

    /// The provider's formatted address, or the queried address verbatim.
    pub formatted_address: String,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: String,
}

impl Place for RegionalLocation {
    fn coordinate(&self) -> Coordinate {
        self.location.coordinate
    }

    fn label(&self) -> Option<&str> {
        Some(&self.formatted_address)
    }
}

/// The `json` query parameter of a geocoding request.
#[derive(Debug, Serialize)]
struct Request<'a> {
    address: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    extent: Option<Extent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Extent {
    south_west: Coordinate,
    north_east: Coordinate,
}

impl From<BoundingBox> for Extent {
    fn from(value: BoundingBox) -> Self {
        Self {
            south_west: value.south_west,
            north_east: value.north_east,
        }
    }
}

/// The response either carries a single candidate at the top level, or a
/// list of them under `items`.
#[derive(Debug, Deserialize)]
struct Response {
    status: Option<String>,

    #[serde(flatten)]
    candidate: Candidate,

    #[serde(default)]
    items: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    location: Option<Point>,

    #[serde(alias = "formattedAddress")]
    formatted_address: Option<String>,
    neighbourhood: Option<String>,
    city: Option<String>,
    state: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Point {
    x: f64,
    y: f64,
}

impl Point {
    fn to_coordinate(&self) -> Result<Coordinate> {
        Coordinate::new(self.y, self.x).map_err(Into::into)
    }
}

impl Neshan {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            extent: None,
        }
    }

    /// Bias results towards the given area.
    #[must_use]
    pub fn with_extent(mut self, extent: Option<BoundingBox>) -> Self {
        self.extent = extent;
        self
    }

    async fn geocode(&self, address: &str) -> Result<Option<RegionalLocation>> {
        let url = format!("{}/geocoding/v1/", self.base_url);
        let payload = serde_json::to_string(&Request {
            address,
            extent: self.extent.map(Into::into),
        })?;

        trace!(%url, payload, "Triggering geocoding request.");
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("json", payload)])
            .send()
            .await?;

        let status = response.status();
        trace!(status = status.as_u16(), "Received response.");
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body: Response = serde_json::from_str(&response.text().await?)?;
        parse(address, body)
    }
}

fn parse(address: &str, response: Response) -> Result<Option<RegionalLocation>> {
    let Response {
        status,
        candidate,
        items,
    } = response;

    let status = status.unwrap_or_else(|| STATUS_OK.to_owned());
    if status != STATUS_OK {
        return Err(Error::LogicalStatus(status));
    }

    let candidate = if candidate.location.is_some() {
        candidate
    } else if let Some(item) = items.into_iter().next() {
        item
    } else {
        return Ok(None);
    };

    let coordinate = candidate
        .location
        .as_ref()
        .ok_or(Error::MissingField("location"))?
        .to_coordinate()?;

    let formatted_address = candidate
        .formatted_address
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| address.to_owned());

    Ok(Some(RegionalLocation {
        location: ResolvedLocation::new(coordinate, Some(formatted_address.clone())),
        formatted_address,
        neighbourhood: candidate.neighbourhood.filter(|v| !v.is_empty()),
        city: candidate.city.filter(|v| !v.is_empty()),
        state: candidate.state.filter(|v| !v.is_empty()),
        status,
    }))
}

#[async_trait]
impl Geocoder for Neshan {
    type Place = RegionalLocation;

    async fn resolve(&self, address: &str) -> Option<RegionalLocation> {
        match self.geocode(address).await {
            Ok(Some(location)) => {
                debug!(address, coordinate = %location.location.coordinate, "Geocoded address.");
                Some(location)
            }
            Ok(None) => {
                debug!(address, "No geocoding result.");
                None
            }
            Err(error) => {
                warn!(address, %error, "Geocoding request failed.");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "neshan_tests.rs"]
mod tests;
