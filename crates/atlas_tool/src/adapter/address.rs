use std::sync::Arc;

use async_trait::async_trait;
use atlas_geo::{Geocoder, LocationQuery, RegionalLocation, Resolution, resolve};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Point;
use crate::{Tool, ToolError, Validate};

const NAME: &str = "addressToPoint";
const MIN_ADDRESS_LENGTH: usize = 3;

/// Persian address to coordinates, through the regional geocoder.
pub struct AddressToPoint {
    /// Absent when no API key was configured.
    geocoder: Option<Arc<dyn Geocoder<Place = RegionalLocation>>>,

    /// Name of the environment variable that should hold the key.
    key_variable: String,
}

impl AddressToPoint {
    #[must_use]
    pub fn new(
        geocoder: Option<Arc<dyn Geocoder<Place = RegionalLocation>>>,
        key_variable: impl Into<String>,
    ) -> Self {
        Self {
            geocoder,
            key_variable: key_variable.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct AddressInput {
    /// Complete address in Persian or English (e.g., 'تهران، خیابان ولیعصر' or
    /// 'Tehran, Valiasr Street').
    #[schemars(length(min = 3))]
    pub address: String,
}

impl Validate for AddressInput {
    fn validate(&self) -> Result<(), String> {
        let length = self.address.trim().chars().count();
        if length < MIN_ADDRESS_LENGTH {
            return Err(format!(
                "address must be at least {MIN_ADDRESS_LENGTH} characters, got {length}"
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPoint {
    pub success: bool,
    pub address: String,
    pub location: Point,
    pub formatted_address: String,
    pub neighbourhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub status: String,
}

#[async_trait]
impl Tool for AddressToPoint {
    type Input = AddressInput;
    type Output = AddressPoint;

    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Convert Persian/Farsi addresses to geographic coordinates using the Neshan Geocoding \
         API. Returns precise location data including coordinates, formatted address, and \
         neighborhood information for Iranian addresses."
    }

    async fn execute(&self, input: AddressInput) -> Result<AddressPoint, ToolError> {
        let Some(geocoder) = &self.geocoder else {
            debug!(variable = self.key_variable, "Regional geocoder is not configured.");
            return Err(ToolError::Configuration {
                variable: self.key_variable.clone(),
            });
        };

        let not_found = || ToolError::GeocodingFailed {
            query: input.address.clone(),
            message: format!(
                "No location found for address: \"{}\". Please verify the address.",
                input.address
            ),
        };

        let place = match resolve(&LocationQuery::named(&input.address), geocoder.as_ref()).await {
            Ok(Resolution::Geocoded(place)) => place,
            Ok(Resolution::Coordinate(_)) | Err(_) => return Err(not_found()),
        };

        Ok(AddressPoint {
            success: true,
            location: place.location.coordinate.into(),
            formatted_address: place.formatted_address,
            neighbourhood: place.neighbourhood,
            city: place.city,
            state: place.state,
            status: place.status,
            address: input.address,
        })
    }
}

#[cfg(test)]
#[path = "address_tests.rs"]
mod tests;
