//! Location-aware tools for a language-model orchestrator.
//!
//! Tools are registered in a [`Tools`] set, which validates the raw JSON
//! arguments, runs the tool, and always answers with a single
//! [`ToolResult`].

pub mod adapter;
mod error;
mod result;
mod tool;

use std::sync::Arc;

use atlas_config::Config;
use atlas_geo::{Geocoder, Neshan, Nominatim, RegionalLocation};
use atlas_weather::OpenMeteo;
use tracing::debug;

pub use error::ToolError;
pub use result::ToolResult;
pub use tool::{Tool, ToolDefinition, Tools, Validate};

use crate::adapter::{AddressToPoint, GetMap, GetWeather, ReverseGeocode};

/// Build the full tool set from the process configuration.
///
/// `addressToPoint` is always registered. Without a Neshan API key it
/// answers every call with a configuration error.
pub fn toolbox(config: &Config) -> atlas_config::Result<Tools> {
    let client = config.http_client()?;

    let nominatim = Arc::new(Nominatim::new(client.clone(), &config.nominatim.base_url));
    let forecast = Arc::new(OpenMeteo::new(client.clone(), &config.weather.base_url));
    let neshan = config.neshan.api_key().map(|key| {
        Arc::new(
            Neshan::new(client, &config.neshan.base_url, key).with_extent(config.neshan.extent()),
        ) as Arc<dyn Geocoder<Place = RegionalLocation>>
    });

    debug!(regional_geocoder = neshan.is_some(), "Building toolbox.");

    Ok(Tools::new()
        .with(GetMap::new(nominatim.clone()))
        .with(GetWeather::new(nominatim.clone(), forecast))
        .with(AddressToPoint::new(neshan, &config.neshan.api_key_env))
        .with(ReverseGeocode::new(nominatim)))
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
