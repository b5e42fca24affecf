mod error;
pub mod open_meteo;

use async_trait::async_trait;
use atlas_geo::Coordinate;
use serde_json::{Map, Value};

pub use error::{Error, Result};
pub use open_meteo::OpenMeteo;

/// A weather data source.
///
/// The payload is kept as an untyped JSON object: callers forward it to the
/// orchestrator and may only add fields to it.
#[async_trait]
pub trait Forecast: Send + Sync {
    async fn forecast(&self, coordinate: Coordinate) -> Result<Map<String, Value>>;
}
