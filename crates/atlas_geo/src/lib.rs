mod coordinate;
mod error;
mod geocoder;
pub mod neshan;
pub mod nominatim;
pub mod resolver;

pub use coordinate::{BoundingBox, Coordinate, CoordinateError, ResolvedLocation};
pub use error::{Error, Result};
pub use geocoder::{Geocoder, Place, ReverseGeocoder};
pub use neshan::{Neshan, RegionalLocation};
pub use nominatim::Nominatim;
pub use resolver::{LocationQuery, Resolution, ResolveError, resolve};
