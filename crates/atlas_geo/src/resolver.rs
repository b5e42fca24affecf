//! Decide how a tool invocation's location gets resolved.
//!
//! A named location always wins over explicit coordinates, and explicit
//! coordinates are only used as a complete pair.

use tracing::debug;

use crate::{Coordinate, CoordinateError, Geocoder, Place};

/// The location-bearing part of a tool's input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationQuery {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// The name to geocode, if one was given. Blank names count as absent.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|v| !v.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<P> {
    /// The named location was geocoded into this place.
    Geocoded(P),

    /// Explicit coordinates were used as-is.
    Coordinate(Coordinate),
}

impl<P: Place> Resolution<P> {
    pub fn coordinate(&self) -> Coordinate {
        match self {
            Self::Geocoded(place) => place.coordinate(),
            Self::Coordinate(coordinate) => *coordinate,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Geocoded(place) => place.label(),
            Self::Coordinate(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("neither a location name nor a complete coordinate pair was supplied")]
    MissingInput,

    #[error("could not geocode {query:?}")]
    GeocodingFailed { query: String },

    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),
}

/// Resolve `query` to a single location, consulting `geocoder` only when a
/// name was supplied.
pub async fn resolve<G>(
    query: &LocationQuery,
    geocoder: &G,
) -> Result<Resolution<G::Place>, ResolveError>
where
    G: Geocoder + ?Sized,
{
    if let Some(name) = query.name() {
        debug!(name, "Resolving location by name.");
        return geocoder
            .resolve(name)
            .await
            .map(Resolution::Geocoded)
            .ok_or_else(|| ResolveError::GeocodingFailed {
                query: name.to_owned(),
            });
    }

    match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => {
            debug!(latitude, longitude, "Using supplied coordinates.");
            Ok(Resolution::Coordinate(Coordinate::new(latitude, longitude)?))
        }
        _ => Err(ResolveError::MissingInput),
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
