use async_trait::async_trait;

use crate::{Coordinate, ResolvedLocation};

/// Anything a geocoder can hand back: at minimum a coordinate, optionally a
/// label to show the user.
pub trait Place {
    fn coordinate(&self) -> Coordinate;

    fn label(&self) -> Option<&str>;
}

impl Place for ResolvedLocation {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    fn label(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Forward geocoding: free text to a single best-match place.
///
/// Implementations never fail loudly. Transport errors, provider errors,
/// empty result sets and malformed responses are all reported as `None`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    type Place: Place + Send;

    async fn resolve(&self, query: &str) -> Option<Self::Place>;
}

/// Reverse geocoding: a coordinate to a human-readable place.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, coordinate: Coordinate) -> Option<ResolvedLocation>;
}
