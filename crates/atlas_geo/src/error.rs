pub type Result<T> = std::result::Result<T, Error>;

/// Failures internal to a geocoding provider.
///
/// These never cross the [`Geocoder`] boundary: providers log them and
/// report "no result" instead.
///
/// [`Geocoder`]: crate::Geocoder
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("provider reported logical status {0:?}")]
    LogicalStatus(String),

    #[error("invalid {field} value {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Coordinate(#[from] crate::CoordinateError),

    #[error("response is missing {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        if std::mem::discriminant(self) != std::mem::discriminant(other) {
            return false;
        }

        // Good enough for testing purposes
        format!("{self:?}") == format!("{other:?}")
    }
}
