use std::io;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] atlas_config::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON arguments: {0}")]
    Json(#[from] serde_json::Error),
}
