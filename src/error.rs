//! Error types for colour maps.

use thiserror::Error;

/// Errors raised while building or querying a colour map.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid hex colour: {0:?}")]
    InvalidHex(String),

    #[error("colour map definition has no entries")]
    EmptyDefinition,

    #[error("malformed colour map definition: {0}")]
    Definition(#[from] serde_json::Error),

    #[error("logarithmic scale requested but the logarithmic values \
             have not been initialised")]
    LogScaleNotInitialised,
}

/// Result type alias for colour map operations.
pub type Result<T> = std::result::Result<T, Error>;
