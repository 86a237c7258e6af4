use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the store and its configuration
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dispatch depth {depth} exceeds the configured limit of {limit}")]
    DispatchDepthExceeded { depth: usize, limit: usize },

    #[error("Store has been dropped")]
    StoreDropped,

    #[error("Failed to parse store config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to read store config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
