//! Errors raised while loading static configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Catalog load failures. All of these are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    /// The catalog file could not be read.
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid catalog JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A bucket's bounds are inverted.
    #[error("weight bucket '{key}' has min {min} greater than max {max}")]
    #[allow(missing_docs)]
    InvalidBucket { key: String, min: u32, max: u32 },

    /// Two buckets share a key.
    #[error("duplicate weight bucket key '{0}'")]
    DuplicateBucket(String),

    /// Two listings share an id.
    #[error("duplicate listing id '{0}'")]
    DuplicateListing(String),

    /// A listing field is out of range or empty.
    #[error("listing '{id}': {reason}")]
    InvalidListing {
        /// Offending listing.
        id: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result alias for catalog loading.
pub type Result<T> = std::result::Result<T, CatalogError>;
