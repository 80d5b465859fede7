//! Error type definitions for the playlist builder
//!
//! Fetch failures are classified per attempt so the retry loop can decide how
//! long to wait; everything that reaches the pipeline is an [`AppError`].

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The feed could not be retrieved after all attempts
    #[error("Feed unavailable: {url} after {attempts} attempt(s)")]
    FetchUnavailable { url: String, attempts: u32 },

    /// The feed was retrieved but does not describe a catalog
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem errors while reading keywords or writing output
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single failed fetch attempt
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP 429 from the feed host
    #[error("Rate limited by {url}")]
    RateLimited { url: String },

    /// Any other non-2xx response
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Connection, TLS or timeout failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// The body was not valid gzip
    #[error("Failed to decompress response: {0}")]
    Decompress(#[source] std::io::Error),

    /// The body was not valid UTF-8
    #[error("Failed to decode response as UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The body was not valid JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structural problems in a decoded feed
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("feed has no 'regions' object")]
    MissingRegions,

    #[error("region '{region}' is malformed: {message}")]
    MalformedRegion { region: String, message: String },

    #[error("fetched content is not JSON")]
    NotJson,
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path it happened on
    pub fn io<P: AsRef<std::path::Path>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl FetchError {
    /// Rate limiting gets its own, growing backoff
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}
