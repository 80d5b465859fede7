//! Centralized error handling
//!
//! # Error Categories
//!
//! - **Fetch Errors**: one failed attempt against the feed host (retried)
//! - **Catalog Errors**: the feed decoded but has the wrong shape
//! - **Application Errors**: what the pipeline finally observes
//!
//! # Usage
//!
//! ```rust
//! use pluto_m3u::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("target_regions must not be empty"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result of a single fetch attempt
pub type FetchResult<T> = Result<T, FetchError>;
