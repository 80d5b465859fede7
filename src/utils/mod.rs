//! Utility modules shared by the fetcher and the pipeline

pub mod decompression;
pub mod retry;

// Re-export commonly used types for convenience
pub use decompression::{CompressionFormat, DecompressionService};
pub use retry::{RetryPolicy, Sleeper, TokioSleeper, with_retry};
