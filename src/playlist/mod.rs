//! Numbering and rendering of the M3U playlist

pub mod format;
pub mod generator;
pub mod ids;
pub mod listing;

pub use generator::{PlaylistEntry, RenderedPlaylist, render};
pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use listing::{discovery_listing, explorer_report};
