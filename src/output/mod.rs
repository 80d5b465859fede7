//! Playlist file output

pub mod writer;

pub use writer::OutputWriter;
