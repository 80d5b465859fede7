pub mod config;
pub mod errors;
pub mod filter;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod playlist;
pub mod sources;
pub mod utils;
