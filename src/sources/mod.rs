//! Remote feed retrieval

pub mod fetcher;

pub use fetcher::{FetchRequest, Fetched, Fetcher, HttpResponse, HttpTransport, ReqwestTransport};
