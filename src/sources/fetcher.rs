//! Feed retrieval with bounded retry, gzip decoding and JSON parsing
//!
//! [`Fetcher::fetch`] never returns an error: running out of attempts
//! yields `None` and the caller decides how to abort.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::FeedConfig;
use crate::errors::{AppError, AppResult, CatalogError, FetchError, FetchResult};
use crate::models::Catalog;
use crate::utils::{DecompressionService, RetryPolicy, Sleeper, TokioSleeper, with_retry};

/// Raw response as seen by the fetcher, before status classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal GET transport so the retry logic can be driven without a network
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> FetchResult<HttpResponse>;
}

/// reqwest-backed transport with a fixed per-attempt timeout
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> FetchResult<HttpResponse> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(format!("Failed to read response: {e}")))?;

        debug!("Fetched {} bytes (status {}) from {}", body.len(), status, url);
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub expect_json: bool,
    pub expect_gzip: bool,
    pub headers: Vec<(String, String)>,
    /// Total attempts, at least 1
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Bytes(Vec<u8>),
    Json(Value),
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expect_json: false,
            expect_gzip: false,
            headers: Vec::new(),
            max_retries: 3,
        }
    }

    pub fn json(mut self) -> Self {
        self.expect_json = true;
        self
    }

    pub fn gzip(mut self) -> Self {
        self.expect_gzip = true;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// The catalog request: gzip JSON with the client identity header
    pub fn for_feed(feed: &FeedConfig) -> Self {
        Self::new(feed.url.clone())
            .json()
            .gzip()
            .header("User-Agent", feed.user_agent.clone())
            .max_retries(feed.max_retries)
    }
}

pub struct Fetcher {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
    retry_delay: Duration,
    rate_limit_step: Duration,
}

impl Fetcher {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        sleeper: Arc<dyn Sleeper>,
        retry_delay: Duration,
        rate_limit_step: Duration,
    ) -> Self {
        Self {
            transport,
            sleeper,
            retry_delay,
            rate_limit_step,
        }
    }

    /// Production fetcher: reqwest with the configured timeout, real sleeps
    pub fn from_feed_config(feed: &FeedConfig) -> AppResult<Self> {
        let transport = ReqwestTransport::new(feed.request_timeout)?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(TokioSleeper),
            feed.retry_delay,
            feed.rate_limit_backoff,
        ))
    }

    fn policy_for(&self, request: &FetchRequest) -> RetryPolicy {
        RetryPolicy {
            max_attempts: request.max_retries.max(1),
            failure_delay: self.retry_delay,
            rate_limit_step: self.rate_limit_step,
        }
    }

    /// Fetch with retries; `None` once every attempt has failed
    pub async fn fetch(&self, request: &FetchRequest) -> Option<Fetched> {
        let policy = self.policy_for(request);
        let result = with_retry(
            &policy,
            self.sleeper.as_ref(),
            || self.attempt(request),
            &request.url,
        )
        .await;

        match result {
            Ok(fetched) => Some(fetched),
            Err(e) => {
                error!("Giving up on {}: {}", request.url, e);
                None
            }
        }
    }

    async fn attempt(&self, request: &FetchRequest) -> FetchResult<Fetched> {
        let response = self.transport.get(&request.url, &request.headers).await?;

        match response.status {
            429 => {
                return Err(FetchError::RateLimited {
                    url: request.url.clone(),
                });
            }
            200..=299 => {}
            status => {
                return Err(FetchError::Http {
                    status,
                    url: request.url.clone(),
                });
            }
        }

        let body = if request.expect_gzip {
            DecompressionService::decompress_gzip(&response.body).map_err(FetchError::Decompress)?
        } else {
            response.body
        };

        if request.expect_json {
            let text = String::from_utf8(body)?;
            Ok(Fetched::Json(serde_json::from_str(&text)?))
        } else {
            Ok(Fetched::Bytes(body))
        }
    }

    /// Retrieve and decode the channel catalog described by `feed`
    pub async fn fetch_catalog(&self, feed: &FeedConfig) -> AppResult<Catalog> {
        let request = FetchRequest::for_feed(feed);
        info!("Fetching channel catalog from {}", feed.url);

        let fetched = self
            .fetch(&request)
            .await
            .ok_or_else(|| AppError::FetchUnavailable {
                url: feed.url.clone(),
                attempts: request.max_retries,
            })?;

        let catalog = match fetched {
            Fetched::Json(value) => Catalog::from_feed(&value)?,
            Fetched::Bytes(_) => return Err(CatalogError::NotJson.into()),
        };

        info!(
            "Catalog loaded: {} regions, {} channels",
            catalog.region_count(),
            catalog.channel_count()
        );
        Ok(catalog)
    }
}
