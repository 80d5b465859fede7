use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pluto_m3u::config::FeedConfig;
use pluto_m3u::errors::AppError;
use pluto_m3u::sources::{Fetcher, ReqwestTransport};
use pluto_m3u::utils::Sleeper;

struct InstantSleeper;

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn feed_config(server: &MockServer) -> FeedConfig {
    FeedConfig {
        url: format!("{}/PlutoTV/.channels.json.gz", server.uri()),
        user_agent: "TestAgent/1.0".to_string(),
        max_retries: 3,
        ..FeedConfig::default()
    }
}

fn fetcher(feed: &FeedConfig) -> Fetcher {
    Fetcher::new(
        Arc::new(ReqwestTransport::new(Duration::from_secs(5)).unwrap()),
        Arc::new(InstantSleeper),
        feed.retry_delay,
        feed.rate_limit_backoff,
    )
}

#[tokio::test]
async fn test_fetches_gzip_catalog_over_http() {
    let server = MockServer::start().await;
    let body = gzip(br#"{"regions":{"us":{"channels":{"c1":{"name":"Nick Jr","logo":"L1"}}}}}"#);
    Mock::given(method("GET"))
        .and(path("/PlutoTV/.channels.json.gz"))
        .and(header("User-Agent", "TestAgent/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&server)
        .await;

    let feed = feed_config(&server);
    let catalog = fetcher(&feed).fetch_catalog(&feed).await.unwrap();

    assert_eq!(catalog.region("us").unwrap().get("c1").unwrap().name, "Nick Jr");
}

#[tokio::test]
async fn test_retries_after_rate_limit_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gzip(br#"{"regions":{}}"#)))
        .mount(&server)
        .await;

    let feed = feed_config(&server);
    let catalog = fetcher(&feed).fetch_catalog(&feed).await.unwrap();

    assert_eq!(catalog.region_count(), 0);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let feed = feed_config(&server);
    let result = fetcher(&feed).fetch_catalog(&feed).await;

    assert!(matches!(
        result,
        Err(AppError::FetchUnavailable { attempts: 3, .. })
    ));
}
