use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub mod defaults;
pub mod duration_serde;

use defaults::*;
use duration_serde::duration;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub playlist: PlaylistConfig,
}

/// Where the channel catalog comes from and how hard to try fetching it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Shared guide URL advertised in the playlist header
    #[serde(default = "default_epg_url")]
    pub epg_url: String,
    /// Client identity sent with the fetch and appended to every stream URL
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Total attempts, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_request_timeout", with = "duration")]
    pub request_timeout: Duration,
    #[serde(default = "default_retry_delay", with = "duration")]
    pub retry_delay: Duration,
    /// Step for rate-limit waits; attempt `n` (0-based) waits `(n + 1) * step`
    #[serde(default = "default_rate_limit_backoff", with = "duration")]
    pub rate_limit_backoff: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Regions to include, in output order
    #[serde(default = "default_target_regions")]
    pub target_regions: Vec<String>,
    #[serde(default = "default_region_names")]
    pub region_names: BTreeMap<String, String>,
    #[serde(default = "default_group_prefix")]
    pub group_prefix: String,
    #[serde(default = "default_start_channel_number")]
    pub start_channel_number: u32,
    #[serde(default = "default_keywords_file")]
    pub keywords_file: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
}

fn default_feed_url() -> String { DEFAULT_FEED_URL.to_string() }
fn default_epg_url() -> String { DEFAULT_EPG_URL.to_string() }
fn default_user_agent() -> String { DEFAULT_USER_AGENT.to_string() }
fn default_max_retries() -> u32 { DEFAULT_MAX_RETRIES }
fn default_request_timeout() -> Duration { Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS) }
fn default_retry_delay() -> Duration { Duration::from_secs(DEFAULT_RETRY_DELAY_SECS) }
fn default_rate_limit_backoff() -> Duration { Duration::from_secs(DEFAULT_RATE_LIMIT_BACKOFF_SECS) }

fn default_target_regions() -> Vec<String> {
    DEFAULT_TARGET_REGIONS.iter().map(|r| r.to_string()).collect()
}
fn default_region_names() -> BTreeMap<String, String> {
    DEFAULT_REGION_NAMES
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
}
fn default_group_prefix() -> String { DEFAULT_GROUP_PREFIX.to_string() }
fn default_start_channel_number() -> u32 { DEFAULT_START_CHANNEL_NUMBER }
fn default_keywords_file() -> PathBuf { PathBuf::from(DEFAULT_KEYWORDS_FILE) }
fn default_output_dir() -> PathBuf { PathBuf::from(DEFAULT_OUTPUT_DIR) }
fn default_output_filename() -> String { DEFAULT_OUTPUT_FILENAME.to_string() }

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            epg_url: default_epg_url(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            request_timeout: default_request_timeout(),
            retry_delay: default_retry_delay(),
            rate_limit_backoff: default_rate_limit_backoff(),
        }
    }
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            target_regions: default_target_regions(),
            region_names: default_region_names(),
            group_prefix: default_group_prefix(),
            start_channel_number: default_start_channel_number(),
            keywords_file: default_keywords_file(),
            output_dir: default_output_dir(),
            output_filename: default_output_filename(),
        }
    }
}

impl PlaylistConfig {
    /// Display name for a region, falling back to the uppercased code
    pub fn region_display_name(&self, region_code: &str) -> String {
        self.region_names
            .get(&region_code.to_lowercase())
            .cloned()
            .unwrap_or_else(|| region_code.to_uppercase())
    }

    /// Group title written into each entry, e.g. `Pluto United States`
    pub fn group_title(&self, region_code: &str) -> String {
        let display = self.region_display_name(region_code);
        if self.group_prefix.is_empty() {
            display
        } else {
            format!("{} {}", self.group_prefix, display)
        }
    }
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.feed.max_retries == 0 {
            return Err(AppError::configuration("feed.max_retries must be at least 1"));
        }
        if self.playlist.target_regions.is_empty() {
            return Err(AppError::configuration(
                "playlist.target_regions must name at least one region",
            ));
        }
        if self.playlist.output_filename.trim().is_empty() {
            return Err(AppError::configuration(
                "playlist.output_filename must not be empty",
            ));
        }
        Ok(())
    }

    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}
