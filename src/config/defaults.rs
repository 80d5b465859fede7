/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Feed defaults
pub const DEFAULT_FEED_URL: &str =
    "https://github.com/matthuisman/i.mjh.nz/raw/refs/heads/master/PlutoTV/.channels.json.gz";
pub const DEFAULT_EPG_URL: &str = "https://github.com/matthuisman/i.mjh.nz/raw/master/PlutoTV/all.xml.gz";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;
pub const DEFAULT_RATE_LIMIT_BACKOFF_SECS: u64 = 10;

// Playlist defaults
pub const DEFAULT_TARGET_REGIONS: &[&str] = &["us"];
pub const DEFAULT_GROUP_PREFIX: &str = "Pluto";
pub const DEFAULT_START_CHANNEL_NUMBER: u32 = 1200;
pub const DEFAULT_KEYWORDS_FILE: &str = "plutotv_us_kids.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "playlists";
pub const DEFAULT_OUTPUT_FILENAME: &str = "plutotv_custom.m3u";

/// Region code to display name, used for group titles
pub const DEFAULT_REGION_NAMES: &[(&str, &str)] = &[
    ("us", "United States"),
    ("gb", "United Kingdom"),
    ("ca", "Canada"),
    ("de", "Germany"),
    ("at", "Austria"),
    ("ch", "Switzerland"),
    ("es", "Spain"),
    ("fr", "France"),
    ("it", "Italy"),
    ("br", "Brazil"),
    ("mx", "Mexico"),
    ("ar", "Argentina"),
    ("cl", "Chile"),
    ("co", "Colombia"),
    ("pe", "Peru"),
    ("se", "Sweden"),
    ("no", "Norway"),
    ("dk", "Denmark"),
    ("in", "India"),
    ("jp", "Japan"),
    ("kr", "South Korea"),
    ("au", "Australia"),
];
