//! In-memory channel catalog decoded from the feed
//!
//! The feed is `{"regions": {code: region}}` where a region is either
//! `{"channels": {id: channel}, ...}` or directly `{id: channel}`.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub logo: String,
}

/// Channels of one region keyed by id; no order until [`Region::sorted_by_name`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    channels: HashMap<String, Channel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    regions: HashMap<String, Region>,
}

#[derive(Debug, Deserialize)]
struct ChannelRecord {
    name: String,
    #[serde(default)]
    logo: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegionRecord {
    Wrapped {
        channels: HashMap<String, ChannelRecord>,
    },
    Flat(HashMap<String, ChannelRecord>),
}

impl RegionRecord {
    fn into_channels(self) -> HashMap<String, ChannelRecord> {
        match self {
            Self::Wrapped { channels } => channels,
            Self::Flat(channels) => channels,
        }
    }
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>, logo: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: logo.into(),
        }
    }
}

impl Region {
    pub fn from_channels(channels: impl IntoIterator<Item = Channel>) -> Self {
        Self {
            channels: channels
                .into_iter()
                .map(|channel| (channel.id.clone(), channel))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn get(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.get(channel_id)
    }

    /// Channels ordered by raw name (byte-wise, case-sensitive), ties by id
    pub fn sorted_by_name(&self) -> Vec<&Channel> {
        let mut channels: Vec<&Channel> = self.channels.values().collect();
        channels.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        channels
    }
}

impl Catalog {
    pub fn from_regions(regions: impl IntoIterator<Item = (String, Region)>) -> Self {
        Self {
            regions: regions.into_iter().collect(),
        }
    }

    /// Decode the top-level feed document
    pub fn from_feed(feed: &Value) -> Result<Self, CatalogError> {
        let regions = feed
            .get("regions")
            .and_then(Value::as_object)
            .ok_or(CatalogError::MissingRegions)?;

        let mut decoded = HashMap::with_capacity(regions.len());
        for (code, raw_region) in regions {
            let record = RegionRecord::deserialize(raw_region).map_err(|e| {
                CatalogError::MalformedRegion {
                    region: code.clone(),
                    message: e.to_string(),
                }
            })?;

            let channels = record
                .into_channels()
                .into_iter()
                .map(|(id, record)| Channel {
                    id,
                    name: record.name,
                    logo: record.logo.unwrap_or_default(),
                });
            decoded.insert(code.clone(), Region::from_channels(channels));
        }

        Ok(Self { regions: decoded })
    }

    pub fn region(&self, code: &str) -> Option<&Region> {
        self.regions.get(code)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn channel_count(&self) -> usize {
        self.regions.values().map(Region::len).sum()
    }
}
