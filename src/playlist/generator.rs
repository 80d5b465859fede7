//! Selection, numbering and rendering of the playlist
//!
//! Regions are walked in configured order and channels within a region by
//! name. One counter runs across all regions, so the numbers of the selected
//! channels always form a gap-free run starting at `start_channel_number`.

use tracing::{debug, info};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::filter::KeywordSet;
use crate::models::{Catalog, Channel};
use crate::playlist::format::{ExtinfFields, extinf_line, header_line, stream_url};
use crate::playlist::ids::IdGenerator;

/// One selected channel, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub channel_number: u32,
    pub channel_id: String,
    pub region_code: String,
    pub display_name: String,
    pub logo: String,
    pub group_title: String,
    pub stream_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPlaylist {
    /// Full file contents, header included
    pub content: String,
    pub entries: Vec<PlaylistEntry>,
}

impl PlaylistEntry {
    /// `{channelId}-{regionCode}`, unique across regions
    pub fn composite_id(&self) -> String {
        format!("{}-{}", self.channel_id, self.region_code)
    }

    /// `#EXTINF` line followed by the stream URL line
    pub fn render(&self) -> String {
        let mut rendered = extinf_line(&ExtinfFields {
            channel_id: &self.composite_id(),
            tvg_id: &self.channel_id,
            channel_number: self.channel_number,
            name: &self.display_name,
            logo: &self.logo,
            group_title: &self.group_title,
        });
        rendered.push_str(&self.stream_url);
        rendered.push('\n');
        rendered
    }
}

impl RenderedPlaylist {
    pub fn channel_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sequential channel numbers starting at a fixed offset.
/// `next` is `None` once `u32::MAX` has been handed out.
#[derive(Debug, Clone)]
struct ChannelNumbering {
    next: Option<u32>,
}

impl ChannelNumbering {
    fn starting_at(start: u32) -> Self {
        Self { next: Some(start) }
    }

    fn assign(&mut self) -> AppResult<u32> {
        let number = self.next.ok_or_else(|| {
            AppError::configuration(
                "playlist.start_channel_number leaves no room for the selected channels",
            )
        })?;
        self.next = number.checked_add(1);
        Ok(number)
    }
}

fn build_entry(
    channel: &Channel,
    region_code: &str,
    group_title: &str,
    channel_number: u32,
    user_agent: &str,
    ids: &dyn IdGenerator,
) -> PlaylistEntry {
    let device_id = ids.next_id();
    let session_id = ids.next_id();
    PlaylistEntry {
        channel_number,
        channel_id: channel.id.clone(),
        region_code: region_code.to_string(),
        display_name: channel.name.clone(),
        logo: channel.logo.clone(),
        group_title: group_title.to_string(),
        stream_url: stream_url(&channel.id, &device_id, &session_id, user_agent),
    }
}

/// Select channels matching `keywords` in the configured regions and render them.
/// Fails if the selection runs past the largest channel number.
pub fn render(
    catalog: &Catalog,
    keywords: &KeywordSet,
    config: &Config,
    ids: &dyn IdGenerator,
) -> AppResult<RenderedPlaylist> {
    let playlist = &config.playlist;
    let mut numbering = ChannelNumbering::starting_at(playlist.start_channel_number);
    let mut content = header_line(&config.feed.epg_url);
    let mut entries = Vec::new();

    for region_code in &playlist.target_regions {
        let Some(region) = catalog.region(region_code) else {
            debug!("Region '{}' not present in catalog, skipping", region_code);
            continue;
        };
        let group_title = playlist.group_title(region_code);

        let before = entries.len();
        for channel in region.sorted_by_name() {
            if !keywords.matches(&channel.name) {
                continue;
            }
            let entry = build_entry(
                channel,
                region_code,
                &group_title,
                numbering.assign()?,
                &config.feed.user_agent,
                ids,
            );
            content.push_str(&entry.render());
            entries.push(entry);
        }

        info!(
            "Region '{}': {} of {} channels selected",
            region_code,
            entries.len() - before,
            region.len()
        );
    }

    Ok(RenderedPlaylist { content, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;
    use crate::playlist::ids::SequentialIdGenerator;

    fn catalog(regions: Vec<(&str, Vec<Channel>)>) -> Catalog {
        Catalog::from_regions(
            regions
                .into_iter()
                .map(|(code, channels)| (code.to_string(), Region::from_channels(channels))),
        )
    }

    fn config(regions: &[&str], start: u32) -> Config {
        let mut config = Config::default();
        config.playlist.target_regions = regions.iter().map(|r| r.to_string()).collect();
        config.playlist.start_channel_number = start;
        config.feed.epg_url = "EPG".to_string();
        config.feed.user_agent = "UA".to_string();
        config
    }

    #[test]
    fn test_numbering_runs_across_regions_without_reset() {
        let catalog = catalog(vec![
            (
                "us",
                vec![
                    Channel::new("u1", "Kids One", ""),
                    Channel::new("u2", "News", ""),
                    Channel::new("u3", "Kids Two", ""),
                ],
            ),
            ("gb", vec![Channel::new("g1", "Kids UK", "")]),
        ]);
        let keywords = KeywordSet::from_keywords(["kids"]);
        let ids = SequentialIdGenerator::default();

        let rendered = render(&catalog, &keywords, &config(&["gb", "us"], 50), &ids).unwrap();

        let numbered: Vec<(u32, &str)> = rendered
            .entries
            .iter()
            .map(|e| (e.channel_number, e.channel_id.as_str()))
            .collect();
        assert_eq!(numbered, vec![(50, "g1"), (51, "u1"), (52, "u3")]);
    }

    #[test]
    fn test_group_title_and_composite_id() {
        let catalog = catalog(vec![
            ("us", vec![Channel::new("c1", "Cartoons", "")]),
            ("zz", vec![Channel::new("c2", "Cartoons ZZ", "")]),
        ]);
        let keywords = KeywordSet::from_keywords(["cartoon"]);
        let ids = SequentialIdGenerator::default();

        let rendered = render(&catalog, &keywords, &config(&["us", "zz"], 1), &ids).unwrap();

        assert_eq!(rendered.entries[0].group_title, "Pluto United States");
        assert_eq!(rendered.entries[0].composite_id(), "c1-us");
        assert_eq!(rendered.entries[1].group_title, "Pluto ZZ");
    }

    #[test]
    fn test_each_entry_gets_two_fresh_ids() {
        let catalog = catalog(vec![(
            "us",
            vec![Channel::new("a", "Kids A", ""), Channel::new("b", "Kids B", "")],
        )]);
        let keywords = KeywordSet::from_keywords(["kids"]);
        let ids = SequentialIdGenerator::starting_at(1);

        let rendered = render(&catalog, &keywords, &config(&["us"], 1), &ids).unwrap();

        assert!(rendered.entries[0].stream_url.contains("deviceId=00000000-0000-0000-0000-000000000001"));
        assert!(rendered.entries[0].stream_url.contains("sid=00000000-0000-0000-0000-000000000002"));
        assert!(rendered.entries[1].stream_url.contains("deviceId=00000000-0000-0000-0000-000000000003"));
        assert!(rendered.entries[1].stream_url.ends_with("|User-Agent=UA"));
    }

    #[test]
    fn test_missing_region_and_no_matches() {
        let catalog = catalog(vec![("us", vec![Channel::new("a", "News", "")])]);
        let keywords = KeywordSet::from_keywords(["kids"]);
        let ids = SequentialIdGenerator::default();

        let rendered = render(&catalog, &keywords, &config(&["ca", "us"], 1), &ids).unwrap();

        assert!(rendered.is_empty());
        assert_eq!(rendered.content, "#EXTM3U url-tvg=\"EPG\"\n");
    }

    #[test]
    fn test_last_channel_number_can_be_assigned() {
        let catalog = catalog(vec![("us", vec![Channel::new("a", "Kids A", "")])]);
        let keywords = KeywordSet::from_keywords(["kids"]);
        let ids = SequentialIdGenerator::default();

        let rendered = render(&catalog, &keywords, &config(&["us"], u32::MAX), &ids).unwrap();

        assert_eq!(rendered.entries[0].channel_number, u32::MAX);
    }

    #[test]
    fn test_running_past_last_channel_number_is_an_error() {
        let catalog = catalog(vec![(
            "us",
            vec![Channel::new("a", "Kids A", ""), Channel::new("b", "Kids B", "")],
        )]);
        let keywords = KeywordSet::from_keywords(["kids"]);
        let ids = SequentialIdGenerator::default();

        let result = render(&catalog, &keywords, &config(&["us"], u32::MAX), &ids);

        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }
}
