//! Exact line formats of the generated playlist

/// Base of every stream URL; the channel id follows
const STREAM_BASE_URL: &str = "https://service-stitcher.clusters.pluto.tv/stitch/hls/channel";

/// `#EXTM3U` header carrying the shared guide URL
pub fn header_line(epg_url: &str) -> String {
    format!("#EXTM3U url-tvg=\"{epg_url}\"\n")
}

/// Attribute values cannot contain `"`; they become `'`
pub fn escape_attribute(value: &str) -> String {
    value.replace('"', "'")
}

/// The name after the comma must not contain commas
pub fn visible_name(value: &str) -> String {
    value.replace(',', "")
}

/// Fields of one `#EXTINF` line
#[derive(Debug, Clone, Copy)]
pub struct ExtinfFields<'a> {
    pub channel_id: &'a str,
    pub tvg_id: &'a str,
    pub channel_number: u32,
    pub name: &'a str,
    pub logo: &'a str,
    pub group_title: &'a str,
}

pub fn extinf_line(fields: &ExtinfFields<'_>) -> String {
    format!(
        "#EXTINF:-1 channel-id=\"{}\" tvg-id=\"{}\" tvg-chno=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n",
        fields.channel_id,
        fields.tvg_id,
        fields.channel_number,
        escape_attribute(fields.name),
        fields.logo,
        escape_attribute(fields.group_title),
        visible_name(fields.name),
    )
}

/// Stream URL for a channel, with the client identity after `|`
pub fn stream_url(channel_id: &str, device_id: &str, session_id: &str, user_agent: &str) -> String {
    format!(
        "{STREAM_BASE_URL}/{channel_id}/master.m3u8\
         ?advertisingId=channel&appName=web&appVersion=9.1.2&deviceDNT=0&deviceId={device_id}\
         &deviceMake=Chrome&deviceModel=web&deviceType=web&deviceVersion=126.0.0&sid={session_id}\
         &userId=&serverSideAds=true|User-Agent={user_agent}"
    )
}
