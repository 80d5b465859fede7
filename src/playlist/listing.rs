//! Operator-facing channel name listings
//!
//! Both listings use the same name ordering as the playlist itself.

use crate::config::PlaylistConfig;
use crate::models::Catalog;

/// Discovery-mode listing: every channel name per target region
pub fn discovery_listing(catalog: &Catalog, target_regions: &[String]) -> String {
    let mut out = String::new();
    for region_code in target_regions {
        out.push_str(&format!("\n--- {} ---\n", region_code.to_uppercase()));
        if let Some(region) = catalog.region(region_code) {
            for channel in region.sorted_by_name() {
                out.push_str(&channel.name);
                out.push('\n');
            }
        }
    }
    out
}

/// Explorer report with per-region counts and a grand total.
/// Regions without channels are left out.
pub fn explorer_report(catalog: &Catalog, playlist: &PlaylistConfig) -> String {
    let rule = "=".repeat(60);
    let mut out = format!(
        "{rule}\n      PLUTO TV CHANNEL EXPLORER (Targeted Regions)\n{rule}\n\
         Copy the names below and paste them into your {} file.\n",
        playlist.keywords_file.display()
    );

    let mut total = 0;
    for region_code in &playlist.target_regions {
        let Some(region) = catalog.region(region_code).filter(|r| !r.is_empty()) else {
            continue;
        };

        out.push_str(&format!(
            "\n[ {} ] - {} Channels Available\n{}\n",
            playlist.region_display_name(region_code).to_uppercase(),
            region.len(),
            "-".repeat(40)
        ));
        for channel in region.sorted_by_name() {
            out.push_str(&channel.name);
            out.push('\n');
            total += 1;
        }
    }

    out.push_str(&format!(
        "\n{rule}\nTotal Channels Found across {} regions: {}\n{rule}\n",
        playlist.target_regions.len(),
        total
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, Region};

    fn catalog() -> Catalog {
        Catalog::from_regions([
            (
                "us".to_string(),
                Region::from_channels([
                    Channel::new("1", "bravo", ""),
                    Channel::new("2", "Alpha", ""),
                    Channel::new("3", "Charlie", ""),
                ]),
            ),
            ("gb".to_string(), Region::default()),
        ])
    }

    #[test]
    fn test_discovery_listing_sorts_by_raw_name() {
        let listing = discovery_listing(&catalog(), &["us".to_string(), "ca".to_string()]);
        assert_eq!(listing, "\n--- US ---\nAlpha\nCharlie\nbravo\n\n--- CA ---\n");
    }

    #[test]
    fn test_explorer_report_counts_and_skips_empty_regions() {
        let playlist = PlaylistConfig {
            target_regions: vec!["us".to_string(), "gb".to_string()],
            ..PlaylistConfig::default()
        };

        let report = explorer_report(&catalog(), &playlist);

        assert!(report.contains("[ UNITED STATES ] - 3 Channels Available"));
        assert!(!report.contains("UNITED KINGDOM"));
        assert!(report.contains("Total Channels Found across 2 regions: 3"));
        let names: Vec<&str> = report
            .lines()
            .skip_while(|l| !l.starts_with("----"))
            .skip(1)
            .take(3)
            .collect();
        assert_eq!(names, vec!["Alpha", "Charlie", "bravo"]);
    }
}
