//! One run of fetch → filter → number → format → write
//!
//! The output directory is wiped first. After that every outcome is logged
//! and returned as a [`RunOutcome`]; nothing is thrown to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::filter::{FilterMode, KeywordSet, create_empty_keyword_file, load_keywords};
use crate::models::Catalog;
use crate::output::OutputWriter;
use crate::playlist::{IdGenerator, RandomIdGenerator, discovery_listing, explorer_report, render};
use crate::sources::Fetcher;

#[derive(Debug)]
pub enum RunOutcome {
    /// A playlist was written
    Written {
        path: PathBuf,
        channel_count: usize,
        start_number: u32,
    },
    /// Keywords were present but nothing matched; no file written
    NoMatches,
    /// No keywords: names were listed and an empty keyword file created
    Discovery {
        keywords_file: PathBuf,
        listing: String,
    },
    /// Feed unavailable, malformed catalog or a filesystem failure
    Aborted(AppError),
}

impl RunOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted(_))
    }
}

pub struct PlaylistPipeline {
    config: Config,
    fetcher: Fetcher,
    ids: Arc<dyn IdGenerator>,
    writer: OutputWriter,
}

impl PlaylistPipeline {
    pub fn new(config: Config, fetcher: Fetcher, ids: Arc<dyn IdGenerator>) -> Self {
        let writer = OutputWriter::new(config.playlist.output_dir.clone());
        Self {
            config,
            fetcher,
            ids,
            writer,
        }
    }

    /// Pipeline with the real HTTP client and random stream identifiers
    pub fn from_config(config: Config) -> AppResult<Self> {
        config.validate()?;
        let fetcher = Fetcher::from_feed_config(&config.feed)?;
        Ok(Self::new(config, fetcher, Arc::new(RandomIdGenerator)))
    }

    pub async fn run(&self) -> RunOutcome {
        match self.try_run().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Run aborted: {}", e);
                RunOutcome::Aborted(e)
            }
        }
    }

    async fn try_run(&self) -> AppResult<RunOutcome> {
        self.writer.prepare().await?;

        let catalog = self.fetcher.fetch_catalog(&self.config.feed).await?;
        let keywords = load_keywords(&self.config.playlist.keywords_file).await?;

        match FilterMode::from_keywords(keywords) {
            FilterMode::Discovery => self.discover(&catalog).await,
            FilterMode::Selection(keywords) => self.generate(&catalog, &keywords).await,
        }
    }

    async fn discover(&self, catalog: &Catalog) -> AppResult<RunOutcome> {
        info!("!!! DISCOVERY MODE: Listing names for target regions...");
        let listing = discovery_listing(catalog, &self.config.playlist.target_regions);
        print!("{listing}");

        let keywords_file = self.config.playlist.keywords_file.clone();
        create_empty_keyword_file(&keywords_file).await?;
        Ok(RunOutcome::Discovery {
            keywords_file,
            listing,
        })
    }

    async fn generate(&self, catalog: &Catalog, keywords: &KeywordSet) -> AppResult<RunOutcome> {
        let playlist = &self.config.playlist;
        let rendered = render(catalog, keywords, &self.config, self.ids.as_ref())?;

        if rendered.is_empty() {
            info!(
                "No channels matched {} keyword(s) in {:?}; no playlist written",
                keywords.len(),
                playlist.target_regions
            );
            return Ok(RunOutcome::NoMatches);
        }

        let path = self
            .writer
            .write(&playlist.output_filename, &rendered.content)
            .await?;
        info!(
            "Generated {} with {} channels starting at {}.",
            playlist.output_filename,
            rendered.channel_count(),
            playlist.start_channel_number
        );

        Ok(RunOutcome::Written {
            path,
            channel_count: rendered.channel_count(),
            start_number: playlist.start_channel_number,
        })
    }

    /// Fetch the catalog and build the explorer report; touches no files
    pub async fn explore(&self) -> AppResult<String> {
        let catalog = self.fetcher.fetch_catalog(&self.config.feed).await?;
        Ok(explorer_report(&catalog, &self.config.playlist))
    }
}
