use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pluto_m3u::{
    config::Config,
    pipeline::{PlaylistPipeline, RunOutcome},
};

#[derive(Parser)]
#[command(name = "pluto-m3u")]
#[command(version)]
#[command(about = "Builds a filtered, renumbered M3U playlist from the PlutoTV channel feed")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,

    /// Output directory (overrides config file)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Keyword file (overrides config file)
    #[arg(short, long, value_name = "FILE")]
    keywords: Option<PathBuf>,

    /// First channel number (overrides config file)
    #[arg(short = 's', long, value_name = "NUMBER")]
    start_number: Option<u32>,

    /// Target region, repeatable and ordered (overrides config file)
    #[arg(short, long = "region", value_name = "CODE")]
    regions: Vec<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the playlist (default)
    Generate,
    /// List channel names per target region without writing anything
    Explore,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(output_dir) = &self.output_dir {
            config.playlist.output_dir = output_dir.clone();
        }
        if let Some(keywords) = &self.keywords {
            config.playlist.keywords_file = keywords.clone();
        }
        if let Some(start_number) = self.start_number {
            config.playlist.start_channel_number = start_number;
        }
        if !self.regions.is_empty() {
            config.playlist.target_regions = self.regions.iter().map(|r| r.to_lowercase()).collect();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_filter = format!("pluto_m3u={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pluto-m3u v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);
    cli.apply_overrides(&mut config);

    let pipeline = PlaylistPipeline::from_config(config)?;

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => {
            let outcome = pipeline.run().await;
            if let RunOutcome::Written { path, .. } = &outcome {
                info!("Playlist written to {}", path.display());
            }
            info!("Process complete.");
            if outcome.is_aborted() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Explore => match pipeline.explore().await {
            Ok(report) => print!("{report}"),
            Err(e) => {
                error!("Explorer failed: {}", e);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
