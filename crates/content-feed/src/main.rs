//! Content feed CLI application.
//!
//! Pages through the score-sorted catalog of one media type and prints the
//! accumulated cards.

use anyhow::{Context, Result};
use clap::Parser;
use content_feed::{ContentListService, HttpTransport, LoadOutcome, PreviewTransport, Transport};
use shared::{Config, ContentCard, MediaType};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Catalog to browse (anime or manga)
    #[arg(short, long, default_value = "anime")]
    media_type: MediaType,

    /// Maximum number of pages to load
    #[arg(short, long, default_value_t = 1)]
    pages: u32,

    /// Serve a fixed offline catalog instead of calling the endpoint
    #[arg(long)]
    preview: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let mut log_config = shared::LogConfig::from_config(&config, "content-feed");
    if args.verbose {
        log_config.default_level = tracing::Level::DEBUG;
    }
    shared::logging::init(log_config)?;

    info!(
        config_file = %args.config.display(),
        media_type = %args.media_type,
        pages = args.pages,
        preview = args.preview,
        "Content feed starting"
    );

    if args.preview {
        let service = ContentListService::from_config(PreviewTransport, &config.catalog);
        browse(&service, args.media_type, args.pages).await;
    } else {
        let transport =
            HttpTransport::from_config(&config.catalog).context("Failed to create transport")?;
        let service = ContentListService::from_config(transport, &config.catalog);
        browse(&service, args.media_type, args.pages).await;
    }

    Ok(())
}

/// Load up to `pages` pages of `media_type`, then print the list
async fn browse<T: Transport>(service: &ContentListService<T>, media_type: MediaType, pages: u32) {
    service.set_active_type(media_type);
    let mut errors = service.subscribe_errors();

    for _ in 0..pages {
        if !service.can_load_more() {
            info!(media_type = %media_type, "No more pages");
            break;
        }

        match service.load_more().await {
            LoadOutcome::Loaded { page, added, .. } => {
                info!(page, added, "Page added to list");
            }
            LoadOutcome::Failed(e) => {
                warn!(error = %e, "Page skipped");
            }
            LoadOutcome::Busy | LoadOutcome::Closed => break,
        }

        while let Ok(event) = errors.try_recv() {
            eprintln!("page {}: {}", event.page, event.message);
        }
    }

    render(&service.content_list());
    service.close();
}

fn render(cards: &[ContentCard]) {
    if cards.is_empty() {
        println!("Nothing to show.");
        return;
    }

    for (idx, card) in cards.iter().enumerate() {
        println!(
            "#{:<3} {:>3}  {}  {}",
            idx + 1,
            card.average_score(),
            card.title(),
            card.cover_url()
        );
    }
}
