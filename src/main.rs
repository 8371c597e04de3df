//! Trackart - resolve track artwork from the command line
//!
//! Runs the same cached lookup a notification would, once per track
//! argument, in order.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use trackart::{
    ArtworkCache, ArtworkOrigin, ArtworkResolver, ArtworkSettings, MediaTypeSniffer,
};

#[derive(Parser)]
#[command(name = "trackart")]
#[command(version)]
#[command(about = "Resolve track artwork from embedded pictures or cover files")]
struct Cli {
    /// Path to a settings JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Music root directory, overrides the settings file
    #[arg(short, long)]
    music_dir: Option<PathBuf>,

    /// Log every lookup step
    #[arg(short, long)]
    verbose: bool,

    /// Track paths relative to the music root
    #[arg(required = true)]
    uris: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let settings = match &cli.config {
        Some(path) => ArtworkSettings::load_from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => ArtworkSettings::load(),
    };

    let music_dir = cli
        .music_dir
        .or(settings.music_dir.clone())
        .context("No music directory given")?;

    let scanner = settings.scanner().context("Failed to build artwork scanner")?;

    let mut sniffer = MediaTypeSniffer::new();
    if let Err(e) = sniffer.init(settings.embedded_media_types.as_slice()) {
        tracing::warn!("Embedded artwork disabled: {}", e);
    }

    let mut cache = ArtworkCache::new(ArtworkResolver::new(sniffer, scanner));

    for uri in &cli.uris {
        match cache.lookup(&music_dir, uri) {
            Some(artwork) => {
                let origin = match artwork.origin() {
                    ArtworkOrigin::Embedded => "embedded".to_string(),
                    ArtworkOrigin::Directory(path) => path.display().to_string(),
                };
                println!("{}: {}x{} ({})", uri, artwork.width(), artwork.height(), origin);
            }
            None => println!("{}: no artwork", uri),
        }
    }

    cache.resolver_mut().sniffer_mut().teardown();
    Ok(())
}
