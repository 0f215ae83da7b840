use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod catalog;
mod client;
mod config;
mod error;
mod models;
mod playlist;
mod tempo;


use crate::catalog::{AugmentSource, Catalog, CuratedCatalog};
use crate::client::CatalogClient;
use crate::config::load_config;
use crate::playlist::naming::format_duration;
use crate::playlist::{EngineConfig, PlaylistGenerator, UnknownTempoPolicy};
use crate::tempo::{NoTempo, StaticTempoTable, TempoProvider};

#[derive(Parser)]
#[command(name = "tempo-mix")]
#[command(about = "Build a running playlist matched to distance and intensity")]
#[command(version)]
struct Args {
    /// Path to the track catalog JSON file
    #[arg(long = "catalog")]
    catalog_file: String,

    /// Planned distance: short, medium or long
    #[arg(long, default_value = "medium")]
    distance: String,

    /// Desired intensity: low, medium or high
    #[arg(long, default_value = "medium")]
    intensity: String,

    /// Engine configuration JSON (bucket tables, selector settings)
    #[arg(long = "engine-config")]
    engine_config: Option<String>,

    /// Tempo dataset JSON used to look up unknown tempos
    #[arg(long = "tempo-table")]
    tempo_table: Option<String>,

    /// Curated per-tempo lists used to top up short playlists
    #[arg(long = "curated", conflicts_with = "remote")]
    curated_file: Option<String>,

    /// Top up short playlists by searching the remote catalog
    #[arg(long)]
    remote: bool,

    /// Tempo to assume for tracks no source knows
    #[arg(long = "assume-bpm")]
    assume_bpm: Option<f32>,

    /// Enable debug output
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Quiet mode - reduce output verbosity
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn init_logging(args: &Args) {
    let default_filter = if args.debug {
        "info,tempo_mix=debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    if !std::path::Path::new(&args.catalog_file).exists() {
        return Err(anyhow::anyhow!(
            "Catalog file '{}' not found",
            args.catalog_file
        ));
    }

    let mut engine_config = match &args.engine_config {
        Some(path) => EngineConfig::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load engine configuration '{}': {}", path, e))?,
        None => EngineConfig::default(),
    };
    if let Some(bpm) = args.assume_bpm {
        engine_config.normalizer.unknown_tempo = UnknownTempoPolicy::AssumeBpm(bpm);
    }

    let provider: Box<dyn TempoProvider> = match &args.tempo_table {
        Some(path) => Box::new(StaticTempoTable::load_from_file(path)?),
        None => Box::new(NoTempo),
    };

    let augment_source: Option<Box<dyn AugmentSource>> = if args.remote {
        Some(Box::new(CatalogClient::new(load_config()?)))
    } else if let Some(path) = &args.curated_file {
        Some(Box::new(CuratedCatalog::load_from_file(path)?))
    } else {
        None
    };

    let catalog = Catalog::load_from_file(&args.catalog_file)?;
    if catalog.is_empty() {
        tracing::warn!("Catalog {} has no tracks", args.catalog_file);
    }
    if !args.quiet {
        println!("Loaded {} tracks from {}", catalog.len(), args.catalog_file);
    }

    let mut generator = PlaylistGenerator::new(engine_config, provider);
    if let Some(source) = augment_source {
        generator = generator.with_augment_source(source);
    }

    let playlist = generator.generate(&catalog, &args.distance, &args.intensity);

    println!("\n{}", playlist.title);
    println!("{}", "=".repeat(playlist.title.len()));
    println!("{}", playlist.artist_summary);

    if playlist.is_empty() {
        return Ok(());
    }

    let metadata = &playlist.metadata;
    let bpm_range = metadata
        .bpm_range
        .map(|(lo, hi)| format!("{lo:.0}-{hi:.0}"))
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "Songs: {} | Duration: {} | Avg BPM: {:.1} | BPM Range: {} | Artists: {}",
        metadata.total_tracks,
        format_duration(metadata.total_duration),
        metadata.average_bpm,
        bpm_range,
        metadata.artist_count
    );

    if !args.quiet {
        println!();
        for (i, selected) in playlist.tracks.iter().enumerate() {
            let track = &selected.track;
            let tempo = track
                .tempo_bpm
                .map(|bpm| format!("{bpm:.0}bpm"))
                .unwrap_or_else(|| "?bpm".to_string());
            println!(
                "{:>3}. \"{}\" by {} [{}] {} ({})",
                i + 1,
                track.title,
                track.artist,
                tempo,
                format_duration(track.duration_seconds),
                selected.reason
            );
            if args.debug {
                println!(
                    "     ID: {} | Playback: {}",
                    track.id,
                    track.playback_ref.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
