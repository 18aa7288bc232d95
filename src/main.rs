mod cli;

use watchtrail::{
    config,
    format::format_time,
    heatmap::{build_heatmap, watched_fraction, HeatmapChart},
    history::HistoryClient,
    WatchSegment,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "watchtrail=trace,watchtrail_common=debug".to_string()
        } else {
            "watchtrail=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::History { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(show_history(cli.config.as_deref(), json))
        }
        Commands::Heatmap {
            duration,
            buckets,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(show_heatmap(cli.config.as_deref(), duration, buckets, json))
        }
        Commands::Save { segments } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(save_segments(cli.config.as_deref(), &segments))
        }
        Commands::Format { seconds } => {
            println!("{}", format_time(seconds));
            Ok(())
        }
        Commands::Init { path, force } => init_config(&path, force),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("watchtrail {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn show_history(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let client = HistoryClient::from_config(&config.store);

    let segments = client.get_history().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(());
    }

    println!("Segments: {}", segments.len());
    for (i, segment) in segments.iter().enumerate() {
        println!(
            "  [{}] {} - {}",
            i,
            format_time(segment.start),
            format_time(segment.end)
        );
    }

    Ok(())
}

async fn show_heatmap(
    config_path: Option<&Path>,
    duration: f64,
    buckets: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let client = HistoryClient::from_config(&config.store);
    let buckets = buckets.unwrap_or(config.heatmap.buckets);

    let segments = client.get_history().await?;
    let series = build_heatmap(&segments, duration, buckets)?;

    if json {
        let chart = HeatmapChart::new(&series, &config.chart);
        println!("{}", serde_json::to_string_pretty(&chart)?);
        return Ok(());
    }

    println!(
        "Watched: {:.1}% of {}",
        watched_fraction(&segments, duration) * 100.0,
        format_time(duration)
    );
    for (label, value) in series.labels.iter().zip(&series.values) {
        println!("  {:>8}  {:>5.1}%", format_time(*label), value * 100.0);
    }

    Ok(())
}

async fn save_segments(config_path: Option<&Path>, raw: &[String]) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let segments = raw
        .iter()
        .map(|s| parse_segment(s))
        .collect::<Result<Vec<_>>>()?;

    let client = HistoryClient::from_config(&config.store);
    let id = client.save_segments(&segments).await?;

    println!("Saved {} segments as {}", segments.len(), id);
    Ok(())
}

fn parse_segment(raw: &str) -> Result<WatchSegment> {
    let (start, end) = raw
        .split_once('-')
        .with_context(|| format!("Segment must look like START-END: {:?}", raw))?;
    let start: f64 = start
        .trim()
        .parse()
        .with_context(|| format!("Invalid segment start: {:?}", raw))?;
    let end: f64 = end
        .trim()
        .parse()
        .with_context(|| format!("Invalid segment end: {:?}", raw))?;
    Ok(WatchSegment::new(start, end)?)
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {:?} (use --force to overwrite)",
            path
        );
    }

    config::save_config(path, &config::Config::default())?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(path)?;

    println!("Configuration is valid!");
    println!("  Store: {}", config.store.base_url);
    println!("  Collection: {}", config.store.collection);
    println!("  Save interval: {} ms", config.player.save_interval_ms);
    println!("  Heatmap buckets: {}", config.heatmap.buckets);

    Ok(())
}
