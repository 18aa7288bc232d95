mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./watchtrail.toml",
        "~/.config/watchtrail/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Write a config to a TOML file, replacing any existing content
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let player = &config.player;

    if !player.seek_step_secs.is_finite() || player.seek_step_secs <= 0.0 {
        anyhow::bail!("Seek step must be positive, got {}", player.seek_step_secs);
    }

    if !(0.0..=1.0).contains(&player.min_volume) || !(0.0..=1.0).contains(&player.max_volume) {
        anyhow::bail!(
            "Volume bounds must lie within [0, 1], got [{}, {}]",
            player.min_volume,
            player.max_volume
        );
    }

    if player.min_volume > player.max_volume {
        anyhow::bail!(
            "Minimum volume {} exceeds maximum volume {}",
            player.min_volume,
            player.max_volume
        );
    }

    if !(player.min_volume..=player.max_volume).contains(&player.default_volume) {
        anyhow::bail!(
            "Default volume {} is outside [{}, {}]",
            player.default_volume,
            player.min_volume,
            player.max_volume
        );
    }

    if player.save_interval_ms == 0 {
        anyhow::bail!("Save interval cannot be 0");
    }

    if !player.seek_gap_secs.is_finite() || player.seek_gap_secs <= 0.0 {
        anyhow::bail!("Seek gap must be positive, got {}", player.seek_gap_secs);
    }

    if config.heatmap.buckets == 0 {
        anyhow::bail!("Heatmap bucket count cannot be 0");
    }

    if config.store.collection.trim().is_empty() {
        anyhow::bail!("Store collection name cannot be empty");
    }

    if config.store.timeout_secs == 0 {
        tracing::warn!("Store timeout is 0; every request will time out immediately");
    }

    Ok(())
}
