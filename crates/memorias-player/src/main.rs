/// Memórias: point-and-click room adventure
///
/// Architecture:
///   assets/   : map documents (Tiled JSON) and PNG bitmaps
///   engine/   : window, framebuffer, font, game loop
///   game/     : rooms, hotspots, dialog box, puzzles

mod assets;
mod engine;
mod game;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use memorias_common::GameConfig;

#[derive(Parser, Debug)]
#[command(name = "memorias", version, about = "Point-and-click room adventure")]
struct Args {
    /// Config file (missing file → defaults)
    #[arg(long, default_value = "memorias.toml")]
    config: PathBuf,
    /// Asset directory with maps/ and images/
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Room loaded after start-up (1-4)
    #[arg(long)]
    room: Option<u8>,
    /// Integer window scale
    #[arg(long)]
    scale: Option<u32>,
    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (config, from_file) = load_config(&args)?;

    // The subscriber needs the configured level, so config loading itself
    // is reported afterwards
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(config.log_level.parse()?))
        .init();

    tracing::info!("Memórias v{}", env!("CARGO_PKG_VERSION"));
    if from_file {
        tracing::info!("Loaded config from {}", args.config.display());
    } else {
        tracing::debug!("No config at {}, using defaults", args.config.display());
    }

    let asset_store = match find_asset_dir(&args, &config) {
        Some(dir) => assets::AssetStore::load(&dir)
            .with_context(|| format!("Failed to load assets from {}", dir.display()))?,
        None => {
            tracing::warn!("No asset directory found, running with bundled maps and placeholder art");
            assets::AssetStore::bundled()
        }
    };
    let source = asset_store
        .asset_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());
    tracing::info!(
        "Loaded {} maps and {} images ({})",
        asset_store.total_maps(),
        asset_store.total_images(),
        source
    );

    engine::run(asset_store, &config)
}

/// Config file, then command-line overrides. The flag tells whether a
/// config file was read.
fn load_config(args: &Args) -> Result<(GameConfig, bool)> {
    let loaded = GameConfig::load(&args.config)
        .with_context(|| format!("Invalid config {}", args.config.display()))?;
    let from_file = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    if let Some(dir) = &args.assets {
        config.asset_dir = Some(dir.clone());
    }
    if let Some(room) = args.room {
        config.start_room = room;
    }
    if let Some(scale) = args.scale {
        config.window_scale = scale;
    }
    if args.fullscreen {
        config.fullscreen = true;
    }
    config.validate().context("Invalid command-line options")?;
    Ok((config, from_file))
}

/// Locate the asset directory. Priority:
/// 1. `--assets` / `asset_dir` from the config
/// 2. `assets/` next to the working directory or the executable
/// 3. The crate's own `assets/` (running from a checkout)
fn find_asset_dir(args: &Args, config: &GameConfig) -> Option<PathBuf> {
    if let Some(dir) = args.assets.as_ref().or(config.asset_dir.as_ref()) {
        if dir.is_dir() {
            return Some(dir.clone());
        }
        tracing::warn!("Specified asset directory not found: {}", dir.display());
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let candidates = [
        cwd.join("assets"),
        exe_dir.join("assets"),
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"),
    ];
    candidates.into_iter().find(|dir| dir.join("maps").is_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_apply_on_top_of_defaults() {
        let args = Args::parse_from([
            "memorias",
            "--config",
            "/nonexistent/memorias.toml",
            "--room",
            "3",
            "--scale",
            "2",
        ]);
        let (config, from_file) = load_config(&args).unwrap();
        assert!(!from_file);
        assert_eq!(config.start_room, 3);
        assert_eq!(config.window_scale, 2);
    }

    #[test]
    fn config_file_is_reported_as_read() {
        let dir = std::env::temp_dir().join("memorias_main_config");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("memorias.toml");
        std::fs::write(&path, "language = \"english\"\n").unwrap();

        let args = Args::parse_from(["memorias", "--config", path.to_str().unwrap()]);
        let (config, from_file) = load_config(&args).unwrap();
        assert!(from_file);
        assert_eq!(config.language, memorias_common::Language::English);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bad_room_override_is_rejected() {
        let args = Args::parse_from(["memorias", "--config", "/nonexistent/m.toml", "--room", "0"]);
        assert!(load_config(&args).is_err());
    }
}
