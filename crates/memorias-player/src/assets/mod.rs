//! Asset store: map documents and bitmaps, looked up by string key
//!
//! Layout on disk:
//!   <assets>/maps/<key>.json    : one map document per room / custom map
//!   <assets>/images/<key>.png   : backgrounds (`bg1`..`bg4`, `caixaclara`) and
//!                                 puzzle pieces (`puzzle_piece_1`..`4`)
//!
//! The room maps are also compiled into the binary, so the game runs (with
//! placeholder art) even when no asset directory is found.

pub mod bitmap;
pub mod map;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::engine::{SCREEN_HEIGHT, SCREEN_WIDTH};
use bitmap::DecodedBitmap;
use map::MapDocument;

const BUNDLED_MAPS: [(&str, &str); 5] = [
    ("mapa1", include_str!("../../assets/maps/mapa1.json")),
    ("mapa2", include_str!("../../assets/maps/mapa2.json")),
    ("mapa3", include_str!("../../assets/maps/mapa3.json")),
    ("mapa4", include_str!("../../assets/maps/mapa4.json")),
    ("caixaclara", include_str!("../../assets/maps/caixaclara.json")),
];

/// Central asset store
#[derive(Default)]
pub struct AssetStore {
    maps: HashMap<String, MapDocument>,
    images: HashMap<String, DecodedBitmap>,
    /// Directory the assets were loaded from (None → bundled only)
    pub asset_dir: Option<PathBuf>,
}

impl AssetStore {
    /// Maps compiled into the binary, no images
    pub fn bundled() -> Self {
        let mut store = Self::default();
        for (key, text) in BUNDLED_MAPS {
            match MapDocument::parse(text) {
                Ok(doc) => store.insert_map(key, doc),
                Err(e) => tracing::warn!("Bundled map '{}' is malformed: {}", key, e),
            }
        }
        store
    }

    /// Bundled maps, overridden by whatever the asset directory provides
    pub fn load(asset_dir: &Path) -> Result<Self> {
        let mut store = Self::bundled();
        store.asset_dir = Some(asset_dir.to_path_buf());

        let maps_dir = asset_dir.join("maps");
        if maps_dir.is_dir() {
            for path in files_with_extension(&maps_dir, "json")? {
                let Some(key) = file_key(&path) else { continue };
                match MapDocument::load(&path) {
                    Ok(doc) => {
                        tracing::info!("Map '{}': {} objects", key, doc.objects().count());
                        store.insert_map(&key, doc);
                    }
                    Err(e) => tracing::warn!("Failed to load {}: {}", path.display(), e),
                }
            }
        } else {
            tracing::warn!("No maps/ in {}, using bundled maps", asset_dir.display());
        }

        let images_dir = asset_dir.join("images");
        if images_dir.is_dir() {
            for path in files_with_extension(&images_dir, "png")? {
                let Some(key) = file_key(&path) else { continue };
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                match bitmap::decode_png(&bytes) {
                    Ok(bmp) => {
                        tracing::debug!("Image '{}': {}×{}", key, bmp.width, bmp.height);
                        store.insert_image(&key, bmp);
                    }
                    Err(e) => tracing::warn!("Failed to decode {}: {}", path.display(), e),
                }
            }
        }

        Ok(store)
    }

    pub fn insert_map(&mut self, key: &str, doc: MapDocument) {
        self.maps.insert(key.to_string(), doc);
    }

    pub fn insert_image(&mut self, key: &str, bmp: DecodedBitmap) {
        self.images.insert(key.to_string(), bmp);
    }

    pub fn map(&self, key: &str) -> Option<&MapDocument> {
        self.maps.get(key)
    }

    pub fn image(&self, key: &str) -> Option<&DecodedBitmap> {
        self.images.get(key)
    }

    pub fn total_maps(&self) -> usize {
        self.maps.len()
    }

    pub fn total_images(&self) -> usize {
        self.images.len()
    }

    /// Full-screen background for `key`, stretched to the logical display.
    /// Falls back to a placeholder tinted per key.
    pub fn background(&self, key: &str) -> DecodedBitmap {
        let (w, h) = (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
        match self.images.get(key) {
            Some(bmp) => bmp.resized(w, h),
            None => {
                tracing::warn!("Background '{}' missing, using placeholder", key);
                DecodedBitmap::placeholder(w, h, placeholder_tint(key))
            }
        }
    }
}

/// Deterministic muted color per key so placeholder rooms look different
pub fn placeholder_tint(key: &str) -> [u8; 3] {
    let hash = key
        .bytes()
        .fold(2166136261u32, |h, b| (h ^ b as u32).wrapping_mul(16777619));
    [
        40 + (hash & 0x3F) as u8,
        40 + ((hash >> 8) & 0x3F) as u8,
        40 + ((hash >> 16) & 0x3F) as u8,
    ]
}

fn file_key(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to list {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(ext))
            .unwrap_or(false);
        if path.is_file() && matches {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
