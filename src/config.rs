//! Optional TOML configuration for the hero.
//!
//! Every field has a default, so an empty file (or none at all) gives the built-in
//! catalogue on a 7 second timer.
//!
//! ```toml
//! strategy = "crossfade"
//! clip_duration_ms = 6000
//! crossfade_window_ms = 700
//! random_start = true
//!
//! [palette]
//! primary = "#014987"
//!
//! [[items]]
//! source = "hangar.png"
//! headline = "Line Maintenance"
//! cta_label = "Contact Us"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::engine::{EngineSettings, Strategy};
use crate::error::{Error, Result};
use crate::media::{default_catalog, MediaItem};
use crate::palette::{ColorPalette, PaletteOverrides};
use crate::rotation::StartPolicy;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub strategy: Strategy,
    pub rotation_interval_ms: u64,
    pub crossfade_window_ms: u64,
    pub clip_duration_ms: u64,
    pub start_index: Option<usize>,
    pub random_start: bool,
    pub carousel_speed: f32,
    /// Directory relative item sources are resolved against.
    pub assets_dir: Option<PathBuf>,
    pub palette: PaletteOverrides,
    pub items: Option<Vec<MediaItem>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            rotation_interval_ms: ROTATION_INTERVAL_MS,
            crossfade_window_ms: CROSSFADE_WINDOW_MS,
            clip_duration_ms: CLIP_DURATION_MS,
            start_index: None,
            random_start: false,
            carousel_speed: CAROUSEL_SPEED,
            assets_dir: None,
            palette: PaletteOverrides::default(),
            items: None,
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.rotation_interval_ms == 0 {
            return Err(Error::InvalidConfig("rotation_interval_ms must be positive".into()));
        }
        if self.clip_duration_ms == 0 {
            return Err(Error::InvalidConfig("clip_duration_ms must be positive".into()));
        }
        if self.strategy == Strategy::Crossfade && self.crossfade_window_ms > self.clip_duration_ms {
            return Err(Error::InvalidConfig(format!(
                "crossfade_window_ms ({}) is longer than clip_duration_ms ({})",
                self.crossfade_window_ms, self.clip_duration_ms
            )));
        }
        if self.random_start && self.start_index.is_some() {
            return Err(Error::InvalidConfig("random_start and start_index are mutually exclusive".into()));
        }
        if !self.carousel_speed.is_finite() || self.carousel_speed < 0.0 {
            return Err(Error::InvalidConfig("carousel_speed must be a non-negative number".into()));
        }
        if let Some(items) = &self.items {
            if let Some(blank) = items.iter().position(|i| i.headline.trim().is_empty()) {
                return Err(Error::InvalidConfig(format!("item {} has an empty headline", blank)));
            }
        }
        self.palette()?;
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            strategy: self.strategy,
            rotation_interval_ms: self.rotation_interval_ms,
            crossfade_window_ms: self.crossfade_window_ms,
            clip_duration_ms: self.clip_duration_ms,
        }
    }

    pub fn start_policy(&self) -> StartPolicy {
        if self.random_start {
            StartPolicy::Random
        } else {
            StartPolicy::Fixed(self.start_index.unwrap_or(0))
        }
    }

    /// Configured items, or the built-in catalogue. Relative sources are joined to `assets_dir`.
    pub fn items(&self) -> Vec<MediaItem> {
        let items = self.items.clone().unwrap_or_else(default_catalog);
        match &self.assets_dir {
            Some(dir) => items
                .into_iter()
                .map(|mut item| {
                    if Path::new(&item.source).is_relative() {
                        item.source = dir.join(&item.source).to_string_lossy().into_owned();
                    }
                    item
                })
                .collect(),
            None => items,
        }
    }

    pub fn palette(&self) -> Result<ColorPalette> {
        let mut palette = ColorPalette::default();
        palette.apply(&self.palette)?;
        Ok(palette)
    }
}
