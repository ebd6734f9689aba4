use std::path::{Path, PathBuf};
use raylib::prelude::*;
use tracing::{debug, warn};

use heroreel::carousel::{CarouselScroll, PARTNERS};
use heroreel::palette::{ColorPalette, Rgb};
use heroreel::state::LayerId;
use heroreel::{Frame, MediaItem, PlaybackError, PlaybackHost};

use heroreel::constants::*;
use crate::texture_loader::{is_still, load_texture_with_exif_rotation};

pub const STRIP_HEIGHT: i32 = 120;
const STRIP_CELL_WIDTH: i32 = 360;
const HERO_HEIGHT: i32 = RENDER_HEIGHT - STRIP_HEIGHT;

pub fn to_color(rgb: Rgb) -> Color {
    Color::new(rgb.r, rgb.g, rgb.b, 255)
}

fn with_opacity(color: Color, opacity: f32) -> Color {
    Color::new(color.r, color.g, color.b, (opacity.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Width the strip scrolls before it wraps: one copy of the partner list.
pub fn strip_max_scroll() -> f32 {
    (PARTNERS.len() as i32 * STRIP_CELL_WIDTH) as f32
}

/// Presentation layer backed by raylib textures.
///
/// `play` only validates the request; textures are created by `load_pending`,
/// which needs the raylib handle and runs once per frame.
pub struct RaylibHost {
    textures: [Option<Texture2D>; 2],
    pending: Vec<(LayerId, PathBuf)>,
}

impl RaylibHost {
    pub fn new() -> Self {
        Self { textures: [None, None], pending: Vec::new() }
    }

    pub fn load_pending(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) {
        for (layer, path) in self.pending.drain(..) {
            match load_texture_with_exif_rotation(rl, thread, &path) {
                Ok(texture) => {
                    debug!(layer = ?layer, path = %path.display(), "texture loaded");
                    self.textures[layer.index()] = Some(texture);
                }
                Err(e) => {
                    warn!(layer = ?layer, "playback start failed: {:#}", e);
                    self.textures[layer.index()] = None;
                }
            }
        }
    }

    pub fn texture(&self, layer: LayerId) -> Option<&Texture2D> {
        self.textures[layer.index()].as_ref()
    }
}

impl Default for RaylibHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackHost for RaylibHost {
    fn play(&mut self, layer: LayerId, item: &MediaItem) -> Result<(), PlaybackError> {
        let path = Path::new(&item.source);
        // Drop the previous texture so a failed load never shows a stale image
        self.textures[layer.index()] = None;
        self.pending.retain(|(l, _)| *l != layer);

        if !is_still(path) {
            return Err(PlaybackError::Refused(item.source.clone()));
        }
        if !path.is_file() {
            return Err(PlaybackError::Unavailable(item.source.clone()));
        }
        self.pending.push((layer, path.to_path_buf()));
        Ok(())
    }

    fn stop(&mut self, layer: LayerId) {
        self.textures[layer.index()] = None;
        self.pending.retain(|(l, _)| *l != layer);
    }
}

fn draw_layer(d: &mut RaylibDrawHandle, texture: Option<&Texture2D>, opacity: f32, palette: &ColorPalette) {
    if opacity <= 0.0 {
        return;
    }
    let Some(texture) = texture else {
        // Nothing rendered for this layer; keep the brand colour behind the overlay
        d.draw_rectangle(0, 0, RENDER_WIDTH, HERO_HEIGHT, with_opacity(to_color(palette.primary), opacity));
        return;
    };

    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;

    // Cover the hero area, cropping whatever overflows
    let scale = (RENDER_WIDTH as f32 / tex_width).max(HERO_HEIGHT as f32 / tex_height);
    let visible_width = RENDER_WIDTH as f32 / scale;
    let visible_height = HERO_HEIGHT as f32 / scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new((tex_width - visible_width) * 0.5, (tex_height - visible_height) * 0.5, visible_width, visible_height),
        Rectangle::new(0.0, 0.0, RENDER_WIDTH as f32, HERO_HEIGHT as f32),
        Vector2::new(0.0, 0.0),
        0.0,
        with_opacity(Color::WHITE, opacity),
    );
}

fn draw_overlay(d: &mut RaylibDrawHandle, item: &MediaItem, palette: &ColorPalette) {
    d.draw_rectangle(0, 0, RENDER_WIDTH, HERO_HEIGHT, Color::new(0, 0, 0, 102));

    let left = 160;
    let mut y = HERO_HEIGHT / 2 - 120;
    d.draw_text(&item.headline, left, y, 72, Color::WHITE);
    y += 100;

    if let Some(subtext) = &item.subtext {
        d.draw_text(subtext, left, y, 32, Color::WHITE);
        y += 70;
    }
    if let Some(cta) = &item.cta_label {
        let width = 40 + 18 * cta.chars().count() as i32;
        d.draw_rectangle(left, y, width, 64, to_color(palette.primary));
        d.draw_text(cta, left + 20, y + 18, 28, Color::WHITE);
    }
}

fn draw_strip(d: &mut RaylibDrawHandle, carousel: &CarouselScroll, palette: &ColorPalette) {
    d.draw_rectangle(0, HERO_HEIGHT, RENDER_WIDTH, STRIP_HEIGHT, to_color(palette.background));

    let offset = carousel.scroll_x as i32;
    // Two copies so the wrap at max_scroll is invisible
    for (i, name) in PARTNERS.iter().chain(PARTNERS.iter()).enumerate() {
        let x = i as i32 * STRIP_CELL_WIDTH - offset;
        if x + STRIP_CELL_WIDTH < 0 || x > RENDER_WIDTH {
            continue;
        }
        d.draw_text(name, x + 24, HERO_HEIGHT + STRIP_HEIGHT / 2 - 14, 28, to_color(palette.secondary));
    }
}

/// Draws the hero (both layers plus overlay) and the partner strip.
pub fn draw_page(
    d: &mut RaylibDrawHandle,
    frame: &Frame<'_>,
    host: &RaylibHost,
    carousel: &CarouselScroll,
    palette: &ColorPalette,
) {
    d.clear_background(Color::BLACK);

    if let Some(item) = frame.current {
        let active = frame.active_layer;
        draw_layer(d, host.texture(active), frame.visible_opacity, palette);
        draw_layer(d, host.texture(active.other()), frame.hidden_opacity, palette);
        draw_overlay(d, item, palette);
    }

    draw_strip(d, carousel, palette);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_host_holds_no_textures() {
        let host = RaylibHost::default();
        assert!(host.texture(LayerId::Front).is_none());
        assert!(host.texture(LayerId::Back).is_none());
    }

    #[test]
    fn missing_and_unsupported_assets_are_refused() {
        let mut host = RaylibHost::default();
        let missing = MediaItem::new("/nonexistent/hangar.png", "Hangar");
        let clip = MediaItem::new("/nonexistent/hangar.mp4", "Hangar");

        assert_eq!(host.play(LayerId::Front, &missing), Err(PlaybackError::Unavailable(missing.source.clone())));
        assert_eq!(host.play(LayerId::Back, &clip), Err(PlaybackError::Refused(clip.source.clone())));
        assert!(host.pending.is_empty());
    }
}
