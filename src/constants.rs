pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const ROTATION_INTERVAL_MS: u64 = 7000;   // Time each item stays up in the timed strategy
pub const CROSSFADE_WINDOW_MS: u64 = 700;     // Trailing part of a clip during which layers blend
pub const CLIP_DURATION_MS: u64 = 7000;       // Playback length assumed for still assets

pub const CAROUSEL_SPEED: f32 = 1.0;          // Logo strip scroll (pixels per frame)
pub const CAROUSEL_STEP: f32 = 50.0;          // Manual scroll_left / scroll_right amount (pixels)

/// Converts a configured millisecond value to the seconds used by the frame loop.
pub fn ms_to_secs(ms: u64) -> f32 {
    ms as f32 / 1000.0
}
