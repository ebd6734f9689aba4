use serde::Deserialize;

use crate::constants::*;
use crate::crossfade::CrossfadeEngine;
use crate::media::MediaItem;
use crate::playback::PlaybackHost;
use crate::rotation::RotationState;
use crate::state::LayerId;
use crate::timed::TimedEngine;

/// One advancement strategy driving a rotation.
///
/// A controller owns exactly one engine, so a view never advances from a timer and
/// from playback completion at the same time.
pub trait Engine {
    /// Shows the first item. Returns false when there is nothing to rotate.
    fn start(&mut self, host: &mut dyn PlaybackHost) -> bool;
    /// Advances the engine clock by `dt` seconds.
    fn update(&mut self, dt: f32, host: &mut dyn PlaybackHost);
    /// Disarms the engine and releases both layers.
    fn stop(&mut self, host: &mut dyn PlaybackHost);
    /// Jumps to `index` (wrapped into range) and redisplays.
    fn jump_to(&mut self, index: usize, host: &mut dyn PlaybackHost);
    /// The visible clip reports `remaining` seconds of playback left.
    /// Strategies that do not follow playback ignore it.
    fn on_playback_near_end(&mut self, _remaining: f32) {}
    /// The visible clip finished playing.
    fn on_playback_ended(&mut self, _host: &mut dyn PlaybackHost) {}
    fn is_armed(&self) -> bool;
    fn rotation(&self) -> &RotationState;
    /// (visible layer opacity, hidden layer opacity)
    fn opacities(&self) -> (f32, f32);

    fn frame(&self) -> Frame<'_> {
        let (visible_opacity, hidden_opacity) = self.opacities();
        let rotation = self.rotation();
        Frame {
            current: rotation.current(),
            next: rotation.next(),
            active_layer: rotation.active_layer(),
            visible_opacity,
            hidden_opacity,
        }
    }
}

/// What the presentation layer needs to draw one frame of the hero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    pub current: Option<&'a MediaItem>,
    pub next: Option<&'a MediaItem>,
    pub active_layer: LayerId,
    pub visible_opacity: f32,
    pub hidden_opacity: f32,
}

impl Frame<'_> {
    pub fn opacity_of(&self, layer: LayerId) -> f32 {
        if layer == self.active_layer {
            self.visible_opacity
        } else {
            self.hidden_opacity
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Advance on a fixed wall-clock interval.
    #[default]
    Timed,
    /// Advance when the current clip ends, blending the two layers over its last moments.
    Crossfade,
}

/// Timing knobs, in milliseconds as they appear in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub strategy: Strategy,
    pub rotation_interval_ms: u64,
    pub crossfade_window_ms: u64,
    pub clip_duration_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::Timed,
            rotation_interval_ms: ROTATION_INTERVAL_MS,
            crossfade_window_ms: CROSSFADE_WINDOW_MS,
            clip_duration_ms: CLIP_DURATION_MS,
        }
    }
}

pub fn build_engine(rotation: RotationState, settings: &EngineSettings) -> Box<dyn Engine> {
    match settings.strategy {
        Strategy::Timed => Box::new(TimedEngine::new(rotation, ms_to_secs(settings.rotation_interval_ms))),
        Strategy::Crossfade => Box::new(CrossfadeEngine::new(
            rotation,
            ms_to_secs(settings.clip_duration_ms),
            ms_to_secs(settings.crossfade_window_ms),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::testing::RecordingHost;
    use crate::rotation::StartPolicy;

    fn rotation() -> RotationState {
        RotationState::initialize(
            vec![MediaItem::new("a.png", "A"), MediaItem::new("b.png", "B")],
            StartPolicy::Fixed(0),
        )
    }

    #[test]
    fn builds_the_requested_strategy() {
        let mut host = RecordingHost::default();
        let settings = EngineSettings { strategy: Strategy::Crossfade, ..EngineSettings::default() };
        let mut engine = build_engine(rotation(), &settings);
        assert!(engine.start(&mut host));

        // Crossfade primes the hidden layer, the timed strategy never touches it.
        assert_eq!(host.plays.len(), 2);

        let mut host = RecordingHost::default();
        let mut engine = build_engine(rotation(), &EngineSettings::default());
        assert!(engine.start(&mut host));
        assert_eq!(host.plays.len(), 1);
    }

    #[test]
    fn frame_reports_opacity_per_layer() {
        let engine = build_engine(rotation(), &EngineSettings::default());
        let frame = engine.frame();
        assert_eq!(frame.current.map(|i| i.headline.as_str()), Some("A"));
        assert_eq!(frame.next.map(|i| i.headline.as_str()), Some("B"));
        assert_eq!(frame.opacity_of(LayerId::Front), 1.0);
        assert_eq!(frame.opacity_of(LayerId::Back), 0.0);
    }
}
