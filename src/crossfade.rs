//! Playback-completion strategy with a two-layer crossfade.
//!
//! The active layer shows the current item, the hidden layer is primed with the
//! next one. Once the active clip has less than `window` seconds left the two
//! opacities are interpolated linearly; when the clip ends the layers swap roles.
//!
//! `update` runs a clip clock for assets without a duration of their own (stills).
//! Hosts that play real media report progress through `on_playback_near_end` and
//! `on_playback_ended` instead of calling `update`.

use tracing::debug;

use crate::engine::Engine;
use crate::playback::{MediaLayer, PlaybackHost};
use crate::rotation::RotationState;
use crate::state::LayerId;

/// Opacity of the outgoing layer with `remaining` seconds of playback left.
///
/// Always within `[0, 1]`. A zero-length window means no blending at all.
pub fn crossfade_opacity(remaining: f32, window: f32) -> f32 {
    if window <= 0.0 {
        return 1.0;
    }
    (remaining.max(0.0) / window).min(1.0)
}

pub struct CrossfadeEngine {
    rotation: RotationState,
    clip_duration: f32,
    window: f32,
    layers: [MediaLayer; 2],
    visible_opacity: f32,
    hidden_opacity: f32,
    armed: bool,
}

impl CrossfadeEngine {
    pub fn new(rotation: RotationState, clip_duration: f32, window: f32) -> Self {
        Self {
            rotation,
            clip_duration,
            window,
            layers: [MediaLayer::new(LayerId::Front), MediaLayer::new(LayerId::Back)],
            visible_opacity: 1.0,
            hidden_opacity: 0.0,
            armed: false,
        }
    }

    pub fn layer(&self, id: LayerId) -> &MediaLayer {
        &self.layers[id.index()]
    }

    fn layer_mut(&mut self, id: LayerId) -> &mut MediaLayer {
        &mut self.layers[id.index()]
    }

    fn load_layers(&mut self, host: &mut dyn PlaybackHost) {
        let active = self.rotation.active_layer();
        if let Some(item) = self.rotation.current() {
            self.layers[active.index()].assign(item, host);
        }
        if self.rotation.len() > 1 {
            if let Some(next) = self.rotation.next() {
                self.layers[active.other().index()].assign(next, host);
            }
        }
        self.visible_opacity = 1.0;
        self.hidden_opacity = 0.0;
    }
}

impl Engine for CrossfadeEngine {
    fn start(&mut self, host: &mut dyn PlaybackHost) -> bool {
        if self.rotation.is_empty() {
            return false;
        }
        self.load_layers(host);
        self.armed = true;
        true
    }

    fn update(&mut self, dt: f32, host: &mut dyn PlaybackHost) {
        if !self.armed {
            return;
        }
        let active = self.rotation.active_layer();
        let playhead = {
            let layer = self.layer_mut(active);
            layer.playhead += dt;
            layer.playhead
        };
        let remaining = self.clip_duration - playhead;

        if remaining <= 0.0 {
            self.on_playback_ended(host);
        } else if remaining < self.window {
            self.on_playback_near_end(remaining);
        }
    }

    /// The visible clip has `remaining` seconds left: blend toward the hidden layer.
    fn on_playback_near_end(&mut self, remaining: f32) {
        if !self.armed {
            return;
        }
        if self.rotation.len() <= 1 {
            return;
        }
        self.visible_opacity = crossfade_opacity(remaining, self.window);
        self.hidden_opacity = 1.0 - self.visible_opacity;
    }

    /// The visible clip finished: advance, swap layers and prime the hidden one.
    fn on_playback_ended(&mut self, host: &mut dyn PlaybackHost) {
        if !self.armed {
            return;
        }
        self.visible_opacity = 1.0;
        self.hidden_opacity = 0.0;

        if !self.rotation.advance() {
            // Single item: replay it in place
            let active = self.rotation.active_layer();
            if let Some(item) = self.rotation.current() {
                self.layers[active.index()].assign(item, host);
            }
            return;
        }

        self.rotation.swap_layers();
        let active = self.rotation.active_layer();
        self.layer_mut(active).playhead = 0.0;
        debug!(layer = ?active, index = ?self.rotation.current_index(), "crossfade swapped layers");

        if let Some(next) = self.rotation.next() {
            self.layers[active.other().index()].assign(next, host);
        }
    }

    fn stop(&mut self, host: &mut dyn PlaybackHost) {
        for layer in self.layers.iter_mut() {
            layer.clear(host);
        }
        self.visible_opacity = 1.0;
        self.hidden_opacity = 0.0;
        self.armed = false;
        debug!("crossfade rotation stopped");
    }

    fn jump_to(&mut self, index: usize, host: &mut dyn PlaybackHost) {
        if self.rotation.set_index(index) {
            self.load_layers(host);
        }
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    fn opacities(&self) -> (f32, f32) {
        (self.visible_opacity, self.hidden_opacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaItem;
    use crate::playback::testing::RecordingHost;
    use crate::rotation::StartPolicy;
    use crate::state::LayerState;

    fn rotation(n: usize) -> RotationState {
        RotationState::initialize(
            (0..n).map(|i| MediaItem::new(format!("{i}.png"), format!("Item {i}"))).collect(),
            StartPolicy::Fixed(0),
        )
    }

    #[test]
    fn half_window_left_gives_even_blend() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(3), 7.0, 0.7);
        engine.start(&mut host);
        engine.on_playback_near_end(0.35);
        let (visible, hidden) = engine.opacities();
        assert!((visible - 0.5).abs() < 1e-6);
        assert!((hidden - 0.5).abs() < 1e-6);
    }

    #[test]
    fn opacity_is_clamped_for_any_remaining_time() {
        for remaining in [0.0, 0.01, 0.35, 0.7, 1.0, 100.0, -1.0] {
            for window in [0.0, 0.2, 0.7, 5.0] {
                let o = crossfade_opacity(remaining, window);
                assert!((0.0..=1.0).contains(&o), "{o} for {remaining}/{window}");
            }
        }
        assert_eq!(crossfade_opacity(0.5, 0.0), 1.0);
        assert_eq!(crossfade_opacity(0.0, 0.7), 0.0);
    }

    #[test]
    fn start_primes_the_hidden_layer_with_the_next_item() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(3), 7.0, 0.7);
        assert!(engine.start(&mut host));

        assert_eq!(engine.layer(LayerId::Front).source.as_deref(), Some("0.png"));
        assert_eq!(engine.layer(LayerId::Back).source.as_deref(), Some("1.png"));
        assert_eq!(engine.layer(LayerId::Back).state, LayerState::Playing);
    }

    #[test]
    fn ending_a_clip_swaps_layers_and_primes_the_following_item() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(3), 7.0, 0.7);
        engine.start(&mut host);
        engine.on_playback_ended(&mut host);

        assert_eq!(engine.rotation().current_index(), Some(1));
        assert_eq!(engine.rotation().active_layer(), LayerId::Back);
        assert_eq!(engine.layer(LayerId::Front).source.as_deref(), Some("2.png"));
        assert_eq!(host.last_play(), Some((LayerId::Front, "2.png")));
        assert_eq!(engine.opacities(), (1.0, 0.0));
    }

    #[test]
    fn clip_clock_blends_then_advances_once() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(3), 2.0, 0.5);
        engine.start(&mut host);

        engine.update(1.75, &mut host);
        let (visible, hidden) = engine.opacities();
        assert!((visible - 0.5).abs() < 1e-5);
        assert!((hidden - 0.5).abs() < 1e-5);
        assert_eq!(engine.rotation().current_index(), Some(0));

        engine.update(0.25, &mut host);
        assert_eq!(engine.rotation().current_index(), Some(1));
        assert_eq!(engine.opacities(), (1.0, 0.0));

        engine.update(0.1, &mut host);
        assert_eq!(engine.rotation().current_index(), Some(1));
    }

    #[test]
    fn single_item_replays_on_the_same_layer() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(1), 2.0, 0.5);
        engine.start(&mut host);
        engine.update(1.8, &mut host);
        assert_eq!(engine.opacities(), (1.0, 0.0));

        engine.update(0.5, &mut host);
        assert_eq!(engine.rotation().current_index(), Some(0));
        assert_eq!(engine.rotation().active_layer(), LayerId::Front);
        assert_eq!(engine.layer(LayerId::Back).state, LayerState::Idle);
        assert_eq!(host.plays.len(), 2);
    }

    #[test]
    fn zero_window_cuts_without_blending() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(2), 1.0, 0.0);
        engine.start(&mut host);
        engine.update(0.99, &mut host);
        assert_eq!(engine.opacities(), (1.0, 0.0));
        engine.update(0.02, &mut host);
        assert_eq!(engine.rotation().current_index(), Some(1));
    }

    #[test]
    fn refused_playback_still_rotates() {
        let mut host = RecordingHost::refusing();
        let mut engine = CrossfadeEngine::new(rotation(2), 1.0, 0.2);
        engine.start(&mut host);
        engine.update(1.0, &mut host);
        assert_eq!(engine.frame().current.map(|i| i.headline.as_str()), Some("Item 1"));
    }

    #[test]
    fn events_after_stop_do_nothing() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(3), 7.0, 0.7);
        engine.start(&mut host);
        engine.stop(&mut host);
        let plays = host.plays.len();

        engine.on_playback_ended(&mut host);
        engine.on_playback_near_end(0.35);

        assert_eq!(engine.rotation().current_index(), Some(0));
        assert_eq!(host.plays.len(), plays);
        assert_eq!(engine.opacities(), (1.0, 0.0));
    }

    #[test]
    fn events_before_start_do_nothing() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(3), 7.0, 0.7);
        engine.on_playback_ended(&mut host);

        assert_eq!(engine.rotation().current_index(), Some(0));
        assert!(host.plays.is_empty());
    }

    #[test]
    fn stop_clears_both_layers() {
        let mut host = RecordingHost::default();
        let mut engine = CrossfadeEngine::new(rotation(3), 1.0, 0.2);
        engine.start(&mut host);
        engine.stop(&mut host);
        engine.update(5.0, &mut host);

        assert_eq!(host.stops, vec![LayerId::Front, LayerId::Back]);
        assert_eq!(engine.rotation().current_index(), Some(0));
        assert!(!engine.is_armed());
    }
}
