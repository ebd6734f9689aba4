//! Wall-clock strategy: the displayed item changes every `interval` seconds,
//! whatever the asset is doing. Only the front layer is used.

use tracing::{debug, warn};

use crate::engine::Engine;
use crate::playback::{MediaLayer, PlaybackHost};
use crate::rotation::RotationState;
use crate::state::LayerId;

pub struct TimedEngine {
    rotation: RotationState,
    interval: f32,
    display_timer: f32,
    layer: MediaLayer,
    armed: bool,
}

impl TimedEngine {
    pub fn new(rotation: RotationState, interval: f32) -> Self {
        Self {
            rotation,
            interval,
            display_timer: 0.0,
            layer: MediaLayer::new(LayerId::Front),
            armed: false,
        }
    }

    pub fn layer(&self) -> &MediaLayer {
        &self.layer
    }

    /// One timer expiry: advance unconditionally and show the new item.
    pub fn tick(&mut self, host: &mut dyn PlaybackHost) {
        if self.rotation.advance() {
            self.show_current(host);
        }
    }

    fn show_current(&mut self, host: &mut dyn PlaybackHost) {
        if let Some(item) = self.rotation.current() {
            self.layer.assign(item, host);
        }
    }
}

impl Engine for TimedEngine {
    fn start(&mut self, host: &mut dyn PlaybackHost) -> bool {
        if self.rotation.is_empty() {
            return false;
        }
        if self.interval <= 0.0 {
            warn!(interval = self.interval, "rotation interval must be positive, timer not armed");
            return false;
        }

        self.show_current(host);
        self.display_timer = 0.0;
        self.armed = true;
        true
    }

    fn update(&mut self, dt: f32, host: &mut dyn PlaybackHost) {
        if !self.armed {
            return;
        }
        self.layer.playhead += dt;
        self.display_timer += dt;

        // A long frame may cover several intervals
        while self.display_timer >= self.interval {
            self.display_timer -= self.interval;
            self.tick(host);
        }
    }

    fn stop(&mut self, host: &mut dyn PlaybackHost) {
        self.layer.clear(host);
        self.display_timer = 0.0;
        self.armed = false;
        debug!("timed rotation stopped");
    }

    fn jump_to(&mut self, index: usize, host: &mut dyn PlaybackHost) {
        if self.rotation.set_index(index) {
            self.show_current(host);
        }
        self.display_timer = 0.0;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }

    fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    fn opacities(&self) -> (f32, f32) {
        (1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaItem;
    use crate::playback::testing::RecordingHost;
    use crate::rotation::StartPolicy;
    use crate::state::LayerState;

    fn abc() -> RotationState {
        RotationState::initialize(
            vec![
                MediaItem::new("a.png", "A"),
                MediaItem::new("b.png", "B"),
                MediaItem::new("c.png", "C"),
            ],
            StartPolicy::Fixed(0),
        )
    }

    fn headline(engine: &TimedEngine) -> Option<&str> {
        engine.rotation().current().map(|i| i.headline.as_str())
    }

    #[test]
    fn three_ticks_wrap_back_to_first_item() {
        let mut host = RecordingHost::default();
        let mut engine = TimedEngine::new(abc(), 5.0);
        assert!(engine.start(&mut host));

        let mut seen = Vec::new();
        for _ in 0..3 {
            engine.update(5.0, &mut host);
            seen.push(headline(&engine).unwrap().to_string());
        }
        assert_eq!(seen, ["B", "C", "A"]);
    }

    #[test]
    fn frames_accumulate_until_the_interval() {
        let mut host = RecordingHost::default();
        let mut engine = TimedEngine::new(abc(), 5.0);
        engine.start(&mut host);

        for _ in 0..299 {
            engine.update(1.0 / 60.0, &mut host);
        }
        assert_eq!(headline(&engine), Some("A"));

        engine.update(2.0 / 60.0, &mut host);
        assert_eq!(headline(&engine), Some("B"));
    }

    #[test]
    fn long_frame_fires_every_elapsed_interval() {
        let mut host = RecordingHost::default();
        let mut engine = TimedEngine::new(abc(), 5.0);
        engine.start(&mut host);

        engine.update(10.5, &mut host);
        assert_eq!(headline(&engine), Some("C"));
    }

    #[test]
    fn refused_playback_does_not_stop_rotation() {
        let mut host = RecordingHost::refusing();
        let mut engine = TimedEngine::new(abc(), 5.0);
        assert!(engine.start(&mut host));

        engine.update(5.0, &mut host);
        assert_eq!(headline(&engine), Some("B"));
        assert_eq!(host.last_play(), Some((LayerId::Front, "b.png")));
        assert_eq!(engine.layer().state, LayerState::Playing);
    }

    #[test]
    fn empty_rotation_never_arms() {
        let mut host = RecordingHost::default();
        let mut engine = TimedEngine::new(RotationState::initialize(Vec::new(), StartPolicy::Fixed(0)), 5.0);
        assert!(!engine.start(&mut host));
        engine.update(60.0, &mut host);

        assert!(!engine.is_armed());
        assert!(host.plays.is_empty());
        assert!(engine.frame().current.is_none());
    }

    #[test]
    fn zero_interval_is_not_armed() {
        let mut host = RecordingHost::default();
        let mut engine = TimedEngine::new(abc(), 0.0);
        assert!(!engine.start(&mut host));
        engine.update(1.0, &mut host);
        assert_eq!(headline(&engine), Some("A"));
    }

    #[test]
    fn stop_releases_the_layer_and_freezes_rotation() {
        let mut host = RecordingHost::default();
        let mut engine = TimedEngine::new(abc(), 5.0);
        engine.start(&mut host);
        engine.stop(&mut host);
        engine.update(20.0, &mut host);

        assert_eq!(host.stops, vec![LayerId::Front]);
        assert_eq!(headline(&engine), Some("A"));
    }

    #[test]
    fn jump_restarts_the_interval() {
        let mut host = RecordingHost::default();
        let mut engine = TimedEngine::new(abc(), 5.0);
        engine.start(&mut host);
        engine.update(4.0, &mut host);
        engine.jump_to(2, &mut host);
        engine.update(4.0, &mut host);

        assert_eq!(headline(&engine), Some("C"));
        assert_eq!(host.last_play(), Some((LayerId::Front, "c.png")));
    }
}
