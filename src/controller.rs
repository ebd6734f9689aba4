//! The hero rotation as owned by one view: mounted with its items, updated once
//! per frame, torn down when the view goes away.

use tracing::info;

use crate::engine::{build_engine, Engine, EngineSettings, Frame};
use crate::media::MediaItem;
use crate::playback::PlaybackHost;
use crate::rotation::{RotationState, StartPolicy};

pub struct HeroController {
    engine: Box<dyn Engine>,
    mounted: bool,
}

impl HeroController {
    /// Seeds the rotation and shows the first item. An empty list mounts a
    /// controller that renders nothing and never arms a timer.
    pub fn mount(
        items: Vec<MediaItem>,
        start: StartPolicy,
        settings: &EngineSettings,
        host: &mut dyn PlaybackHost,
    ) -> Self {
        Self::mount_rotation(RotationState::initialize(items, start), settings, host)
    }

    pub fn mount_rotation(rotation: RotationState, settings: &EngineSettings, host: &mut dyn PlaybackHost) -> Self {
        let count = rotation.len();
        let mut engine = build_engine(rotation, settings);
        let armed = engine.start(host);
        info!(items = count, strategy = ?settings.strategy, armed, "hero rotation mounted");

        Self { engine, mounted: true }
    }

    pub fn update(&mut self, dt: f32, host: &mut dyn PlaybackHost) {
        if self.mounted {
            self.engine.update(dt, host);
        }
    }

    pub fn set_index(&mut self, index: usize, host: &mut dyn PlaybackHost) {
        if self.mounted {
            self.engine.jump_to(index, host);
        }
    }

    /// Forwards the display layer's "clip almost over" report to the engine.
    pub fn playback_near_end(&mut self, remaining: f32) {
        if self.mounted {
            self.engine.on_playback_near_end(remaining);
        }
    }

    /// Forwards the display layer's end-of-clip report to the engine.
    pub fn playback_ended(&mut self, host: &mut dyn PlaybackHost) {
        if self.mounted {
            self.engine.on_playback_ended(host);
        }
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.engine.rotation().current()
    }

    pub fn next_item(&self) -> Option<&MediaItem> {
        self.engine.rotation().next()
    }

    pub fn frame(&self) -> Frame<'_> {
        self.engine.frame()
    }

    pub fn is_armed(&self) -> bool {
        self.mounted && self.engine.is_armed()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Disarms the engine and releases the host's layers. Later updates do nothing.
    pub fn teardown(&mut self, host: &mut dyn PlaybackHost) {
        if !self.mounted {
            return;
        }
        self.engine.stop(host);
        self.mounted = false;
        info!("hero rotation torn down");
    }
}
