//! The seam between the rotation controller and whatever actually shows media.
//!
//! Playback start is fire-and-forget: a host may refuse it (missing file, blocked
//! autoplay), the controller logs the refusal and keeps rotating.

use thiserror::Error;
use tracing::warn;

use crate::media::MediaItem;
use crate::state::{LayerId, LayerState};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("asset {0} could not be loaded")]
    Unavailable(String),
    #[error("playback of {0} was refused by the host")]
    Refused(String),
}

/// Presentation layer that renders media for the controller.
pub trait PlaybackHost {
    /// Requests playback of `item` on `layer`, replacing whatever that layer showed.
    fn play(&mut self, layer: LayerId, item: &MediaItem) -> Result<(), PlaybackError>;

    /// Releases whatever `layer` is showing.
    fn stop(&mut self, layer: LayerId);
}

/// One display layer as the controller sees it.
#[derive(Debug, Clone, Default)]
pub struct MediaLayer {
    pub id: LayerId,
    pub state: LayerState,
    pub source: Option<String>,
    /// Seconds of playback elapsed since the source was assigned.
    pub playhead: f32,
}

impl MediaLayer {
    pub fn new(id: LayerId) -> Self {
        Self { id, ..Self::default() }
    }

    /// Assigns `item` to this layer and asks the host to start it.
    pub fn assign(&mut self, item: &MediaItem, host: &mut dyn PlaybackHost) {
        self.source = Some(item.source.clone());
        self.state = LayerState::Playing;
        self.playhead = 0.0;

        if let Err(e) = host.play(self.id, item) {
            warn!(layer = ?self.id, source = %item.source, "playback start failed: {}", e);
        }
    }

    pub fn clear(&mut self, host: &mut dyn PlaybackHost) {
        if self.state == LayerState::Playing {
            host.stop(self.id);
        }
        self.source = None;
        self.state = LayerState::Idle;
        self.playhead = 0.0;
    }
}
