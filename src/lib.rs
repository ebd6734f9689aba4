//! Rotating hero media for the 3-AMS-CELMS site: which item is up, when it changes,
//! and how two display layers blend across the change.

pub mod carousel;
pub mod config;
pub mod constants;
pub mod controller;
pub mod crossfade;
pub mod engine;
pub mod error;
pub mod logging;
pub mod media;
pub mod palette;
pub mod playback;
pub mod rotation;
pub mod state;
pub mod timed;

pub use controller::HeroController;
pub use engine::{Engine, EngineSettings, Frame, Strategy};
pub use error::{Error, Result};
pub use media::MediaItem;
pub use playback::{PlaybackError, PlaybackHost};
pub use rotation::{RotationState, StartPolicy};
