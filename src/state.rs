/// Playback state of one display layer.
///
/// There is no paused state: a host may pause its media, the controller does not model it.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum LayerState {
    #[default]
    Idle,    // No source assigned
    Playing, // Source assigned, playback requested
}

/// The two stacked display layers used by the crossfade strategy.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub enum LayerId {
    #[default]
    Front,
    Back,
}

impl LayerId {
    pub fn other(self) -> Self {
        match self {
            LayerId::Front => LayerId::Back,
            LayerId::Back => LayerId::Front,
        }
    }

    pub fn index(self) -> usize {
        match self {
            LayerId::Front => 0,
            LayerId::Back => 1,
        }
    }
}
