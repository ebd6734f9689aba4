//! Rotation index bookkeeping shared by both advancement strategies.
//!
//! `next_index` is always derived from `current_index`; it is never stored, so the
//! two cannot drift apart between updates.

use rand::Rng;
use tracing::debug;

use crate::media::MediaItem;
use crate::state::LayerId;

/// How the first displayed item is chosen when a view mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPolicy {
    /// Start at the given index, wrapped into range.
    Fixed(usize),
    /// Start at a uniformly random index.
    Random,
}

impl Default for StartPolicy {
    fn default() -> Self {
        StartPolicy::Fixed(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RotationState {
    items: Vec<MediaItem>,
    current_index: usize,
    active_layer: LayerId,
}

impl RotationState {
    /// Builds a rotation over `items`, drawing a random start from the thread rng if asked to.
    pub fn initialize(items: Vec<MediaItem>, start: StartPolicy) -> Self {
        Self::initialize_with_rng(items, start, &mut rand::rng())
    }

    pub fn initialize_with_rng<R: Rng>(items: Vec<MediaItem>, start: StartPolicy, rng: &mut R) -> Self {
        let current_index = match (items.len(), start) {
            (0, _) => 0,
            (len, StartPolicy::Fixed(index)) => index % len,
            (len, StartPolicy::Random) => rng.random_range(0..len),
        };

        Self {
            items,
            current_index,
            active_layer: LayerId::Front,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.current_index)
    }

    pub fn next_index(&self) -> Option<usize> {
        match self.items.len() {
            0 => None,
            len => Some((self.current_index + 1) % len),
        }
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.current_index().and_then(|i| self.items.get(i))
    }

    pub fn next(&self) -> Option<&MediaItem> {
        self.next_index().and_then(|i| self.items.get(i))
    }

    pub fn active_layer(&self) -> LayerId {
        self.active_layer
    }

    pub fn swap_layers(&mut self) {
        self.active_layer = self.active_layer.other();
    }

    /// Moves to the next item. Returns whether the displayed item changed.
    pub fn advance(&mut self) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        if let Some(next) = self.next_index() {
            self.current_index = next;
            debug!(index = self.current_index, "rotation advanced");
        }
        true
    }

    /// Jumps to `index`, wrapped into range. Returns whether the displayed item changed.
    pub fn set_index(&mut self, index: usize) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let index = index % self.items.len();
        let changed = index != self.current_index;
        self.current_index = index;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn items(n: usize) -> Vec<MediaItem> {
        (0..n).map(|i| MediaItem::new(format!("{i}.png"), format!("Item {i}"))).collect()
    }

    #[test]
    fn advance_wraps_modulo_length() {
        for n in 1..6 {
            for initial in 0..n {
                let mut rotation = RotationState::initialize(items(n), StartPolicy::Fixed(initial));
                for k in 0..(3 * n) {
                    assert_eq!(rotation.current_index(), Some((initial + k) % n));
                    rotation.advance();
                }
            }
        }
    }

    #[test]
    fn advance_is_a_no_op_for_short_lists() {
        let mut empty = RotationState::initialize(Vec::new(), StartPolicy::Fixed(0));
        assert!(!empty.advance());
        assert_eq!(empty.current_index(), None);

        let mut single = RotationState::initialize(items(1), StartPolicy::Fixed(0));
        assert!(!single.advance());
        assert_eq!(single.current_index(), Some(0));
        assert_eq!(single.next_index(), Some(0));
    }

    #[test]
    fn empty_rotation_has_no_current_or_next() {
        let rotation = RotationState::initialize(Vec::new(), StartPolicy::Random);
        assert!(rotation.is_empty());
        assert!(rotation.current().is_none());
        assert!(rotation.next().is_none());
    }

    #[test]
    fn out_of_range_start_wraps() {
        let rotation = RotationState::initialize(items(3), StartPolicy::Fixed(7));
        assert_eq!(rotation.current_index(), Some(1));
        assert_eq!(rotation.next_index(), Some(2));
    }

    #[test]
    fn random_start_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let rotation = RotationState::initialize_with_rng(items(4), StartPolicy::Random, &mut rng);
            assert!(rotation.current_index().unwrap() < 4);
        }
    }

    #[test]
    fn next_index_follows_current_after_set_index() {
        let mut rotation = RotationState::initialize(items(3), StartPolicy::Fixed(0));
        assert!(rotation.set_index(5));
        assert_eq!(rotation.current_index(), Some(2));
        assert_eq!(rotation.next_index(), Some(0));
        assert!(!rotation.set_index(2));
    }

    #[test]
    fn three_items_wrap_back_to_first() {
        let mut rotation = RotationState::initialize(items(3), StartPolicy::Fixed(0));
        for _ in 0..3 {
            rotation.advance();
        }
        assert_eq!(rotation.current().map(|i| i.headline.as_str()), Some("Item 0"));
    }
}
