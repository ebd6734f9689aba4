//! Auto-scroll state for the partner logo strip.
//!
//! The strip holds its logos twice, so `max_scroll` is half the content width and
//! jumping from `max_scroll` back to 0 is seamless.

use crate::constants::{CAROUSEL_SPEED, CAROUSEL_STEP};

/// Partners shown in the strip.
pub const PARTNERS: [&str; 6] = ["GCAA", "Africa World Airlines", "Ghana Air Force", "GACL", "PassionAir", "OEMs"];

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselScroll {
    pub scroll_x: f32,
    pub paused: bool,
    /// Pixels per frame.
    pub speed: f32,
    pub max_scroll: f32,
}

impl Default for CarouselScroll {
    fn default() -> Self {
        Self {
            scroll_x: 0.0,
            paused: false,
            speed: CAROUSEL_SPEED,
            max_scroll: 0.0,
        }
    }
}

impl CarouselScroll {
    pub fn new(speed: f32) -> Self {
        Self { speed, ..Self::default() }
    }

    pub fn set_max_scroll(&mut self, max: f32) {
        self.max_scroll = max.max(0.0);
        if self.scroll_x > self.max_scroll {
            self.scroll_x = 0.0;
        }
    }

    pub fn set_scroll_x(&mut self, x: f32) {
        self.scroll_x = x.clamp(0.0, self.max_scroll);
    }

    /// Advances the strip by `frames` frames worth of motion.
    pub fn update(&mut self, frames: f32) {
        if self.paused || self.max_scroll <= 0.0 {
            return;
        }
        let next = self.scroll_x + self.speed * frames;
        self.scroll_x = if next >= self.max_scroll { 0.0 } else { next };
    }

    pub fn scroll_left(&mut self, amount: Option<f32>) {
        let next = self.scroll_x - amount.unwrap_or(CAROUSEL_STEP);
        self.scroll_x = if next < 0.0 { self.max_scroll } else { next };
    }

    pub fn scroll_right(&mut self, amount: Option<f32>) {
        let next = self.scroll_x + amount.unwrap_or(CAROUSEL_STEP);
        self.scroll_x = if next > self.max_scroll { 0.0 } else { next };
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }
}
