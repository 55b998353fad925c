//! Small page effects that need a bit of math but no scene state:
//! text scramble reveal, card tilt and scroll-in reveal.

use crate::geometry::{Rect, Viewport};
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

pub const SCRAMBLE_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()";

/// One frame of the scramble: each character independently shows the real
/// glyph with probability `progress`, otherwise a random charset glyph.
/// At `progress >= 1` the original text comes back verbatim.
pub fn scramble_frame<R: Rng>(original: &str, progress: f32, rng: &mut R) -> String {
    if progress >= 1.0 {
        return original.to_string();
    }
    original
        .chars()
        .map(|c| {
            if rng.gen::<f32>() < progress {
                c
            } else {
                SCRAMBLE_CHARSET[rng.gen_range(0..SCRAMBLE_CHARSET.len())] as char
            }
        })
        .collect()
}

/// Decode-from-noise reveal of a string over a fixed duration.
#[derive(Clone, Debug)]
pub struct Scramble {
    original: String,
    start: Duration,
    duration: Duration,
}

impl Scramble {
    pub fn new(original: impl Into<String>, start: Duration, duration: Duration) -> Self {
        Self {
            original: original.into(),
            start,
            duration,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (now.saturating_sub(self.start).as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Text to show at `now` and whether the reveal is complete.
    pub fn frame<R: Rng>(&self, now: Duration, rng: &mut R) -> (String, bool) {
        let p = self.progress(now);
        (scramble_frame(&self.original, p, rng), p >= 1.0)
    }
}

/// CSS 3D tilt of a card following the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x_deg: f32,
    pub rotate_y_deg: f32,
    pub scale: f32,
}

const TILT_DIVISOR: f32 = 10.0;
const TILT_HOVER_SCALE: f32 = 1.02;
const TILT_PERSPECTIVE_PX: u32 = 1000;

impl Tilt {
    pub const REST: Tilt = Tilt {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        scale: 1.0,
    };

    /// Pointer at `pointer` (client px) over `card`.
    pub fn follow(card: &Rect, pointer: Vec2) -> Tilt {
        let c = card.center();
        Tilt {
            rotate_x_deg: (pointer.y - c.y) / TILT_DIVISOR,
            rotate_y_deg: (c.x - pointer.x) / TILT_DIVISOR,
            scale: TILT_HOVER_SCALE,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
            TILT_PERSPECTIVE_PX, self.rotate_x_deg, self.rotate_y_deg, self.scale
        )
    }
}

/// Fraction of an element that must be visible before it fades in.
pub const REVEAL_THRESHOLD: f32 = 0.3;

#[inline]
pub fn should_reveal(rect: &Rect, viewport: &Viewport) -> bool {
    rect.visible_fraction(viewport) >= REVEAL_THRESHOLD
}
