use crate::constants::{SCROLL_DELTA_DIVISOR, SCROLL_QUIET_MS, SCROLL_SPEED_MAX, SCROLL_SPEED_MIN};
use crate::geometry::{Rect, Viewport};
use std::time::Duration;

/// Map an absolute scroll delta (pixels) to a speed multiplier in [1, 3].
#[inline]
pub fn speed_for_delta(delta: f64) -> f32 {
    let m = 1.0 + delta as f32 / SCROLL_DELTA_DIVISOR;
    if m.is_nan() {
        return SCROLL_SPEED_MIN;
    }
    m.clamp(SCROLL_SPEED_MIN, SCROLL_SPEED_MAX)
}

pub struct ScrollBridge {
    last_offset: f64,
    last_event_at: Option<Duration>,
    quiet_after: Duration,
}

impl ScrollBridge {
    pub fn new(initial_offset: f64) -> Self {
        Self {
            last_offset: initial_offset,
            last_event_at: None,
            quiet_after: Duration::from_millis(SCROLL_QUIET_MS),
        }
    }

    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Record a scroll event and return the multiplier it implies.
    pub fn on_scroll(&mut self, offset: f64, now: Duration) -> f32 {
        let delta = (offset - self.last_offset).abs();
        self.last_offset = offset;
        self.last_event_at = Some(now);
        speed_for_delta(delta)
    }

    /// True exactly once per burst of scroll events, as soon as no event has
    /// arrived for the quiet period.
    pub fn take_quiet(&mut self, now: Duration) -> bool {
        match self.last_event_at {
            Some(at) if now.saturating_sub(at) >= self.quiet_after => {
                self.last_event_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.last_event_at.is_some()
    }
}

/// When the trigger region counts as "in view".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TriggerRule {
    /// Region straddles the viewport's horizontal center line
    /// (top above the center, bottom below it).
    #[default]
    CenterLine,
    /// Any overlap between the region and the viewport.
    Overlap,
}

impl TriggerRule {
    pub fn is_active(&self, region: &Rect, viewport: &Viewport) -> bool {
        match self {
            TriggerRule::CenterLine => {
                let mid = viewport.height * 0.5;
                region.top <= mid && region.bottom() >= mid
            }
            TriggerRule::Overlap => region.intersects(viewport),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEdge {
    Entered,
    Left,
}

/// Edge detector over successive trigger samples.
#[derive(Default)]
pub struct TriggerTracker {
    rule: TriggerRule,
    inside: bool,
}

impl TriggerTracker {
    pub fn new(rule: TriggerRule) -> Self {
        Self {
            rule,
            inside: false,
        }
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Sample the region; `None` (region missing from the page) counts as
    /// outside. Returns an edge only when the state flips.
    pub fn update(&mut self, region: Option<&Rect>, viewport: &Viewport) -> Option<TriggerEdge> {
        let now_inside = region
            .map(|r| self.rule.is_active(r, viewport))
            .unwrap_or(false);
        match (self.inside, now_inside) {
            (false, true) => {
                self.inside = true;
                Some(TriggerEdge::Entered)
            }
            (true, false) => {
                self.inside = false;
                Some(TriggerEdge::Left)
            }
            _ => None,
        }
    }
}
