use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadOut,
    CubicOut,
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenChannel {
    Formation,
    ScrollDecay,
    Highlight(usize),
}

/// What a tween drives. `from`/`to` are captured when the tween starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenTarget {
    /// Formation amount from `from` up to 1.
    Converge { from: f32 },
    /// Formation amount from `from` down to 0.
    Diverge { from: f32 },
    /// Global scroll speed multiplier from `from` down to 1.
    ScrollDecay { from: f32 },
    /// Highlight mix of one anchor's sprites.
    Highlight { anchor: usize, from: f32, to: f32 },
}

impl TweenTarget {
    pub fn channel(&self) -> TweenChannel {
        match self {
            TweenTarget::Converge { .. } | TweenTarget::Diverge { .. } => TweenChannel::Formation,
            TweenTarget::ScrollDecay { .. } => TweenChannel::ScrollDecay,
            TweenTarget::Highlight { anchor, .. } => TweenChannel::Highlight(*anchor),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(u64);

#[derive(Clone, Debug)]
struct Tween {
    id: TweenId,
    target: TweenTarget,
    start: Duration,
    duration_sec: f32,
    easing: Easing,
}

/// Progress of one tween for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    pub id: TweenId,
    pub target: TweenTarget,
    /// Eased progress in [0, 1].
    pub progress: f32,
    pub finished: bool,
}

/// Timed tasks polled once per frame. One tween per [`TweenChannel`];
/// starting a tween cancels whatever was still running on its channel.
#[derive(Default)]
pub struct Ticker {
    tweens: Vec<Tween>,
    next_id: u64,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween, replacing any tween already on the target's channel.
    pub fn start(
        &mut self,
        target: TweenTarget,
        now: Duration,
        duration_sec: f32,
        easing: Easing,
    ) -> TweenId {
        self.cancel(target.channel());
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.push(Tween {
            id,
            target,
            start: now,
            duration_sec,
            easing,
        });
        id
    }

    /// Drop the tween on `channel`, if any. Returns whether one was running.
    pub fn cancel(&mut self, channel: TweenChannel) -> bool {
        let before = self.tweens.len();
        self.tweens.retain(|t| t.target.channel() != channel);
        self.tweens.len() != before
    }

    /// Drop every tween whose channel matches. Returns how many were dropped.
    pub fn cancel_matching(&mut self, mut pred: impl FnMut(TweenChannel) -> bool) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|t| !pred(t.target.channel()));
        before - self.tweens.len()
    }

    pub fn is_running(&self, channel: TweenChannel) -> bool {
        self.tweens.iter().any(|t| t.target.channel() == channel)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tweens.clear();
    }

    /// Advance every tween to `now`. Finished tweens are reported once with
    /// progress 1 and then removed.
    pub fn poll(&mut self, now: Duration) -> SmallVec<[TweenStep; 4]> {
        let mut steps = SmallVec::new();
        for t in &self.tweens {
            let raw = if t.duration_sec <= 0.0 {
                1.0
            } else {
                (now.saturating_sub(t.start).as_secs_f32() / t.duration_sec).clamp(0.0, 1.0)
            };
            let finished = raw >= 1.0;
            steps.push(TweenStep {
                id: t.id,
                target: t.target,
                progress: if finished { 1.0 } else { t.easing.apply(raw) },
                finished,
            });
        }
        if steps.iter().any(|s: &TweenStep| s.finished) {
            self.tweens.retain(|t| {
                !steps
                    .iter()
                    .any(|s: &TweenStep| s.finished && s.id == t.id)
            });
        }
        steps
    }
}

/// Linear blend, `a` at `t = 0` and exactly `b` at `t = 1`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}
