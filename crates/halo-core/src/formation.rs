//! Halo formations around anchor elements.
//!
//! On every entry the controller re-reads the anchors' rects, splits the pool
//! into one contiguous range per anchor and lays each range out evenly on a
//! ring around the anchor's center. A single scalar, the formation amount,
//! then says how far every assigned sprite sits between its initial position
//! (0) and its ring slot (1); the converge/diverge tweens drive that scalar.

use crate::config::DriftPolicy;
use crate::constants::*;
use crate::geometry::{Rect, Viewport};
use crate::sprite::{partition_ranges, SpritePool};
use crate::state::FormationPhase;
use crate::tween::{Easing, Ticker, TweenChannel, TweenTarget};
use glam::{Vec2, Vec3};
use std::f32::consts::TAU;
use std::ops::Range;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Formation {
    pub anchor_index: usize,
    pub members: Range<usize>,
    /// Ring center in world units.
    pub center: Vec2,
    pub radius: f32,
}

impl Formation {
    /// Ring slot of the `slot`-th member.
    pub fn target_for(&self, slot: usize) -> Vec3 {
        let m = self.members.len().max(1);
        let angle = slot as f32 / m as f32 * TAU;
        Vec3::new(
            self.center.x + angle.cos() * self.radius,
            self.center.y + angle.sin() * self.radius,
            FORMATION_PLANE_Z,
        )
    }
}

/// One formation per anchor rect; empty when there are no anchors or the
/// viewport has no area.
pub fn compute_formations(
    anchors: &[Rect],
    viewport: &Viewport,
    pool_size: usize,
    radius: f32,
) -> Vec<Formation> {
    let ranges = partition_ranges(pool_size, anchors.len());
    anchors
        .iter()
        .zip(ranges)
        .enumerate()
        .filter_map(|(anchor_index, (rect, members))| {
            let center = viewport.pixel_to_world(rect.center()).ok()?;
            Some(Formation {
                anchor_index,
                members,
                center,
                radius,
            })
        })
        .collect()
}

pub struct FormationController {
    phase: FormationPhase,
    formations: Vec<Formation>,
    amount: f32,
    radius: f32,
    policy: DriftPolicy,
}

impl FormationController {
    pub fn new(radius: f32, policy: DriftPolicy) -> Self {
        Self {
            phase: FormationPhase::Ambient,
            formations: Vec::new(),
            amount: 0.0,
            radius,
            policy,
        }
    }

    pub fn phase(&self) -> FormationPhase {
        self.phase
    }

    /// How far assigned sprites sit towards their ring slots, in [0, 1].
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Formations from the most recent entry. Kept after divergence so a late
    /// pointer-leave can still find its sprites.
    pub fn formations(&self) -> &[Formation] {
        &self.formations
    }

    pub fn members_of(&self, anchor_index: usize) -> Option<Range<usize>> {
        self.formations
            .iter()
            .find(|f| f.anchor_index == anchor_index)
            .map(|f| f.members.clone())
    }

    /// Trigger region entered. Starts converging from wherever the sprites
    /// are; ignored while already converging or held. Returns whether a
    /// transition happened.
    pub fn enter(
        &mut self,
        anchors: &[Rect],
        viewport: &Viewport,
        pool: &mut SpritePool,
        ticker: &mut Ticker,
        now: Duration,
    ) -> bool {
        if matches!(self.phase, FormationPhase::Converging | FormationPhase::Held) {
            return false;
        }
        let formations = compute_formations(anchors, viewport, pool.len(), self.radius);
        if formations.is_empty() {
            log::debug!("[formation] no anchors on the page, staying ambient");
            return false;
        }
        self.formations = formations;
        self.assign_targets(pool);
        ticker.start(
            TweenTarget::Converge { from: self.amount },
            now,
            CONVERGE_SECS,
            Easing::CubicInOut,
        );
        log::info!(
            "[formation] converging {} halos (from {:.2})",
            self.formations.len(),
            self.amount
        );
        self.phase = FormationPhase::Converging;
        true
    }

    /// Trigger region left. Diverges from the amount reached so far.
    pub fn leave(&mut self, ticker: &mut Ticker, now: Duration) -> bool {
        if !matches!(self.phase, FormationPhase::Converging | FormationPhase::Held) {
            return false;
        }
        ticker.start(
            TweenTarget::Diverge { from: self.amount },
            now,
            DIVERGE_SECS,
            Easing::CubicInOut,
        );
        log::info!("[formation] diverging (from {:.2})", self.amount);
        self.phase = FormationPhase::Diverging;
        true
    }

    /// Apply one converge/diverge tween step. Steps that do not match the
    /// current phase are ignored.
    pub fn apply_step(
        &mut self,
        pool: &mut SpritePool,
        target: TweenTarget,
        progress: f32,
        finished: bool,
    ) {
        match (target, self.phase) {
            (TweenTarget::Converge { from }, FormationPhase::Converging) => {
                self.amount = if finished {
                    1.0
                } else {
                    from + (1.0 - from) * progress
                };
                self.apply_amount(pool);
                if finished {
                    self.phase = FormationPhase::Held;
                    log::debug!("[formation] held");
                }
            }
            (TweenTarget::Diverge { from }, FormationPhase::Diverging) => {
                self.amount = if finished {
                    0.0
                } else {
                    from * (1.0 - progress)
                };
                self.apply_amount(pool);
                if finished {
                    self.release(pool);
                    self.phase = FormationPhase::Ambient;
                    log::debug!("[formation] ambient");
                }
            }
            _ => {}
        }
    }

    /// Drop every target and go back to ambient at once (teardown).
    pub fn reset(&mut self, pool: &mut SpritePool, ticker: &mut Ticker) {
        ticker.cancel(TweenChannel::Formation);
        self.amount = 0.0;
        self.apply_amount(pool);
        self.release(pool);
        self.phase = FormationPhase::Ambient;
    }

    fn assign_targets(&self, pool: &mut SpritePool) {
        self.release(pool);
        for f in &self.formations {
            for (slot, sprite) in pool.slice_mut(f.members.clone()).iter_mut().enumerate() {
                sprite.formation_target = Some(f.target_for(slot));
                if self.policy == DriftPolicy::FreezeInFormation {
                    sprite.freeze();
                }
            }
        }
    }

    fn release(&self, pool: &mut SpritePool) {
        for sprite in pool.iter_mut() {
            sprite.formation_target = None;
            if sprite.frozen_for_formation {
                sprite.thaw();
            }
        }
    }

    fn apply_amount(&self, pool: &mut SpritePool) {
        let opacity = BASE_OPACITY + self.amount * FORMATION_OPACITY_BOOST;
        for sprite in pool.iter_mut().filter(|s| s.formation_target.is_some()) {
            sprite.interpolate_to_target(self.amount);
            sprite.visual.opacity = opacity;
        }
    }
}
