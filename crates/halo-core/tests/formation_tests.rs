// Host-side tests for halo formation geometry and the formation state machine.

use glam::{Vec2, Vec3};
use halo_core::constants::*;
use halo_core::*;
use std::time::Duration;

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

fn viewport() -> Viewport {
    Viewport::new(1600.0, 900.0)
}

/// Two anchors whose centers map to world (-2, 0) and (2, 0).
fn two_anchors() -> Vec<Rect> {
    vec![
        Rect::new(550.0, 400.0, 100.0, 100.0),
        Rect::new(950.0, 400.0, 100.0, 100.0),
    ]
}

fn still_pool(n: usize) -> SpritePool {
    SpritePool::from_sprites(
        (0..n)
            .map(|i| {
                Sprite::new(
                    Vec3::new(i as f32 - 4.0, 3.0, -2.0),
                    Vec3::ZERO,
                    TextureVariant::Dot,
                )
            })
            .collect(),
    )
}

fn drain(ctl: &mut FormationController, pool: &mut SpritePool, ticker: &mut Ticker, now: Duration) {
    for step in ticker.poll(now) {
        ctl.apply_step(pool, step.target, step.progress, step.finished);
    }
}

fn assert_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
}

#[test]
fn eight_sprites_two_anchors_scenario() {
    let formations = compute_formations(&two_anchors(), &viewport(), 8, 1.0);
    assert_eq!(formations.len(), 2);
    assert_eq!(formations[0].members, 0..4);
    assert_eq!(formations[1].members, 4..8);
    assert!((formations[0].center - Vec2::new(-2.0, 0.0)).length() < 1e-6);
    assert!((formations[1].center - Vec2::new(2.0, 0.0)).length() < 1e-6);
    assert_close(formations[0].target_for(0), Vec3::new(-1.0, 0.0, FORMATION_PLANE_Z));
    // opposite side of the first ring
    assert_close(formations[0].target_for(2), Vec3::new(-3.0, 0.0, FORMATION_PLANE_Z));
}

#[test]
fn ring_slots_sit_on_the_radius() {
    let formations = compute_formations(&two_anchors(), &viewport(), 800, FORMATION_RADIUS);
    for f in &formations {
        for slot in 0..f.members.len() {
            let t = f.target_for(slot);
            let d = (Vec2::new(t.x, t.y) - f.center).length();
            assert!((d - FORMATION_RADIUS).abs() < 1e-4);
            assert_eq!(t.z, FORMATION_PLANE_Z);
        }
    }
}

#[test]
fn no_anchors_or_empty_viewport_yield_no_formations() {
    assert!(compute_formations(&[], &viewport(), 8, 1.0).is_empty());
    let empty = Viewport::new(0.0, 0.0);
    assert!(compute_formations(&two_anchors(), &empty, 8, 1.0).is_empty());
}

#[test]
fn converge_then_diverge_returns_exactly_to_initial_positions() {
    let mut pool = still_pool(8);
    let initial: Vec<Vec3> = pool.iter().map(|s| s.initial_position()).collect();
    let mut ticker = Ticker::new();
    let mut ctl = FormationController::new(1.0, DriftPolicy::KeepDrifting);

    assert!(ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(0.0)));
    assert_eq!(ctl.phase(), FormationPhase::Converging);
    assert!(ticker.is_running(TweenChannel::Formation));

    drain(&mut ctl, &mut pool, &mut ticker, secs(1.0));
    assert_eq!(ctl.phase(), FormationPhase::Converging);
    assert!(ctl.amount() > 0.0 && ctl.amount() < 1.0);

    drain(&mut ctl, &mut pool, &mut ticker, secs(CONVERGE_SECS));
    assert_eq!(ctl.phase(), FormationPhase::Held);
    assert_eq!(ctl.amount(), 1.0);
    let s0 = pool.get(0).map(|s| s.position).unwrap_or(Vec3::NAN);
    assert_close(s0, Vec3::new(-1.0, 0.0, FORMATION_PLANE_Z));
    for s in pool.iter() {
        assert!((s.visual.opacity - (BASE_OPACITY + FORMATION_OPACITY_BOOST)).abs() < 1e-6);
    }

    assert!(ctl.leave(&mut ticker, secs(3.0)));
    assert_eq!(ctl.phase(), FormationPhase::Diverging);
    drain(&mut ctl, &mut pool, &mut ticker, secs(3.0 + DIVERGE_SECS));
    assert_eq!(ctl.phase(), FormationPhase::Ambient);
    assert_eq!(ctl.amount(), 0.0);
    for (s, p) in pool.iter().zip(&initial) {
        assert_eq!(s.position, *p);
        assert!(s.formation_target.is_none());
        assert_eq!(s.visual.opacity, BASE_OPACITY);
    }
    // kept so a late pointer-leave still finds its sprites
    assert_eq!(ctl.members_of(1), Some(4..8));
}

#[test]
fn transitions_are_idempotent() {
    let mut pool = still_pool(8);
    let mut ticker = Ticker::new();
    let mut ctl = FormationController::new(1.0, DriftPolicy::KeepDrifting);

    assert!(!ctl.leave(&mut ticker, secs(0.0)));
    assert_eq!(ctl.phase(), FormationPhase::Ambient);

    assert!(ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(0.0)));
    assert!(!ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(0.5)));
    assert_eq!(ticker.len(), 1);

    drain(&mut ctl, &mut pool, &mut ticker, secs(5.0));
    assert_eq!(ctl.phase(), FormationPhase::Held);
    assert!(!ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(5.0)));
}

#[test]
fn reentry_while_diverging_converges_from_the_current_amount() {
    let mut pool = still_pool(8);
    let mut ticker = Ticker::new();
    let mut ctl = FormationController::new(1.0, DriftPolicy::KeepDrifting);

    ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(0.0));
    drain(&mut ctl, &mut pool, &mut ticker, secs(2.0));
    ctl.leave(&mut ticker, secs(2.0));
    drain(&mut ctl, &mut pool, &mut ticker, secs(2.75));
    let partial = ctl.amount();
    assert!(partial > 0.0 && partial < 1.0);

    assert!(ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(2.75)));
    assert_eq!(ctl.phase(), FormationPhase::Converging);
    // the superseded diverge tween is gone
    assert_eq!(ticker.len(), 1);
    let steps = ticker.poll(secs(2.75));
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].target, TweenTarget::Converge { from: partial });

    // a late diverge step is ignored while converging
    ctl.apply_step(&mut pool, TweenTarget::Diverge { from: 1.0 }, 1.0, true);
    assert_eq!(ctl.phase(), FormationPhase::Converging);
}

#[test]
fn reentry_reassigns_targets_from_live_rects() {
    let mut pool = still_pool(8);
    let mut ticker = Ticker::new();
    let mut ctl = FormationController::new(1.0, DriftPolicy::KeepDrifting);

    ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(0.0));
    drain(&mut ctl, &mut pool, &mut ticker, secs(2.0));
    ctl.leave(&mut ticker, secs(2.0));
    drain(&mut ctl, &mut pool, &mut ticker, secs(4.0));

    // page scrolled: a single anchor at the viewport center now
    let moved = vec![Rect::new(750.0, 400.0, 100.0, 100.0)];
    ctl.enter(&moved, &viewport(), &mut pool, &mut ticker, secs(4.0));
    assert_eq!(ctl.formations().len(), 1);
    assert_eq!(ctl.members_of(0), Some(0..8));
    assert_eq!(ctl.members_of(1), None);
    let t0 = pool.get(0).and_then(|s| s.formation_target).unwrap_or(Vec3::NAN);
    assert_close(t0, Vec3::new(1.0, 0.0, FORMATION_PLANE_Z));
    assert!(pool.iter().all(|s| s.formation_target.is_some()));
}

#[test]
fn entering_without_anchors_stays_ambient() {
    let mut pool = still_pool(8);
    let mut ticker = Ticker::new();
    let mut ctl = FormationController::new(1.0, DriftPolicy::KeepDrifting);
    assert!(!ctl.enter(&[], &viewport(), &mut pool, &mut ticker, secs(0.0)));
    assert_eq!(ctl.phase(), FormationPhase::Ambient);
    assert!(ticker.is_empty());
    assert!(pool.iter().all(|s| s.formation_target.is_none()));
}

#[test]
fn freeze_policy_stops_drift_until_ambient() {
    let mut pool = SpritePool::from_sprites(
        (0..4)
            .map(|i| {
                Sprite::new(
                    Vec3::new(i as f32, 0.0, 0.0),
                    Vec3::new(0.01, 0.0, 0.0),
                    TextureVariant::Dot,
                )
            })
            .collect(),
    );
    let mut ticker = Ticker::new();
    let mut ctl = FormationController::new(1.0, DriftPolicy::FreezeInFormation);

    ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(0.0));
    assert!(pool.iter().all(|s| s.frozen_for_formation && s.velocity == Vec3::ZERO));
    drain(&mut ctl, &mut pool, &mut ticker, secs(2.0));
    let held: Vec<Vec3> = pool.iter().map(|s| s.position).collect();
    pool.integrate_all(1.0, WRAP_BOUNDS);
    for (s, p) in pool.iter().zip(&held) {
        assert_eq!(s.position, *p);
    }

    ctl.leave(&mut ticker, secs(2.0));
    drain(&mut ctl, &mut pool, &mut ticker, secs(4.0));
    for s in pool.iter() {
        assert!(!s.frozen_for_formation);
        assert_eq!(s.velocity, Vec3::new(0.01, 0.0, 0.0));
    }
}

#[test]
fn reset_returns_to_ambient_immediately() {
    let mut pool = still_pool(8);
    let mut ticker = Ticker::new();
    let mut ctl = FormationController::new(1.0, DriftPolicy::KeepDrifting);
    ctl.enter(&two_anchors(), &viewport(), &mut pool, &mut ticker, secs(0.0));
    drain(&mut ctl, &mut pool, &mut ticker, secs(1.0));

    ctl.reset(&mut pool, &mut ticker);
    assert_eq!(ctl.phase(), FormationPhase::Ambient);
    assert!(!ticker.is_running(TweenChannel::Formation));
    for s in pool.iter() {
        assert_eq!(s.position, s.initial_position());
        assert!(s.formation_target.is_none());
    }
}
