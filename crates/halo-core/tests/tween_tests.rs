// Ticker and easing behavior.

use halo_core::*;
use std::time::Duration;

fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s)
}

#[test]
fn easings_hit_their_endpoints_and_never_go_backwards() {
    for easing in [
        Easing::Linear,
        Easing::QuadOut,
        Easing::CubicOut,
        Easing::CubicInOut,
    ] {
        assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?}");
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = easing.apply(i as f32 / 100.0);
            assert!(v >= prev, "{easing:?} decreased at step {i}");
            prev = v;
        }
        // out-of-range input is clamped
        assert_eq!(easing.apply(-1.0), 0.0);
        assert!((easing.apply(2.0) - 1.0).abs() < 1e-6);
    }
    assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
}

#[test]
fn starting_on_a_busy_channel_replaces_the_tween() {
    let mut ticker = Ticker::new();
    let first = ticker.start(TweenTarget::Converge { from: 0.0 }, secs(0.0), 2.0, Easing::Linear);
    let second = ticker.start(TweenTarget::Diverge { from: 0.4 }, secs(0.5), 1.0, Easing::Linear);
    assert_ne!(first, second);
    assert_eq!(ticker.len(), 1);

    let steps = ticker.poll(secs(1.0));
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].id, second);
    assert_eq!(steps[0].target, TweenTarget::Diverge { from: 0.4 });
    assert!((steps[0].progress - 0.5).abs() < 1e-5);
}

#[test]
fn separate_channels_run_side_by_side() {
    let mut ticker = Ticker::new();
    ticker.start(TweenTarget::ScrollDecay { from: 3.0 }, secs(0.0), 0.8, Easing::CubicOut);
    let h = |anchor| TweenTarget::Highlight { anchor, from: 0.0, to: 1.0 };
    ticker.start(h(0), secs(0.0), 0.3, Easing::QuadOut);
    ticker.start(h(1), secs(0.0), 0.3, Easing::QuadOut);
    assert_eq!(ticker.len(), 3);
    assert!(ticker.is_running(TweenChannel::Highlight(1)));
    assert!(!ticker.is_running(TweenChannel::Formation));
}

#[test]
fn finished_tweens_report_once_then_disappear() {
    let mut ticker = Ticker::new();
    ticker.start(TweenTarget::ScrollDecay { from: 2.0 }, secs(0.0), 0.8, Easing::CubicOut);

    let mid = ticker.poll(secs(0.4));
    assert!(!mid[0].finished);
    assert!(mid[0].progress > 0.0 && mid[0].progress < 1.0);

    let end = ticker.poll(secs(5.0));
    assert_eq!(end.len(), 1);
    assert!(end[0].finished);
    assert_eq!(end[0].progress, 1.0);

    assert!(ticker.poll(secs(6.0)).is_empty());
    assert!(ticker.is_empty());
}

#[test]
fn zero_duration_finishes_on_first_poll() {
    let mut ticker = Ticker::new();
    ticker.start(TweenTarget::Converge { from: 0.0 }, secs(1.0), 0.0, Easing::CubicInOut);
    let steps = ticker.poll(secs(1.0));
    assert!(steps[0].finished);
    assert_eq!(steps[0].progress, 1.0);
}

#[test]
fn polling_before_the_start_time_reports_zero() {
    let mut ticker = Ticker::new();
    ticker.start(TweenTarget::Converge { from: 0.0 }, secs(2.0), 1.0, Easing::Linear);
    let steps = ticker.poll(secs(1.0));
    assert_eq!(steps[0].progress, 0.0);
    assert!(!steps[0].finished);
}

#[test]
fn cancel_only_touches_its_channel() {
    let mut ticker = Ticker::new();
    ticker.start(TweenTarget::Converge { from: 0.0 }, secs(0.0), 2.0, Easing::Linear);
    ticker.start(TweenTarget::ScrollDecay { from: 3.0 }, secs(0.0), 0.8, Easing::Linear);
    assert!(ticker.cancel(TweenChannel::Formation));
    assert!(!ticker.cancel(TweenChannel::Formation));
    assert!(ticker.is_running(TweenChannel::ScrollDecay));
    ticker.clear();
    assert!(ticker.is_empty());
}

#[test]
fn lerp_lands_exactly_on_the_end_value() {
    assert_eq!(lerp(3.0, 1.0, 1.0), 1.0);
    assert_eq!(lerp(3.0, 1.0, 0.0), 3.0);
    assert_eq!(lerp(0.1, 0.7, 1.0), 0.7);
    assert!((lerp(0.0, 2.0, 0.25) - 0.5).abs() < 1e-6);
}

#[test]
fn cancel_matching_drops_every_highlight() {
    let mut ticker = Ticker::new();
    let h = |anchor| TweenTarget::Highlight { anchor, from: 1.0, to: 0.0 };
    ticker.start(h(0), secs(0.0), 0.3, Easing::QuadOut);
    ticker.start(h(3), secs(0.0), 0.3, Easing::QuadOut);
    ticker.start(TweenTarget::Converge { from: 0.0 }, secs(0.0), 2.0, Easing::CubicInOut);

    let dropped = ticker.cancel_matching(|c| matches!(c, TweenChannel::Highlight(_)));
    assert_eq!(dropped, 2);
    assert_eq!(ticker.len(), 1);
    assert!(ticker.is_running(TweenChannel::Formation));
}
