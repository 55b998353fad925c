// Page effect math: text scramble, card tilt, reveal threshold and the
// wireframe modal icon.

use glam::Vec2;
use halo_core::effects::*;
use halo_core::icon::WireIcon;
use halo_core::{Rect, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

#[test]
fn scramble_at_full_progress_is_the_original() {
    let mut rng = StdRng::seed_from_u64(5);
    let text = "Teams of 2-4. Bring a laptop!";
    assert_eq!(scramble_frame(text, 1.0, &mut rng), text);
    assert_eq!(scramble_frame(text, 1.7, &mut rng), text);
}

#[test]
fn scramble_at_zero_is_pure_noise_of_the_same_length() {
    let mut rng = StdRng::seed_from_u64(5);
    let text = "réglement";
    let noise = scramble_frame(text, 0.0, &mut rng);
    assert_eq!(noise.chars().count(), text.chars().count());
    assert!(noise.bytes().all(|b| SCRAMBLE_CHARSET.contains(&b)));
}

#[test]
fn scramble_reports_completion() {
    let mut rng = StdRng::seed_from_u64(9);
    let s = Scramble::new("rules", Duration::from_millis(100), Duration::from_secs(1));
    assert_eq!(s.progress(Duration::ZERO), 0.0);
    let (_, done) = s.frame(Duration::from_millis(600), &mut rng);
    assert!(!done);
    let (text, done) = s.frame(Duration::from_millis(1100), &mut rng);
    assert!(done);
    assert_eq!(text, s.original());

    let instant = Scramble::new("x", Duration::ZERO, Duration::ZERO);
    assert_eq!(instant.progress(Duration::ZERO), 1.0);
}

#[test]
fn tilt_follows_the_pointer() {
    let card = Rect::new(0.0, 0.0, 200.0, 100.0);
    let centered = Tilt::follow(&card, Vec2::new(100.0, 50.0));
    assert_eq!(centered.rotate_x_deg, 0.0);
    assert_eq!(centered.rotate_y_deg, 0.0);
    assert_eq!(centered.scale, 1.02);

    let t = Tilt::follow(&card, Vec2::new(150.0, 70.0));
    assert!((t.rotate_x_deg - 2.0).abs() < 1e-6);
    assert!((t.rotate_y_deg + 5.0).abs() < 1e-6);
}

#[test]
fn tilt_css() {
    assert_eq!(
        Tilt::REST.css(),
        "perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1)"
    );
    let t = Tilt {
        rotate_x_deg: 2.5,
        rotate_y_deg: -4.0,
        scale: 1.02,
    };
    assert_eq!(
        t.css(),
        "perspective(1000px) rotateX(2.5deg) rotateY(-4deg) scale(1.02)"
    );
}

#[test]
fn reveal_needs_enough_of_the_element_on_screen() {
    let vp = Viewport::new(100.0, 100.0);
    assert!(should_reveal(&Rect::new(0.0, 50.0, 100.0, 100.0), &vp));
    assert!(!should_reveal(&Rect::new(0.0, 80.0, 100.0, 100.0), &vp));
    assert!(!should_reveal(&Rect::new(0.0, 0.0, 0.0, 0.0), &vp));
}

#[test]
fn icon_projects_twelve_edges_inside_its_box() {
    let icon = WireIcon::new();
    let frame = icon.project(64.0, 64.0);
    assert_eq!(frame.edges.len(), 12);
    assert_eq!(frame.points.len(), 6);
    for p in &frame.points {
        assert!(p.x > 0.0 && p.x < 64.0 && p.y > 0.0 && p.y < 64.0, "{p:?}");
    }
    // unrotated: +x to the right, +y up (smaller screen y), +z dead center
    assert!(frame.points[0].x > 32.0);
    assert!(frame.points[1].x < 32.0);
    assert!(frame.points[2].y < 32.0);
    assert!((frame.points[4] - Vec2::new(32.0, 32.0)).length() < 1e-4);
    assert_eq!(frame.edges[0], (frame.points[0], frame.points[2]));
}

#[test]
fn icon_spins_each_tick() {
    let mut icon = WireIcon::new();
    let before = icon.project(64.0, 64.0);
    icon.step();
    let r = icon.rotation();
    assert!(r.x > 0.0 && r.y > r.x && r.z > 0.0);
    let after = icon.project(64.0, 64.0);
    assert_ne!(before.points[0], after.points[0]);
}
