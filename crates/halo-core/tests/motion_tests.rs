// Host-side tests for the sprite pool and the per-frame motion model.

use glam::Vec3;
use halo_core::constants::*;
use halo_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sprite_at(position: Vec3, velocity: Vec3) -> Sprite {
    Sprite::new(position, velocity, TextureVariant::Dot)
}

#[test]
fn crossing_the_bound_teleports_to_the_opposite_bound() {
    let mut s = sprite_at(Vec3::new(119.99, 0.0, 0.0), Vec3::new(0.02, 0.0, 0.0));
    s.integrate(1.0, WRAP_BOUNDS);
    assert_eq!(s.position.x, -WRAP_BOUNDS.x);
    // other axes untouched
    assert_eq!(s.position.y, 0.0);
    assert_eq!(s.position.z, 0.0);

    let mut s = sprite_at(Vec3::new(0.0, -119.99, -79.99), Vec3::new(0.0, -0.05, -0.05));
    s.integrate(1.0, WRAP_BOUNDS);
    assert_eq!(s.position.y, WRAP_BOUNDS.y);
    assert_eq!(s.position.z, WRAP_BOUNDS.z);
}

#[test]
fn positions_stay_within_bounds_over_many_frames() {
    let mut rng = StdRng::seed_from_u64(7);
    let spawn = SpawnBounds {
        half_extents: Vec3::new(100.0, 100.0, 70.0),
        velocity_half_range: Vec3::new(3.0, 3.0, 3.0),
    };
    let mut pool = SpritePool::new(500, &spawn, 0.3, &mut rng);
    pool.apply_speed(3.0);
    for frame in 0..400 {
        let frame_scale = (frame % 5) as f32; // 0..4
        pool.integrate_all(frame_scale, WRAP_BOUNDS);
        for s in pool.iter() {
            assert!(s.position.x.abs() <= WRAP_BOUNDS.x, "x out of bounds: {}", s.position.x);
            assert!(s.position.y.abs() <= WRAP_BOUNDS.y, "y out of bounds: {}", s.position.y);
            assert!(s.position.z.abs() <= WRAP_BOUNDS.z, "z out of bounds: {}", s.position.z);
        }
    }
}

#[test]
fn speed_multiplier_and_frame_scale_scale_displacement() {
    let mut s = sprite_at(Vec3::ZERO, Vec3::new(0.01, 0.0, 0.0));
    s.speed_multiplier = 3.0;
    s.integrate(2.0, WRAP_BOUNDS);
    assert!((s.position.x - 0.06).abs() < 1e-6);
    assert!((s.rotation - 2.0 * SPRITE_ROTATION_STEP).abs() < 1e-6);
}

#[test]
fn frozen_sprites_do_not_drift_and_thaw_restores_velocity() {
    let v = Vec3::new(0.02, -0.01, 0.0);
    let mut s = sprite_at(Vec3::new(1.0, 1.0, 1.0), v);
    s.freeze();
    assert_eq!(s.velocity, Vec3::ZERO);
    s.integrate(1.0, WRAP_BOUNDS);
    assert_eq!(s.position, Vec3::new(1.0, 1.0, 1.0));
    s.thaw();
    assert!(!s.frozen_for_formation);
    assert_eq!(s.velocity, v);
    assert_eq!(s.base_velocity(), v);
}

#[test]
fn interpolation_without_target_is_a_no_op() {
    let mut s = sprite_at(Vec3::new(3.0, 2.0, 1.0), Vec3::ZERO);
    s.interpolate_to_target(0.5);
    assert_eq!(s.position, Vec3::new(3.0, 2.0, 1.0));

    s.formation_target = Some(Vec3::new(5.0, 2.0, 1.0));
    s.interpolate_to_target(0.5);
    assert!((s.position.x - 4.0).abs() < 1e-6);
    s.interpolate_to_target(0.0);
    assert_eq!(s.position, s.initial_position());
}

#[test]
fn apply_speed_skips_highlighted_sprites() {
    let mut pool = SpritePool::from_sprites(vec![
        sprite_at(Vec3::ZERO, Vec3::ZERO),
        sprite_at(Vec3::ZERO, Vec3::ZERO),
    ]);
    if let Some(s) = pool.get_mut(1) {
        s.is_highlighted = true;
        s.speed_multiplier = HIGHLIGHT_SPEED_MULTIPLIER;
    }
    pool.apply_speed(2.5);
    assert_eq!(pool.get(0).map(|s| s.speed_multiplier), Some(2.5));
    assert_eq!(
        pool.get(1).map(|s| s.speed_multiplier),
        Some(HIGHLIGHT_SPEED_MULTIPLIER)
    );
}

#[test]
fn pool_spawns_inside_spawn_bounds_with_requested_count() {
    let mut rng = StdRng::seed_from_u64(42);
    let spawn = SpawnBounds::default();
    let pool = SpritePool::new(1000, &spawn, 0.0, &mut rng);
    assert_eq!(pool.len(), 1000);
    for s in pool.iter() {
        assert!(s.position.x.abs() <= spawn.half_extents.x);
        assert!(s.position.y.abs() <= spawn.half_extents.y);
        assert!(s.position.z.abs() <= spawn.half_extents.z);
        assert_eq!(s.position, s.initial_position());
        assert_eq!(s.texture, TextureVariant::Dot);
        assert_eq!(s.speed_multiplier, 1.0);
        assert!(s.formation_target.is_none());
    }
}

#[test]
fn glyph_mix_of_one_uses_only_glyph_textures() {
    let mut rng = StdRng::seed_from_u64(3);
    let pool = SpritePool::new(200, &SpawnBounds::default(), 1.0, &mut rng);
    assert!(pool.iter().all(|s| s.texture != TextureVariant::Dot));
}

#[test]
fn empty_pool_is_valid() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut pool = SpritePool::new(0, &SpawnBounds::default(), 0.0, &mut rng);
    assert!(pool.is_empty());
    pool.integrate_all(1.0, WRAP_BOUNDS);
    assert!(pool.slice_mut(0..10).is_empty());
}

#[test]
fn density_follows_viewport_area_with_floor() {
    let auto = ParticleDensity::default();
    // 1920x1080 is ~2 megapixels -> 248, below the minimum
    assert_eq!(auto.count_for(1920.0, 1080.0), MIN_PARTICLES as usize);
    assert_eq!(auto.count_for(10_000.0, 10_000.0), 12_000);
    assert_eq!(auto.count_for(0.0, 0.0), MIN_PARTICLES as usize);
    assert_eq!(ParticleDensity::Fixed(5).count_for(1920.0, 1080.0), 5);
}

fn assert_total_disjoint_cover(pool: usize, anchors: usize) {
    let ranges = partition_ranges(pool, anchors);
    assert_eq!(ranges.len(), anchors);
    let mut seen = vec![0u32; pool];
    for r in &ranges {
        for i in r.clone() {
            seen[i] += 1;
        }
    }
    assert!(
        seen.iter().all(|&n| n == 1),
        "pool {pool} anchors {anchors}: {ranges:?}"
    );
}

#[test]
fn partition_is_a_total_disjoint_cover() {
    for pool in [0usize, 1, 2, 7, 8, 10, 800, 801] {
        for anchors in 1..=9 {
            assert_total_disjoint_cover(pool, anchors);
        }
    }
    assert!(partition_ranges(8, 0).is_empty());
}

#[test]
fn partition_examples() {
    assert_eq!(partition_ranges(8, 2), vec![0..4, 4..8]);
    assert_eq!(partition_ranges(10, 3), vec![0..3, 3..6, 6..10]);
    assert_eq!(partition_ranges(2, 4), vec![0..1, 1..2, 2..2, 2..2]);
}
