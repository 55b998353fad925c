//! Sprite pool and the per-frame motion model.

use crate::constants::*;
use crate::texture::TextureVariant;
use glam::Vec3;
use rand::Rng;
use std::ops::Range;

/// Per-instance look of a sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
    pub opacity: f32,
    pub color: [f32; 3],
    pub scale: f32,
}

impl Default for Visual {
    fn default() -> Self {
        Self {
            opacity: BASE_OPACITY,
            color: BASE_COLOR,
            scale: BASE_SCALE,
        }
    }
}

impl Visual {
    /// Blend towards `other`; `t = 1` yields exactly `other`, `t = 0` exactly `self`.
    pub fn mix(&self, other: &Visual, t: f32) -> Visual {
        if t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        let l = |a: f32, b: f32| a + (b - a) * t;
        Visual {
            opacity: l(self.opacity, other.opacity),
            color: [
                l(self.color[0], other.color[0]),
                l(self.color[1], other.color[1]),
                l(self.color[2], other.color[2]),
            ],
            scale: l(self.scale, other.scale),
        }
    }
}

/// One drifting point sprite.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub position: Vec3,
    initial_position: Vec3,
    base_velocity: Vec3,
    pub velocity: Vec3,
    pub speed_multiplier: f32,
    pub is_highlighted: bool,
    pub frozen_for_formation: bool,
    pub formation_target: Option<Vec3>,
    pub rotation: f32,
    pub texture: TextureVariant,
    /// Baseline look; formation tweens write here, highlighting never does.
    pub visual: Visual,
    /// Blend factor towards the highlight look, in [0, 1].
    pub highlight_mix: f32,
}

impl Sprite {
    pub fn new(position: Vec3, velocity: Vec3, texture: TextureVariant) -> Self {
        Self {
            position,
            initial_position: position,
            base_velocity: velocity,
            velocity,
            speed_multiplier: 1.0,
            is_highlighted: false,
            frozen_for_formation: false,
            formation_target: None,
            rotation: 0.0,
            texture,
            visual: Visual::default(),
            highlight_mix: 0.0,
        }
    }

    /// Ambient return anchor; fixed at construction.
    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    pub fn base_velocity(&self) -> Vec3 {
        self.base_velocity
    }

    /// Place the sprite `amount` of the way from its initial position to its
    /// formation target. No-op without a target.
    pub fn interpolate_to_target(&mut self, amount: f32) {
        if let Some(target) = self.formation_target {
            self.position = if amount <= 0.0 {
                self.initial_position
            } else {
                self.initial_position + (target - self.initial_position) * amount
            };
        }
    }

    /// Stop drifting while assigned to a formation.
    pub fn freeze(&mut self) {
        self.frozen_for_formation = true;
        self.velocity = Vec3::ZERO;
    }

    pub fn thaw(&mut self) {
        self.frozen_for_formation = false;
        self.velocity = self.base_velocity;
    }

    /// Advance one step: drift, wrap, spin.
    #[inline]
    pub fn integrate(&mut self, frame_scale: f32, bounds: Vec3) {
        if !self.frozen_for_formation {
            self.position += self.velocity * (self.speed_multiplier * frame_scale);
        }
        self.position = wrap_position(self.position, bounds);
        self.rotation += SPRITE_ROTATION_STEP * frame_scale;
    }
}

/// Toroidal wrap: past `+bound` lands exactly on `-bound` and vice versa,
/// each axis on its own.
#[inline]
pub fn wrap_position(p: Vec3, bounds: Vec3) -> Vec3 {
    Vec3::new(
        wrap_axis(p.x, bounds.x),
        wrap_axis(p.y, bounds.y),
        wrap_axis(p.z, bounds.z),
    )
}

#[inline]
fn wrap_axis(v: f32, bound: f32) -> f32 {
    if v > bound {
        -bound
    } else if v < -bound {
        bound
    } else {
        v
    }
}

/// Where sprites spawn and how fast they drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnBounds {
    pub half_extents: Vec3,
    pub velocity_half_range: Vec3,
}

impl Default for SpawnBounds {
    fn default() -> Self {
        Self {
            half_extents: SPAWN_HALF_EXTENTS,
            velocity_half_range: VELOCITY_HALF_RANGE,
        }
    }
}

pub struct SpritePool {
    sprites: Vec<Sprite>,
}

impl SpritePool {
    /// Allocate `count` sprites uniformly inside `spawn`. `glyph_mix` is the
    /// fraction of sprites drawn as digits/glyphs instead of dots.
    pub fn new<R: Rng>(
        count: usize,
        spawn: &SpawnBounds,
        glyph_mix: f32,
        rng: &mut R,
    ) -> Self {
        let sym = |rng: &mut R, half: f32| {
            if half > 0.0 {
                rng.gen_range(-half..half)
            } else {
                0.0
            }
        };
        let glyph_mix = glyph_mix.clamp(0.0, 1.0);
        let sprites = (0..count)
            .map(|_| {
                let p = Vec3::new(
                    sym(rng, spawn.half_extents.x),
                    sym(rng, spawn.half_extents.y),
                    sym(rng, spawn.half_extents.z),
                );
                let v = Vec3::new(
                    sym(rng, spawn.velocity_half_range.x),
                    sym(rng, spawn.velocity_half_range.y),
                    sym(rng, spawn.velocity_half_range.z),
                );
                let texture = if glyph_mix > 0.0 && rng.gen::<f32>() < glyph_mix {
                    match rng.gen_range(0..3) {
                        0 => TextureVariant::DigitZero,
                        1 => TextureVariant::DigitOne,
                        _ => TextureVariant::GlyphBraces,
                    }
                } else {
                    TextureVariant::Dot
                };
                Sprite::new(p, v, texture)
            })
            .collect();
        Self { sprites }
    }

    pub fn from_sprites(sprites: Vec<Sprite>) -> Self {
        Self { sprites }
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
        self.sprites.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Sprite> {
        self.sprites.iter_mut()
    }

    /// Sprites in `range`, clipped to the pool.
    pub fn slice_mut(&mut self, range: Range<usize>) -> &mut [Sprite] {
        let end = range.end.min(self.sprites.len());
        let start = range.start.min(end);
        &mut self.sprites[start..end]
    }

    pub fn integrate_all(&mut self, frame_scale: f32, bounds: Vec3) {
        for s in &mut self.sprites {
            s.integrate(frame_scale, bounds);
        }
    }

    /// Apply a speed multiplier to every sprite that is not highlighted.
    pub fn apply_speed(&mut self, multiplier: f32) {
        for s in self.sprites.iter_mut().filter(|s| !s.is_highlighted) {
            s.speed_multiplier = multiplier;
        }
    }
}

/// How many sprites the field should hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleDensity {
    Fixed(u32),
    PerMegapixel { per_megapixel: u32, min: u32 },
}

impl Default for ParticleDensity {
    fn default() -> Self {
        ParticleDensity::PerMegapixel {
            per_megapixel: PARTICLES_PER_MEGAPIXEL,
            min: MIN_PARTICLES,
        }
    }
}

impl ParticleDensity {
    pub fn count_for(&self, width: f32, height: f32) -> usize {
        match *self {
            ParticleDensity::Fixed(n) => n as usize,
            ParticleDensity::PerMegapixel { per_megapixel, min } => {
                let mp = (width.max(0.0) as f64 * height.max(0.0) as f64) / 1_000_000.0;
                let n = (mp * per_megapixel as f64).floor() as u32;
                n.max(min) as usize
            }
        }
    }
}

/// Contiguous sprite ranges per anchor. `floor(pool / anchors)` sprites each,
/// the last anchor also takes the remainder, so the ranges cover the pool
/// exactly once. With fewer sprites than anchors the first anchors get one
/// sprite each and the rest get empty ranges.
pub fn partition_ranges(pool_size: usize, anchor_count: usize) -> Vec<Range<usize>> {
    if anchor_count == 0 {
        return Vec::new();
    }
    let per = pool_size / anchor_count;
    if per == 0 {
        return (0..anchor_count)
            .map(|k| {
                let start = k.min(pool_size);
                start..(k + 1).min(pool_size)
            })
            .collect();
    }
    (0..anchor_count)
        .map(|k| {
            let start = k * per;
            let end = if k + 1 == anchor_count {
                pool_size
            } else {
                start + per
            };
            start..end
        })
        .collect()
}
