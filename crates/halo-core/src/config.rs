//! Scene options.
//!
//! Defaults come from [`crate::constants`]. The page may override a handful of
//! them through string key/value pairs (the canvas `data-*` attributes);
//! unknown keys and unparsable values are reported as [`HaloError`]s and leave
//! the current value untouched.

use crate::constants::*;
use crate::error::{HaloError, Result};
use crate::scroll::TriggerRule;
use crate::sprite::{ParticleDensity, SpawnBounds};
use glam::Vec3;

/// Whether sprites keep drifting while they belong to a formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriftPolicy {
    /// Integration continues under formation interpolation; the tween places
    /// the sprite and drift is added on top, so held rings slowly dissolve.
    #[default]
    KeepDrifting,
    /// Assigned sprites are frozen from convergence until they are back in
    /// ambient mode; only the tween moves them.
    FreezeInFormation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub density: ParticleDensity,
    pub spawn: SpawnBounds,
    pub wrap_bounds: Vec3,
    pub glyph_mix: f32,
    pub formation_radius: f32,
    pub base_color: [f32; 3],
    pub highlight_color: [f32; 3],
    pub drift_policy: DriftPolicy,
    pub trigger_rule: TriggerRule,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            density: ParticleDensity::default(),
            spawn: SpawnBounds::default(),
            wrap_bounds: WRAP_BOUNDS,
            glyph_mix: 0.0,
            formation_radius: FORMATION_RADIUS,
            base_color: BASE_COLOR,
            highlight_color: HIGHLIGHT_COLOR,
            drift_policy: DriftPolicy::default(),
            trigger_rule: TriggerRule::default(),
        }
    }
}

impl SceneConfig {
    /// Recognized keys: `particle-density` (`auto`, `<count>` or
    /// `<per-megapixel>/mp`), `formation-radius`, `highlight-color`,
    /// `base-color`, `drift-policy` (`drift` | `freeze`), `glyph-mix` (0..1),
    /// `trigger` (`center` | `overlap`).
    pub fn apply_option(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let invalid = || HaloError::InvalidOption {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "particle-density" => {
                self.density = parse_density(value).ok_or_else(invalid)?;
            }
            "formation-radius" => {
                let r: f32 = value.parse().map_err(|_| invalid())?;
                if !(r.is_finite() && r > 0.0) {
                    return Err(invalid());
                }
                self.formation_radius = r;
            }
            "highlight-color" => self.highlight_color = parse_hex_color(value)?,
            "base-color" => self.base_color = parse_hex_color(value)?,
            "drift-policy" => {
                self.drift_policy = match value {
                    "drift" | "keep-drifting" => DriftPolicy::KeepDrifting,
                    "freeze" | "freeze-in-formation" => DriftPolicy::FreezeInFormation,
                    _ => return Err(invalid()),
                };
            }
            "glyph-mix" => {
                let m: f32 = value.parse().map_err(|_| invalid())?;
                if !(0.0..=1.0).contains(&m) {
                    return Err(invalid());
                }
                self.glyph_mix = m;
            }
            "trigger" => {
                self.trigger_rule = match value {
                    "center" => TriggerRule::CenterLine,
                    "overlap" => TriggerRule::Overlap,
                    _ => return Err(invalid()),
                };
            }
            _ => return Err(HaloError::UnknownOption(key.to_string())),
        }
        Ok(())
    }

    /// Apply every pair, logging and skipping the ones that fail.
    pub fn apply_options<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (key, value) in pairs {
            if let Err(e) = self.apply_option(key, value) {
                log::warn!("[config] {e}; keeping default");
            }
        }
    }
}

fn parse_density(value: &str) -> Option<ParticleDensity> {
    if value == "auto" {
        return Some(ParticleDensity::default());
    }
    if let Some(per) = value.strip_suffix("/mp") {
        let per_megapixel: u32 = per.trim().parse().ok()?;
        return Some(ParticleDensity::PerMegapixel {
            per_megapixel,
            min: MIN_PARTICLES,
        });
    }
    value.parse().ok().map(ParticleDensity::Fixed)
}

/// Parse `#rrggbb`, `rrggbb` or `0xrrggbb` into 0..1 sRGB components.
pub fn parse_hex_color(value: &str) -> Result<[f32; 3]> {
    let v = value.trim();
    let hex = v
        .strip_prefix('#')
        .or_else(|| v.strip_prefix("0x"))
        .or_else(|| v.strip_prefix("0X"))
        .unwrap_or(v);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HaloError::InvalidColor(value.to_string()));
    }
    let n = u32::from_str_radix(hex, 16).map_err(|_| HaloError::InvalidColor(value.to_string()))?;
    Ok([
        ((n >> 16) & 0xff) as f32 / 255.0,
        ((n >> 8) & 0xff) as f32 / 255.0,
        (n & 0xff) as f32 / 255.0,
    ])
}
