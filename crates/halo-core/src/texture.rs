//! Sprite images rasterized once at startup.
//!
//! Every variant is drawn on the CPU into a small RGBA8 image (straight alpha),
//! shared read-only through `Rc`, and packed into a single horizontal atlas
//! strip that the GPU front end uploads once.

use crate::constants::TEXTURE_SIZE;
use fnv::FnvHashMap;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TextureVariant {
    #[default]
    Dot,
    DigitZero,
    DigitOne,
    GlyphBraces,
}

impl TextureVariant {
    pub const ALL: [TextureVariant; 4] = [
        TextureVariant::Dot,
        TextureVariant::DigitZero,
        TextureVariant::DigitOne,
        TextureVariant::GlyphBraces,
    ];

    pub fn slot(self) -> usize {
        match self {
            TextureVariant::Dot => 0,
            TextureVariant::DigitZero => 1,
            TextureVariant::DigitOne => 2,
            TextureVariant::GlyphBraces => 3,
        }
    }
}

/// An RGBA8 image, row-major, straight (non-premultiplied) alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Texture {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }
}

/// All variants side by side in one strip.
#[derive(Clone, Debug)]
pub struct Atlas {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct TextureCache {
    size: u32,
    entries: FnvHashMap<TextureVariant, Rc<Texture>>,
    atlas: Atlas,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::build(TEXTURE_SIZE)
    }

    pub fn build(size: u32) -> Self {
        let size = size.max(8);
        let mut entries = FnvHashMap::default();
        for variant in TextureVariant::ALL {
            entries.insert(variant, Rc::new(rasterize(variant, size)));
        }
        let atlas = pack_atlas(size, &entries);
        log::debug!(
            "[textures] rasterized {} variants at {}px, atlas {}x{}",
            entries.len(),
            size,
            atlas.width,
            atlas.height
        );
        Self {
            size,
            entries,
            atlas,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn get(&self, variant: TextureVariant) -> Option<Rc<Texture>> {
        self.entries.get(&variant).cloned()
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    /// `[u0, v0, u1, v1]` of a variant inside the atlas.
    pub fn uv_rect(&self, variant: TextureVariant) -> [f32; 4] {
        uv_rect_for_slot(variant.slot(), TextureVariant::ALL.len())
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub fn uv_rect_for_slot(slot: usize, slots: usize) -> [f32; 4] {
    let w = 1.0 / slots.max(1) as f32;
    [slot as f32 * w, 0.0, (slot + 1) as f32 * w, 1.0]
}

fn pack_atlas(size: u32, entries: &FnvHashMap<TextureVariant, Rc<Texture>>) -> Atlas {
    let n = TextureVariant::ALL.len() as u32;
    let width = size * n;
    let mut rgba = vec![0u8; (width * size * 4) as usize];
    for variant in TextureVariant::ALL {
        let Some(tex) = entries.get(&variant) else {
            continue;
        };
        let x0 = variant.slot() as u32 * size;
        for y in 0..size {
            let src = ((y * size) * 4) as usize;
            let dst = ((y * width + x0) * 4) as usize;
            let row = (size * 4) as usize;
            rgba[dst..dst + row].copy_from_slice(&tex.rgba[src..src + row]);
        }
    }
    Atlas {
        width,
        height: size,
        rgba,
    }
}

// ---------------- Rasterization ----------------

const DOT_CORE: [f32; 4] = [59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0, 1.0];
const GLOW_INNER: [f32; 4] = [96.0 / 255.0, 165.0 / 255.0, 250.0 / 255.0, 0.6];
const GLOW_OUTER: [f32; 4] = [59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0, 0.0];

// Reference geometry on a 64px cell; scaled for other sizes.
const DOT_RADIUS: f32 = 20.0;
const GLOW_START: f32 = 15.0;
const GLOW_END: f32 = 25.0;
const REFERENCE_SIZE: f32 = 64.0;

struct Pixmap {
    size: u32,
    px: Vec<[f32; 4]>,
}

impl Pixmap {
    fn new(size: u32) -> Self {
        Self {
            size,
            px: vec![[0.0; 4]; (size * size) as usize],
        }
    }

    /// Source-over composite of `paint(x, y)` (straight alpha, alpha
    /// already scaled by coverage) onto every pixel.
    fn composite(&mut self, mut paint: impl FnMut(f32, f32) -> [f32; 4]) {
        for y in 0..self.size {
            for x in 0..self.size {
                let s = paint(x as f32 + 0.5, y as f32 + 0.5);
                if s[3] <= 0.0 {
                    continue;
                }
                let d = &mut self.px[(y * self.size + x) as usize];
                let out_a = s[3] + d[3] * (1.0 - s[3]);
                if out_a > 0.0 {
                    for c in 0..3 {
                        d[c] = (s[c] * s[3] + d[c] * d[3] * (1.0 - s[3])) / out_a;
                    }
                }
                d[3] = out_a;
            }
        }
    }

    fn into_texture(self) -> Texture {
        let mut rgba = Vec::with_capacity(self.px.len() * 4);
        for p in &self.px {
            for c in p {
                rgba.push((c.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
        Texture {
            width: self.size,
            height: self.size,
            rgba,
        }
    }
}

#[inline]
fn with_alpha(mut c: [f32; 4], coverage: f32) -> [f32; 4] {
    c[3] *= coverage.clamp(0.0, 1.0);
    c
}

#[inline]
fn mix4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

fn rasterize(variant: TextureVariant, size: u32) -> Texture {
    match variant {
        TextureVariant::Dot => rasterize_dot(size),
        TextureVariant::DigitZero => rasterize_glyphs(size, &[&GLYPH_ZERO]),
        TextureVariant::DigitOne => rasterize_glyphs(size, &[&GLYPH_ONE]),
        TextureVariant::GlyphBraces => rasterize_glyphs(size, &[&GLYPH_LBRACE, &GLYPH_RBRACE]),
    }
}

fn rasterize_dot(size: u32) -> Texture {
    let k = size as f32 / REFERENCE_SIZE;
    let c = size as f32 * 0.5;
    let (r_core, r0, r1) = (DOT_RADIUS * k, GLOW_START * k, GLOW_END * k);
    let mut pm = Pixmap::new(size);
    // solid disc
    pm.composite(|x, y| {
        let d = ((x - c).powi(2) + (y - c).powi(2)).sqrt();
        with_alpha(DOT_CORE, r_core - d + 0.5)
    });
    // radial glow clipped to the outer circle
    pm.composite(|x, y| {
        let d = ((x - c).powi(2) + (y - c).powi(2)).sqrt();
        let t = (d - r0) / (r1 - r0);
        with_alpha(mix4(GLOW_INNER, GLOW_OUTER, t), r1 - d + 0.5)
    });
    pm.into_texture()
}

// 5x7 bitmaps, one string per row, '#' lit.
const GLYPH_W: usize = 5;
const GLYPH_H: usize = 7;
type Glyph = [&'static str; GLYPH_H];

const GLYPH_ZERO: Glyph = [
    ".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###.",
];
const GLYPH_ONE: Glyph = [
    "..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###.",
];
const GLYPH_LBRACE: Glyph = [
    "..##.", ".#...", ".#...", "#....", ".#...", ".#...", "..##.",
];
const GLYPH_RBRACE: Glyph = [
    ".##..", "...#.", "...#.", "....#", "...#.", "...#.", ".##..",
];

const GLYPH_GLOW_PX: f32 = 6.0;
const GLYPH_GLOW_ALPHA: f32 = 0.35;

fn rasterize_glyphs(size: u32, glyphs: &[&Glyph]) -> Texture {
    let cols = glyphs.len() * GLYPH_W + glyphs.len().saturating_sub(1);
    let usable = size as f32 * 0.75;
    let cell = (usable / cols.max(GLYPH_H) as f32).floor().max(1.0);
    let ox = ((size as f32 - cell * cols as f32) * 0.5).floor();
    let oy = ((size as f32 - cell * GLYPH_H as f32) * 0.5).floor();

    // lit cells as pixel rects [x0, y0, x1, y1]
    let mut lit: Vec<[f32; 4]> = Vec::new();
    for (gi, glyph) in glyphs.iter().enumerate() {
        let col0 = gi * (GLYPH_W + 1);
        for (row, line) in glyph.iter().enumerate() {
            for (col, ch) in line.bytes().enumerate() {
                if ch == b'#' {
                    let x0 = ox + (col0 + col) as f32 * cell;
                    let y0 = oy + row as f32 * cell;
                    lit.push([x0, y0, x0 + cell, y0 + cell]);
                }
            }
        }
    }

    let dist = |x: f32, y: f32| {
        lit.iter()
            .map(|r| {
                let dx = (r[0] - x).max(0.0).max(x - r[2]);
                let dy = (r[1] - y).max(0.0).max(y - r[3]);
                (dx * dx + dy * dy).sqrt()
            })
            .fold(f32::MAX, f32::min)
    };

    let mut pm = Pixmap::new(size);
    pm.composite(|x, y| {
        let d = dist(x, y);
        with_alpha(GLOW_INNER, GLYPH_GLOW_ALPHA / GLOW_INNER[3] * (1.0 - d / GLYPH_GLOW_PX))
    });
    pm.composite(|x, y| with_alpha(DOT_CORE, 1.0 - dist(x, y)));
    pm.into_texture()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_is_opaque_at_center_and_clear_at_corner() {
        let tex = rasterize_dot(64);
        let center = tex.pixel(32, 32);
        assert_eq!(center[3], 255);
        assert_eq!(tex.pixel(0, 0)[3], 0);
        // beyond the glow radius nothing is painted
        assert_eq!(tex.pixel(32, 60)[3], 0);
    }

    #[test]
    fn glyph_cells_fit_inside_texture() {
        let tex = rasterize_glyphs(64, &[&GLYPH_LBRACE, &GLYPH_RBRACE]);
        assert_eq!(tex.rgba.len(), 64 * 64 * 4);
        // border row stays transparent
        assert!((0..64).all(|x| tex.pixel(x, 0)[3] == 0));
    }
}
