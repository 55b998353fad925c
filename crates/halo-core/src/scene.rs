//! The particle scene: pool, formations, scroll coupling and the frame tick.
//!
//! `Scene` is the single owner of all mutable animation state. Page events
//! (`on_scroll`, `sample_trigger`, `highlight_anchor`, ...) and the per-frame
//! [`Scene::tick`] are the only writers, all on one thread.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::formation::FormationController;
use crate::geometry::{Rect, Viewport};
use crate::render::{FrameView, SpriteInstance};
use crate::scroll::{ScrollBridge, TriggerEdge, TriggerTracker};
use crate::sprite::{Sprite, SpritePool, Visual};
use crate::state::{AnimationState, Camera};
use crate::texture::TextureCache;
use crate::tween::{lerp, Easing, Ticker, TweenChannel, TweenStep, TweenTarget};
use rand::Rng;
use std::time::Duration;

pub struct Scene {
    config: SceneConfig,
    pool: SpritePool,
    state: AnimationState,
    formation: FormationController,
    scroll: ScrollBridge,
    trigger: TriggerTracker,
    ticker: Ticker,
    textures: TextureCache,
    viewport: Viewport,
    camera: Camera,
    group_rotation: f32,
    pulse_clock: f32,
    last_tick: Option<Duration>,
    instances: Vec<SpriteInstance>,
}

impl Scene {
    /// Build the field for `viewport`, sized by the configured density.
    pub fn new<R: Rng>(
        config: SceneConfig,
        viewport: Viewport,
        scroll_offset: f64,
        rng: &mut R,
    ) -> Self {
        let count = config
            .density
            .count_for(viewport.width, viewport.height);
        let pool = SpritePool::new(count, &config.spawn, config.glyph_mix, rng);
        log::info!(
            "[scene] {} sprites for {:.0}x{:.0} viewport",
            count,
            viewport.width,
            viewport.height
        );
        Self::with_pool(config, viewport, scroll_offset, pool)
    }

    /// Build around an existing pool (fixed layouts, tests).
    pub fn with_pool(
        config: SceneConfig,
        viewport: Viewport,
        scroll_offset: f64,
        mut pool: SpritePool,
    ) -> Self {
        for s in pool.iter_mut() {
            s.visual.color = config.base_color;
        }
        let formation = FormationController::new(config.formation_radius, config.drift_policy);
        let trigger = TriggerTracker::new(config.trigger_rule);
        let instances = Vec::with_capacity(pool.len());
        Self {
            camera: Camera::for_aspect(viewport.aspect()),
            config,
            pool,
            state: AnimationState::default(),
            formation,
            scroll: ScrollBridge::new(scroll_offset),
            trigger,
            ticker: Ticker::new(),
            textures: TextureCache::new(),
            viewport,
            group_rotation: 0.0,
            pulse_clock: 0.0,
            last_tick: None,
            instances,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn pool(&self) -> &SpritePool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut SpritePool {
        &mut self.pool
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn formation(&self) -> &FormationController {
        &self.formation
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn group_rotation(&self) -> f32 {
        self.group_rotation
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = Camera::for_aspect(viewport.aspect()).aspect;
    }

    // ---------------- Scroll ----------------

    /// A scroll event at `offset` pixels. Restarts the quiet-period debounce.
    pub fn on_scroll(&mut self, offset: f64, now: Duration) {
        let speed = self.scroll.on_scroll(offset, now);
        self.ticker.cancel(TweenChannel::ScrollDecay);
        self.set_scroll_speed(speed);
    }

    fn set_scroll_speed(&mut self, speed: f32) {
        let speed = speed.clamp(SCROLL_SPEED_MIN, SCROLL_SPEED_MAX);
        self.state.scroll_speed_multiplier = speed;
        self.pool.apply_speed(speed);
    }

    // ---------------- Formation ----------------

    /// Feed the trigger region's current rect (`None` when it is missing).
    /// `anchors` is only queried on entry so rects are always live.
    pub fn sample_trigger<F>(
        &mut self,
        region: Option<Rect>,
        anchors: F,
        now: Duration,
    ) -> Option<TriggerEdge>
    where
        F: FnOnce() -> Vec<Rect>,
    {
        let edge = self.trigger.update(region.as_ref(), &self.viewport)?;
        match edge {
            TriggerEdge::Entered => {
                let rects = anchors();
                self.enter_formation(&rects, now);
            }
            TriggerEdge::Left => {
                self.leave_formation(now);
            }
        }
        Some(edge)
    }

    pub fn enter_formation(&mut self, anchors: &[Rect], now: Duration) -> bool {
        if !self.formation.phase().accepts_highlight() {
            // partitions are about to be rebuilt; pending fades would land on
            // the wrong sprites
            self.clear_highlights();
        }
        let changed = self.formation.enter(
            anchors,
            &self.viewport,
            &mut self.pool,
            &mut self.ticker,
            now,
        );
        self.state.phase = self.formation.phase();
        changed
    }

    pub fn leave_formation(&mut self, now: Duration) -> bool {
        let changed = self.formation.leave(&mut self.ticker, now);
        self.state.phase = self.formation.phase();
        changed
    }

    // ---------------- Highlight ----------------

    /// Pointer entered anchor `anchor`. Only honored while halos are forming
    /// or held; a previously highlighted anchor is released first.
    pub fn highlight_anchor(&mut self, anchor: usize, now: Duration) -> bool {
        if !self.state.phase.accepts_highlight() || self.state.active_highlight == Some(anchor) {
            return false;
        }
        let Some(range) = self.formation.members_of(anchor) else {
            return false;
        };
        if let Some(prev) = self.state.active_highlight {
            self.unhighlight_anchor(prev, now);
        }
        let sprites = self.pool.slice_mut(range);
        let from = sprites.first().map(|s| s.highlight_mix).unwrap_or(0.0);
        for s in sprites.iter_mut() {
            s.is_highlighted = true;
            s.speed_multiplier = HIGHLIGHT_SPEED_MULTIPLIER;
        }
        self.ticker.start(
            TweenTarget::Highlight {
                anchor,
                from,
                to: 1.0,
            },
            now,
            HIGHLIGHT_SECS,
            Easing::QuadOut,
        );
        self.state.active_highlight = Some(anchor);
        log::debug!("[highlight] anchor {anchor} on");
        true
    }

    /// Pointer left anchor `anchor`: fade back to the baseline look and
    /// rejoin the scroll-driven speed.
    pub fn unhighlight_anchor(&mut self, anchor: usize, now: Duration) -> bool {
        let Some(range) = self.formation.members_of(anchor) else {
            return false;
        };
        let speed = self.state.scroll_speed_multiplier;
        let sprites = self.pool.slice_mut(range);
        if !sprites.iter().any(|s| s.is_highlighted) {
            return false;
        }
        let from = sprites.first().map(|s| s.highlight_mix).unwrap_or(0.0);
        for s in sprites.iter_mut() {
            s.is_highlighted = false;
            s.speed_multiplier = speed;
        }
        self.ticker.start(
            TweenTarget::Highlight {
                anchor,
                from,
                to: 0.0,
            },
            now,
            HIGHLIGHT_SECS,
            Easing::QuadOut,
        );
        if self.state.active_highlight == Some(anchor) {
            self.state.active_highlight = None;
        }
        log::debug!("[highlight] anchor {anchor} off");
        true
    }

    /// Drop every highlight at once: cancel the fades, zero the mix and hand
    /// the sprites back to the scroll-driven speed.
    fn clear_highlights(&mut self) {
        self.ticker
            .cancel_matching(|c| matches!(c, TweenChannel::Highlight(_)));
        let speed = self.state.scroll_speed_multiplier;
        for s in self.pool.iter_mut() {
            s.highlight_mix = 0.0;
            if s.is_highlighted {
                s.is_highlighted = false;
                s.speed_multiplier = speed;
            }
        }
        self.state.active_highlight = None;
    }

    // ---------------- Frame ----------------

    /// Advance everything to `now`: scroll debounce, tweens, motion, group
    /// rotation, then rebuild the instance list for drawing.
    pub fn tick(&mut self, now: Duration) {
        let dt = match self.last_tick {
            Some(prev) => now.saturating_sub(prev).as_secs_f32(),
            None => 1.0 / REFERENCE_FPS,
        };
        self.last_tick = Some(now);
        let frame_scale = (dt * REFERENCE_FPS).clamp(0.0, MAX_FRAME_SCALE);

        if self.scroll.take_quiet(now) && self.state.scroll_speed_multiplier > SCROLL_SPEED_MIN {
            self.ticker.start(
                TweenTarget::ScrollDecay {
                    from: self.state.scroll_speed_multiplier,
                },
                now,
                SCROLL_DECAY_SECS,
                Easing::CubicOut,
            );
        }

        for step in self.ticker.poll(now) {
            self.apply_step(step);
        }
        self.state.phase = self.formation.phase();

        self.pool
            .integrate_all(frame_scale, self.config.wrap_bounds);
        self.group_rotation += GROUP_ROTATION_STEP * frame_scale;
        self.pulse_clock += dt;
        self.rebuild_instances();
    }

    fn apply_step(&mut self, step: TweenStep) {
        match step.target {
            TweenTarget::Converge { .. } | TweenTarget::Diverge { .. } => {
                self.formation
                    .apply_step(&mut self.pool, step.target, step.progress, step.finished);
            }
            TweenTarget::ScrollDecay { from } => {
                let speed = lerp(from, SCROLL_SPEED_MIN, step.progress);
                self.set_scroll_speed(speed);
            }
            TweenTarget::Highlight { anchor, from, to } => {
                if let Some(range) = self.formation.members_of(anchor) {
                    let mix = lerp(from, to, step.progress);
                    for s in self.pool.slice_mut(range) {
                        s.highlight_mix = mix;
                    }
                }
            }
        }
    }

    /// Look of sprite `index` as it will be drawn this frame.
    pub fn rendered_visual(&self, index: usize) -> Option<Visual> {
        self.pool.get(index).map(|s| self.visual_for(s))
    }

    fn visual_for(&self, s: &Sprite) -> Visual {
        if s.highlight_mix <= 0.0 {
            return s.visual;
        }
        let highlight = Visual {
            opacity: HIGHLIGHT_OPACITY,
            color: self.config.highlight_color,
            scale: s.visual.scale * HIGHLIGHT_SCALE_FACTOR,
        };
        let mut v = s.visual.mix(&highlight, s.highlight_mix);
        let pulse = PULSE_AMPLITUDE * s.highlight_mix * (self.pulse_clock * PULSE_RATE).sin();
        v.scale *= 1.0 + pulse;
        v
    }

    fn rebuild_instances(&mut self) {
        let mut instances = std::mem::take(&mut self.instances);
        instances.clear();
        instances.extend(self.pool.iter().map(|s| {
            let v = self.visual_for(s);
            SpriteInstance {
                position: s.position.to_array(),
                rotation: s.rotation,
                color: [v.color[0], v.color[1], v.color[2], v.opacity.clamp(0.0, 1.0)],
                uv_rect: self.textures.uv_rect(s.texture),
                scale: v.scale,
                _pad: [0.0; 3],
            }
        }));
        self.instances = instances;
    }

    pub fn instances(&self) -> &[SpriteInstance] {
        &self.instances
    }

    pub fn frame_view(&self) -> FrameView<'_> {
        FrameView {
            instances: &self.instances,
            group_rotation: self.group_rotation,
            camera: &self.camera,
        }
    }

    /// Drop formations and running tweens (page teardown).
    pub fn shutdown(&mut self) {
        self.formation.reset(&mut self.pool, &mut self.ticker);
        self.ticker.clear();
        self.state = AnimationState::default();
        self.instances.clear();
    }
}
