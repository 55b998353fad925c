//! The drawing seam and the per-frame loop driver.

use crate::scene::Scene;
use crate::state::Camera;
use std::time::Duration;

/// One sprite as the GPU sees it. Layout matches the instance buffer in
/// `shaders/sprites.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub rotation: f32,
    pub color: [f32; 4],
    pub uv_rect: [f32; 4],
    pub scale: f32,
    pub _pad: [f32; 3],
}

/// Everything a surface needs to draw one frame.
pub struct FrameView<'a> {
    pub instances: &'a [SpriteInstance],
    /// Rotation of the whole field about the view axis, radians.
    pub group_rotation: f32,
    pub camera: &'a Camera,
}

/// Output surface the loop draws to.
pub trait RenderSurface {
    type Error: std::fmt::Debug;

    /// Backing size changed (pixels).
    fn resize(&mut self, width: u32, height: u32);

    fn draw(&mut self, frame: &FrameView<'_>) -> Result<(), Self::Error>;

    /// Free GPU/canvas resources; no draws follow.
    fn release(&mut self) {}
}

/// Owns the scene and its surface; the page calls [`RenderLoop::frame`] once
/// per display refresh until [`RenderLoop::teardown`].
pub struct RenderLoop<S: RenderSurface> {
    scene: Scene,
    surface: S,
    running: bool,
    frames: u64,
}

impl<S: RenderSurface> RenderLoop<S> {
    pub fn new(scene: Scene, surface: S) -> Self {
        Self {
            scene,
            surface,
            running: true,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Tick the scene and draw it. Returns `false` once torn down so the
    /// caller stops rescheduling.
    pub fn frame(&mut self, now: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.scene.tick(now);
        let view = self.scene.frame_view();
        if let Err(e) = self.surface.draw(&view) {
            log::error!("[render] draw error: {:?}", e);
        }
        self.frames += 1;
        true
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.running {
            self.surface.resize(width, height);
        }
    }

    /// Stop the loop and release the surface. Idempotent.
    pub fn teardown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.surface.release();
        log::info!("[render] loop stopped after {} frames", self.frames);
    }
}
