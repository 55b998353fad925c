use crate::dom;
use crate::render;
use halo_core::{Atlas, RenderLoop, Scene};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the per-frame callback and the page listeners share.
pub struct FrameContext {
    pub render_loop: RenderLoop<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub started_at: Instant,
}

impl FrameContext {
    pub fn new(scene: Scene, gpu: render::GpuState, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            render_loop: RenderLoop::new(scene, gpu),
            canvas,
            started_at: Instant::now(),
        }
    }

    /// Monotonic page clock handed to the scene.
    #[inline]
    pub fn now(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        self.render_loop.scene_mut()
    }

    /// One display refresh. Returns `false` once the loop was torn down.
    pub fn frame(&mut self) -> bool {
        let now = self.now();
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.render_loop.resize(w, h);
        self.render_loop.frame(now)
    }

    /// Canvas or window size changed.
    pub fn on_resize(&mut self) {
        let (w, h) = dom::sync_canvas_backing_size(&self.canvas);
        self.render_loop.resize(w, h);
        let viewport = dom::viewport();
        self.render_loop.scene_mut().resize(viewport);
    }

    pub fn teardown(&mut self) {
        self.render_loop.teardown();
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, atlas: &Atlas) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, atlas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Pending `requestAnimationFrame` id; cancelling it stops the loop.
#[derive(Clone, Default)]
pub struct LoopHandle {
    raf_id: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, handle: &LoopHandle) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.raf_id.set(Some(id)),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let handle = LoopHandle::default();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let handle_tick = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        handle_tick.raf_id.set(None);
        let running = frame_ctx.borrow_mut().frame();
        if running {
            request_frame(&tick_clone, &handle_tick);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle);
    handle
}
