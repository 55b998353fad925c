#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, CANVAS_OPTION_KEYS, CANVAS_OPTION_PREFIX};
use halo_core::{Scene, SceneConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod code_window;
mod constants;
mod dom;
mod events;
mod frame;
mod modal;
mod render;

/// Scene options from the canvas `data-*` attributes.
fn read_canvas_options(canvas: &web::HtmlCanvasElement) -> SceneConfig {
    let pairs: Vec<(&str, String)> = CANVAS_OPTION_KEYS
        .iter()
        .filter_map(|key| {
            canvas
                .get_attribute(&format!("{CANVAS_OPTION_PREFIX}{key}"))
                .map(|value| (*key, value))
        })
        .collect();
    let mut config = SceneConfig::default();
    config.apply_options(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    config
}

/// Page widgets that work with or without the particle renderer.
fn wire_page_widgets(document: &web::Document) {
    if let Some(m) = modal::Modal::find(document) {
        let m = Rc::new(RefCell::new(m));
        modal::wire(document, m.clone());
        events::wire_escape_closes_modal(document, m);
    }
    events::wire_tilt_cards(document);
    events::wire_mouse_glow(document);
    code_window::wire(document);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("halo-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    wire_page_widgets(&document);

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);

    let config = read_canvas_options(&canvas);
    let mut rng = StdRng::from_entropy();
    let scene = Scene::new(config, dom::viewport(), dom::scroll_y(), &mut rng);

    let Some(gpu) = frame::init_gpu(&canvas, scene.textures().atlas()).await else {
        // no WebGPU: the page keeps its widgets, just no particles
        return Ok(());
    };

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(scene, gpu, canvas)));
    {
        let mut c = frame_ctx.borrow_mut();
        let now = c.now();
        events::sample_trigger(&mut c, &document, now);
    }
    events::wire_scroll(frame_ctx.clone(), document.clone());
    events::wire_resize(frame_ctx.clone(), document.clone());
    events::wire_anchor_hover(frame_ctx.clone(), &document);

    let handle = frame::start_loop(frame_ctx.clone());
    events::wire_beforeunload(frame_ctx, handle);
    Ok(())
}
