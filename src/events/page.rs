use crate::constants::{ANCHOR_SELECTOR, TRIGGER_REGION_ID};
use crate::dom;
use crate::frame::{FrameContext, LoopHandle};
use halo_core::TriggerEdge;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use web_sys as web;

/// Re-check the trigger region against the viewport. Anchor rects are read
/// only when the region is entered.
pub fn sample_trigger(
    ctx: &mut FrameContext,
    document: &web::Document,
    now: Duration,
) -> Option<TriggerEdge> {
    let region = document
        .get_element_by_id(TRIGGER_REGION_ID)
        .map(|el| dom::rect_of(&el));
    let edge = ctx.scene_mut().sample_trigger(
        region,
        || {
            dom::query_all(document, ANCHOR_SELECTOR)
                .iter()
                .map(dom::rect_of)
                .collect()
        },
        now,
    );
    if let Some(edge) = edge {
        log::debug!("[scroll] trigger {:?}", edge);
    }
    edge
}

pub fn wire_scroll(ctx: Rc<RefCell<FrameContext>>, document: web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(window.as_ref(), "scroll", move |_: web::Event| {
        let mut c = ctx.borrow_mut();
        let now = c.now();
        c.scene_mut().on_scroll(dom::scroll_y(), now);
        sample_trigger(&mut c, &document, now);
    });
}

pub fn wire_resize(ctx: Rc<RefCell<FrameContext>>, document: web::Document) {
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(window.as_ref(), "resize", move |_: web::Event| {
        let mut c = ctx.borrow_mut();
        c.on_resize();
        let now = c.now();
        sample_trigger(&mut c, &document, now);
    });
}

/// Stop the frame loop and free GPU resources when the page goes away.
pub fn wire_beforeunload(ctx: Rc<RefCell<FrameContext>>, handle: LoopHandle) {
    let Some(window) = web::window() else {
        return;
    };
    dom::listen(window.as_ref(), "beforeunload", move |_: web::Event| {
        handle.cancel();
        let mut c = ctx.borrow_mut();
        c.teardown();
        c.scene_mut().shutdown();
    });
}
