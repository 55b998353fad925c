use crate::constants::{ANCHOR_SELECTOR, MOUSE_GLOW_ID, TILT_CARD_SELECTOR};
use crate::dom;
use crate::frame::FrameContext;
use glam::Vec2;
use halo_core::effects::Tilt;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Pointer enter/leave on each anchor drives that anchor's halo highlight.
pub fn wire_anchor_hover(ctx: Rc<RefCell<FrameContext>>, document: &web::Document) {
    let anchors = dom::query_all(document, ANCHOR_SELECTOR);
    log::info!("[pointer] {} halo anchors", anchors.len());
    for (index, anchor) in anchors.iter().enumerate() {
        let enter_ctx = ctx.clone();
        dom::listen(anchor.as_ref(), "mouseenter", move |_: web::MouseEvent| {
            let mut c = enter_ctx.borrow_mut();
            let now = c.now();
            c.scene_mut().highlight_anchor(index, now);
        });
        let leave_ctx = ctx.clone();
        dom::listen(anchor.as_ref(), "mouseleave", move |_: web::MouseEvent| {
            let mut c = leave_ctx.borrow_mut();
            let now = c.now();
            c.scene_mut().unhighlight_anchor(index, now);
        });
    }
}

pub fn wire_tilt_cards(document: &web::Document) {
    for card in dom::query_all(document, TILT_CARD_SELECTOR) {
        let card_move = card.clone();
        dom::listen(card.as_ref(), "mousemove", move |ev: web::MouseEvent| {
            let rect = dom::rect_of(&card_move);
            let pointer = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            dom::set_style(&card_move, "transform", &Tilt::follow(&rect, pointer).css());
        });
        let card_leave = card.clone();
        dom::listen(card.as_ref(), "mouseleave", move |_: web::MouseEvent| {
            dom::set_style(&card_leave, "transform", &Tilt::REST.css());
        });
    }
}

/// Soft glow element that follows the pointer across the page.
pub fn wire_mouse_glow(document: &web::Document) {
    let Some(glow) = document.get_element_by_id(MOUSE_GLOW_ID) else {
        return;
    };
    let glow_move = glow.clone();
    dom::listen(document.as_ref(), "mousemove", move |ev: web::MouseEvent| {
        dom::set_style(&glow_move, "left", &format!("{}px", ev.client_x()));
        dom::set_style(&glow_move, "top", &format!("{}px", ev.client_y()));
    });
    let glow_leave = glow.clone();
    dom::listen(document.as_ref(), "mouseleave", move |_: web::MouseEvent| {
        dom::set_style(&glow_leave, "opacity", "0");
    });
    dom::listen(document.as_ref(), "mouseenter", move |_: web::MouseEvent| {
        dom::set_style(&glow, "opacity", "1");
    });
}
