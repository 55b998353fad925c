//! Event details modal: populate from the clicked card, show/hide, decode the
//! rules text and spin the wireframe icon in the header.

use crate::constants::*;
use crate::dom;
use halo_core::effects::Scramble;
use halo_core::icon::WireIcon;
use instant::Instant;
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Fields read from a `[data-event-id]` card.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventDetails {
    pub title: String,
    pub rules: String,
    pub form_link: String,
    pub reward: String,
    pub difficulty: String,
    pub team_size: String,
}

impl EventDetails {
    pub fn from_card(card: &web::HtmlElement) -> Self {
        let data = card.dataset();
        let field = |key: &str, fallback: &str| data.get(key).unwrap_or_else(|| fallback.to_string());
        Self {
            title: field("eventTitle", ""),
            rules: field("eventRules", ""),
            form_link: field("eventForm", ""),
            reward: field("eventReward", DEFAULT_REWARD),
            difficulty: field("eventDifficulty", DEFAULT_DIFFICULTY),
            team_size: field("eventTeam", DEFAULT_TEAM_SIZE),
        }
    }
}

/// Interval-driven icon animation; dropping it stops the interval.
struct IconAnimation {
    interval_id: i32,
    _tick: Closure<dyn FnMut()>,
}

impl Drop for IconAnimation {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_interval_with_handle(self.interval_id);
        }
    }
}

pub struct Modal {
    document: web::Document,
    root: web::Element,
    icon: Option<IconAnimation>,
}

impl Modal {
    pub fn find(document: &web::Document) -> Option<Self> {
        let root = document.get_element_by_id(MODAL_ID)?;
        Some(Self {
            document: document.clone(),
            root,
            icon: None,
        })
    }

    pub fn root(&self) -> &web::Element {
        &self.root
    }

    pub fn is_open(&self) -> bool {
        !self.root.class_list().contains(HIDDEN_CLASS)
    }

    pub fn open(&mut self, details: &EventDetails) {
        self.icon = None;
        let set_text = |id: &str, text: &str| {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        };
        set_text(MODAL_TITLE_ID, &details.title);
        set_text(MODAL_RULES_ID, &details.rules);
        if let Some(link) = self
            .document
            .get_element_by_id(MODAL_FORM_LINK_ID)
            .and_then(|el| el.dyn_into::<web::HtmlAnchorElement>().ok())
        {
            link.set_href(&details.form_link);
        }
        for (selector, value) in [
            (REWARD_VALUE_SELECTOR, &details.reward),
            (DIFFICULTY_VALUE_SELECTOR, &details.difficulty),
            (TEAM_VALUE_SELECTOR, &details.team_size),
        ] {
            if let Some(el) = dom::query(&self.document, selector) {
                el.set_text_content(Some(value.as_str()));
            }
        }

        self.icon = self
            .document
            .get_element_by_id(MODAL_ICON_ID)
            .and_then(|container| match start_icon(&self.document, &container) {
                Ok(anim) => Some(anim),
                Err(e) => {
                    log::info!("[modal] 3D icon skipped: {:?}", e);
                    None
                }
            });

        _ = self.root.class_list().remove_1(HIDDEN_CLASS);
        self.set_body_overflow("hidden");

        if let Some(rules) = self.document.get_element_by_id(MODAL_RULES_ID) {
            schedule_scramble(rules, details.rules.clone());
        }
        log::debug!("[modal] opened {:?}", details.title);
    }

    pub fn close(&mut self) {
        _ = self.root.class_list().add_1(HIDDEN_CLASS);
        self.set_body_overflow("auto");
        self.icon = None;
    }

    fn set_body_overflow(&self, value: &str) {
        if let Some(body) = self.document.body() {
            _ = body.style().set_property("overflow", value);
        }
    }
}

/// Details buttons open the modal; close buttons and backdrop clicks close it.
pub fn wire(document: &web::Document, modal: Rc<RefCell<Modal>>) {
    for btn in dom::query_all(document, DETAILS_BUTTON_SELECTOR) {
        let modal_open = modal.clone();
        let btn_inner = btn.clone();
        dom::listen(btn.as_ref(), "click", move |ev: web::MouseEvent| {
            ev.prevent_default();
            let card = btn_inner
                .closest(EVENT_CARD_SELECTOR)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
            if let Some(card) = card {
                modal_open.borrow_mut().open(&EventDetails::from_card(&card));
            }
        });
    }

    for id in MODAL_CLOSE_IDS {
        let modal_close = modal.clone();
        dom::add_click_listener(document, id, move || modal_close.borrow_mut().close());
    }

    let root = modal.borrow().root().clone();
    let target = root.clone();
    let modal_backdrop = modal.clone();
    dom::listen(target.as_ref(), "click", move |ev: web::MouseEvent| {
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .map(|el| el == root)
            .unwrap_or(false);
        if on_backdrop {
            modal_backdrop.borrow_mut().close();
        }
    });
}

fn start_icon(
    document: &web::Document,
    container: &web::Element,
) -> Result<IconAnimation, wasm_bindgen::JsValue> {
    let window = web::window().ok_or_else(|| wasm_bindgen::JsValue::from_str("no window"))?;
    let size = |px: i32| if px > 0 { px as u32 } else { ICON_FALLBACK_PX };
    let (width, height) = (size(container.client_width()), size(container.client_height()));

    let canvas: web::HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    container.set_inner_html("");
    container.append_child(&canvas)?;
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let mut icon = WireIcon::new();
    let container_tick = container.clone();
    let interval_slot: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
    let interval_tick = interval_slot.clone();
    let tick = Closure::wrap(Box::new(move || {
        if container_tick.parent_element().is_none() {
            if let (Some(id), Some(w)) = (interval_tick.borrow_mut().take(), web::window()) {
                w.clear_interval_with_handle(id);
            }
            return;
        }
        icon.step();
        draw_icon(&ctx, &icon, width as f32, height as f32);
    }) as Box<dyn FnMut()>);

    let interval_id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        ICON_TICK_MS,
    )?;
    *interval_slot.borrow_mut() = Some(interval_id);
    Ok(IconAnimation {
        interval_id,
        _tick: tick,
    })
}

fn draw_icon(ctx: &web::CanvasRenderingContext2d, icon: &WireIcon, width: f32, height: f32) {
    let frame = icon.project(width, height);
    ctx.clear_rect(0.0, 0.0, width as f64, height as f64);

    ctx.set_stroke_style_str(ICON_EDGE_COLOR);
    ctx.set_line_width(ICON_LINE_WIDTH);
    ctx.begin_path();
    for (a, b) in &frame.edges {
        ctx.move_to(a.x as f64, a.y as f64);
        ctx.line_to(b.x as f64, b.y as f64);
    }
    ctx.stroke();

    ctx.set_fill_style_str(ICON_POINT_COLOR);
    for p in &frame.points {
        ctx.begin_path();
        _ = ctx.arc(p.x as f64, p.y as f64, ICON_POINT_RADIUS_PX, 0.0, TAU);
        ctx.fill();
    }
}

/// Decode `text` into `el` after a short delay, one step per display frame.
fn schedule_scramble(el: web::Element, text: String) {
    let Some(window) = web::window() else {
        return;
    };
    let start = Closure::once_into_js(move || run_scramble(el, text));
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        start.unchecked_ref(),
        SCRAMBLE_DELAY_MS,
    ) {
        log::warn!("[modal] scramble not scheduled: {:?}", e);
    }
}

fn run_scramble(el: web::Element, text: String) {
    let origin = Instant::now();
    let scramble = Scramble::new(
        text,
        Duration::ZERO,
        Duration::from_millis(SCRAMBLE_DURATION_MS),
    );
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let slot_tick = slot.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let (shown, done) = scramble.frame(origin.elapsed(), &mut rand::thread_rng());
        el.set_text_content(Some(&shown));
        if done {
            // release the callback once the current call has returned
            let slot_done = slot_tick.clone();
            wasm_bindgen_futures::spawn_local(async move {
                slot_done.borrow_mut().take();
            });
            return;
        }
        request_frame(&slot_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&slot);
}

fn request_frame(slot: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), slot.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
