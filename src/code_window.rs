use crate::constants::*;
use crate::dom;
use halo_core::effects::should_reveal;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub fn wire(document: &web::Document) {
    let Some(window_el) = dom::query(document, CODE_WINDOW_SELECTOR) else {
        return;
    };
    wire_fade_in(&window_el);
    wire_copy_button(document, window_el);
}

fn reveal_lines(code_window: &web::Element) {
    let Ok(lines) = code_window.query_selector_all(FADE_IN_LINE_SELECTOR) else {
        return;
    };
    for line in (0..lines.length()).filter_map(|i| lines.item(i)) {
        if let Ok(el) = line.dyn_into::<web::Element>() {
            dom::set_style(&el, "opacity", "1");
        }
    }
}

/// One-shot reveal, checked now and on every scroll until it fires.
fn wire_fade_in(code_window: &web::Element) {
    let revealed = Rc::new(Cell::new(false));
    let check = {
        let code_window = code_window.clone();
        let revealed = revealed.clone();
        move || {
            if revealed.get() || !should_reveal(&dom::rect_of(&code_window), &dom::viewport()) {
                return;
            }
            revealed.set(true);
            reveal_lines(&code_window);
            log::debug!("[code] lines revealed");
        }
    };
    check();
    if let Some(window) = web::window() {
        dom::listen(window.as_ref(), "scroll", move |_: web::Event| check());
    }
}

fn wire_copy_button(document: &web::Document, code_window: web::Element) {
    let Some(button) = dom::query(document, COPY_BUTTON_SELECTOR) else {
        return;
    };
    let doc = document.clone();
    let button_click = button.clone();
    dom::listen(button.as_ref(), "click", move |_: web::MouseEvent| {
        let text = code_window
            .dyn_ref::<web::HtmlElement>()
            .map(|el| el.inner_text())
            .unwrap_or_default();
        let doc = doc.clone();
        let button = button_click.clone();
        spawn_local(async move {
            let Some(window) = web::window() else {
                return;
            };
            let promise: js_sys::Promise = window.navigator().clipboard().write_text(&text);
            match JsFuture::from(promise).await {
                Ok(_) => show_copied(&doc, &button),
                Err(e) => log::warn!("[code] clipboard write failed: {:?}", e),
            }
        });
    });
}

fn show_copied(document: &web::Document, button: &web::Element) {
    let Ok(tooltip) = document.create_element("div") else {
        return;
    };
    tooltip.set_text_content(Some(COPY_TOOLTIP_TEXT));
    tooltip.set_class_name(COPY_TOOLTIP_CLASS);
    _ = button.append_child(&tooltip);

    let classes = button.class_list();
    _ = classes.add_1(COPY_SUCCESS_CLASS);
    _ = classes.remove_1(COPY_IDLE_CLASSES[1]);

    let Some(window) = web::window() else {
        return;
    };
    let restore = Closure::once_into_js(move || {
        tooltip.remove();
        _ = classes.remove_1(COPY_SUCCESS_CLASS);
        _ = classes.add_2(COPY_IDLE_CLASSES[0], COPY_IDLE_CLASSES[1]);
    });
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        restore.unchecked_ref(),
        COPY_FEEDBACK_MS,
    );
}
