use crate::dom;
use crate::modal::Modal;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[inline]
pub fn is_close_key(key: &str) -> bool {
    key == "Escape" || key == "Esc"
}

pub fn wire_escape_closes_modal(document: &web::Document, modal: Rc<RefCell<Modal>>) {
    dom::listen(document.as_ref(), "keydown", move |ev: web::KeyboardEvent| {
        if !is_close_key(&ev.key()) {
            return;
        }
        let mut m = modal.borrow_mut();
        if m.is_open() {
            m.close();
        }
    });
}
