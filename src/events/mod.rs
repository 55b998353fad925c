pub mod keyboard;
pub mod page;
pub mod pointer;

pub use keyboard::wire_escape_closes_modal;
pub use page::{sample_trigger, wire_beforeunload, wire_resize, wire_scroll};
pub use pointer::{wire_anchor_hover, wire_mouse_glow, wire_tilt_cards};
