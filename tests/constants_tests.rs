// Host-side tests for the page contract constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use halo_core::SceneConfig;

#[test]
fn every_canvas_option_is_understood_by_the_scene() {
    let samples = [
        ("particle-density", "auto"),
        ("formation-radius", "2"),
        ("highlight-color", "#ffffff"),
        ("base-color", "#ffffff"),
        ("drift-policy", "freeze"),
        ("glyph-mix", "0.5"),
        ("trigger", "center"),
    ];
    assert_eq!(samples.len(), CANVAS_OPTION_KEYS.len());
    let mut config = SceneConfig::default();
    for key in CANVAS_OPTION_KEYS {
        let value = samples
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or_else(|| panic!("no sample value for {key}"));
        assert_eq!(config.apply_option(key, value), Ok(()), "{key}");
    }
}

#[test]
fn option_attributes_are_data_attributes() {
    for key in CANVAS_OPTION_KEYS {
        let attr = format!("{CANVAS_OPTION_PREFIX}{key}");
        assert!(attr.starts_with("data-"));
        assert!(!attr.contains(' '));
    }
}

#[test]
fn anchors_live_inside_the_trigger_region() {
    assert!(ANCHOR_SELECTOR.starts_with(&format!("#{TRIGGER_REGION_ID} ")));
}

#[test]
fn modal_close_ids_are_distinct() {
    assert_ne!(MODAL_CLOSE_IDS[0], MODAL_CLOSE_IDS[1]);
    assert!(!MODAL_CLOSE_IDS.contains(&MODAL_ID));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive_and_ordered() {
    assert!(SCRAMBLE_DELAY_MS > 0);
    assert!(SCRAMBLE_DURATION_MS > SCRAMBLE_DELAY_MS as u64);
    assert!(ICON_TICK_MS > 0 && ICON_TICK_MS < 100);
    assert!(COPY_FEEDBACK_MS >= 1000);
    assert!(MAX_DEVICE_PIXEL_RATIO >= 1.0);
    assert!(ICON_FALLBACK_PX > 0);
}

#[test]
fn copy_feedback_restores_the_idle_classes() {
    assert!(!COPY_IDLE_CLASSES.contains(&COPY_SUCCESS_CLASS));
    assert!(COPY_TOOLTIP_CLASS.split_whitespace().next() == Some("copy-tooltip"));
}
