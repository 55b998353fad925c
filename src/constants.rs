// Page contract and front-end timing constants.
//
// Element ids and selectors the page is expected to provide. Every lookup
// tolerates a missing element; the matching feature is skipped.

// Particle canvas and its option attributes
pub const CANVAS_ID: &str = "three-canvas";
pub const CANVAS_OPTION_PREFIX: &str = "data-";
pub const CANVAS_OPTION_KEYS: [&str; 7] = [
    "particle-density",
    "formation-radius",
    "highlight-color",
    "base-color",
    "drift-policy",
    "glyph-mix",
    "trigger",
];

// Halo trigger region and anchors
pub const TRIGGER_REGION_ID: &str = "committee";
pub const ANCHOR_SELECTOR: &str = "#committee .group";

// Tilt cards
pub const TILT_CARD_SELECTOR: &str = ".tilt-card";

// Pointer glow follower
pub const MOUSE_GLOW_ID: &str = "mouseGlow";

// Event modal
pub const MODAL_ID: &str = "eventModal";
pub const MODAL_TITLE_ID: &str = "modalTitle";
pub const MODAL_RULES_ID: &str = "modalRules";
pub const MODAL_FORM_LINK_ID: &str = "googleFormLink";
pub const MODAL_ICON_ID: &str = "modal3DIcon";
pub const MODAL_CLOSE_IDS: [&str; 2] = ["closeModal", "closeModalBtn"];
pub const DETAILS_BUTTON_SELECTOR: &str = ".view-details-btn";
pub const EVENT_CARD_SELECTOR: &str = "[data-event-id]";
pub const REWARD_VALUE_SELECTOR: &str = "[data-reward-value]";
pub const DIFFICULTY_VALUE_SELECTOR: &str = "[data-difficulty-value]";
pub const TEAM_VALUE_SELECTOR: &str = "[data-team-value]";
pub const HIDDEN_CLASS: &str = "hidden";

// Fallbacks for optional event card fields
pub const DEFAULT_REWARD: &str = "Prizes & Certs";
pub const DEFAULT_DIFFICULTY: &str = "Level 03";
pub const DEFAULT_TEAM_SIZE: &str = "2-4 Members";

// Code window
pub const CODE_WINDOW_SELECTOR: &str = ".code-window";
pub const FADE_IN_LINE_SELECTOR: &str = ".fade-in-line";
pub const COPY_BUTTON_SELECTOR: &str = ".copy-btn";
pub const COPY_TOOLTIP_TEXT: &str = "Copied!";
pub const COPY_TOOLTIP_CLASS: &str = "copy-tooltip absolute -bottom-10 right-0 bg-green-500 text-white text-xs px-3 py-1 rounded whitespace-nowrap";
pub const COPY_SUCCESS_CLASS: &str = "text-green-400";
pub const COPY_IDLE_CLASSES: [&str; 2] = ["text-gray-400", "hover:text-blue-400"];
pub const COPY_FEEDBACK_MS: i32 = 2000;

// Modal timings
pub const SCRAMBLE_DELAY_MS: i32 = 100;
pub const SCRAMBLE_DURATION_MS: u64 = 1000;
pub const ICON_TICK_MS: i32 = 16;
pub const ICON_FALLBACK_PX: u32 = 64;
pub const ICON_EDGE_COLOR: &str = "#60a5fa";
pub const ICON_POINT_COLOR: &str = "#3b82f6";
pub const ICON_LINE_WIDTH: f64 = 2.0;
pub const ICON_POINT_RADIUS_PX: f64 = 2.5;

// Renderer
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0]; // transparent over the page
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
