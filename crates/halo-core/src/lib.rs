pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod formation;
pub mod geometry;
pub mod icon;
pub mod render;
pub mod scene;
pub mod scroll;
pub mod sprite;
pub mod state;
pub mod texture;
pub mod tween;
pub static SPRITES_WGSL: &str = include_str!("../shaders/sprites.wgsl");

pub use config::*;
pub use error::*;
pub use formation::*;
pub use geometry::*;
pub use render::*;
pub use scene::*;
pub use scroll::*;
pub use sprite::*;
pub use state::*;
pub use texture::*;
pub use tween::*;
