use glam::Vec3;

// Shared visual/motion tuning constants. `SceneConfig::default()` is built from these.

// Particle field
pub const SPAWN_HALF_EXTENTS: Vec3 = Vec3::new(12.5, 12.5, 7.5); // initial spread around the origin
pub const WRAP_BOUNDS: Vec3 = Vec3::new(120.0, 120.0, 80.0); // teleport limits per axis
pub const VELOCITY_HALF_RANGE: Vec3 = Vec3::new(0.04, 0.03, 0.025); // per-frame drift, zero-mean
pub const SPRITE_ROTATION_STEP: f32 = 0.01; // radians per 60 Hz frame
pub const GROUP_ROTATION_STEP: f32 = 0.0002; // whole field, radians per 60 Hz frame

// Particle density
pub const PARTICLES_PER_MEGAPIXEL: u32 = 120;
pub const MIN_PARTICLES: u32 = 800;

// Visual baseline
pub const BASE_COLOR: [f32; 3] = [59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0]; // #3b82f6
pub const HIGHLIGHT_COLOR: [f32; 3] = [0.0, 242.0 / 255.0, 1.0]; // #00f2ff
pub const BASE_OPACITY: f32 = 0.8;
pub const BASE_SCALE: f32 = 0.08;
pub const HIGHLIGHT_OPACITY: f32 = 1.0;
pub const HIGHLIGHT_SCALE_FACTOR: f32 = 1.5;
pub const HIGHLIGHT_SPEED_MULTIPLIER: f32 = 0.35; // hovered halos slow down
pub const FORMATION_OPACITY_BOOST: f32 = 0.4; // added on top of BASE_OPACITY at full convergence

// Highlight pulse: scale * (1 + AMP * sin(t * RATE))
pub const PULSE_AMPLITUDE: f32 = 0.1;
pub const PULSE_RATE: f32 = 1.5;

// Formation geometry
pub const FORMATION_RADIUS: f32 = 2.2;
pub const FORMATION_PLANE_Z: f32 = 0.5;
// Pixel -> world affine map: x = u * WORLD_SPAN_X - WORLD_SPAN_X / 2, y = -v * WORLD_SPAN_Y + WORLD_SPAN_Y / 2
pub const WORLD_SPAN_X: f32 = 16.0;
pub const WORLD_SPAN_Y: f32 = 9.0;

// Tween durations (seconds)
pub const CONVERGE_SECS: f32 = 2.0;
pub const DIVERGE_SECS: f32 = 1.5;
pub const HIGHLIGHT_SECS: f32 = 0.3;
pub const SCROLL_DECAY_SECS: f32 = 0.8;
pub const SCROLL_QUIET_MS: u64 = 150;

// Scroll speed mapping
pub const SCROLL_DELTA_DIVISOR: f32 = 100.0;
pub const SCROLL_SPEED_MIN: f32 = 1.0;
pub const SCROLL_SPEED_MAX: f32 = 3.0;

// Frame pacing
pub const REFERENCE_FPS: f32 = 60.0;
pub const MAX_FRAME_SCALE: f32 = 4.0; // caps catch-up after a stalled tab

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_Z: f32 = 8.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Texture cache
pub const TEXTURE_SIZE: u32 = 64;
