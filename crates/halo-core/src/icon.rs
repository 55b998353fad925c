use glam::{Mat4, Vec2, Vec3, Vec4};
use smallvec::SmallVec;

const VERTICES: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

// Every vertex joins the four that are not its opposite.
const EDGES: [(usize, usize); 12] = [
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 4),
    (2, 5),
    (3, 4),
    (3, 5),
];

const SPIN_PER_TICK: Vec3 = Vec3::new(0.015, 0.025, 0.01);
const ICON_CAMERA_Z: f32 = 3.0;
const ICON_FOV_Y_DEG: f32 = 75.0;

/// Screen-space line segments and vertex points for one icon frame.
#[derive(Clone, Debug, Default)]
pub struct IconFrame {
    pub edges: SmallVec<[(Vec2, Vec2); 12]>,
    pub points: SmallVec<[Vec2; 6]>,
}

/// Spinning wireframe octahedron shown in the event modal header.
#[derive(Clone, Debug, Default)]
pub struct WireIcon {
    rotation: Vec3,
}

impl WireIcon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Advance one ~16 ms tick.
    pub fn step(&mut self) {
        self.rotation += SPIN_PER_TICK;
    }

    /// Project into a `width` x `height` pixel box (origin top-left).
    pub fn project(&self, width: f32, height: f32) -> IconFrame {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        let proj = Mat4::perspective_rh(ICON_FOV_Y_DEG.to_radians(), aspect, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, ICON_CAMERA_Z), Vec3::ZERO, Vec3::Y);
        let model = Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z);
        let mvp = proj * view * model;
        let to_screen = |v: Vec3| {
            let clip: Vec4 = mvp * v.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            Vec2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height)
        };
        let points: SmallVec<[Vec2; 6]> = VERTICES.iter().map(|v| to_screen(*v)).collect();
        let edges = EDGES
            .iter()
            .map(|&(a, b)| (points[a], points[b]))
            .collect();
        IconFrame { edges, points }
    }
}
