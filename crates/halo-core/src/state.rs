//! Page-lifetime animation state and the camera the field is viewed through.
//!
//! Neither type references platform APIs; the web front end reads them to
//! build its uniforms.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Phase of the halo formation state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormationPhase {
    #[default]
    Ambient,
    Converging,
    Held,
    Diverging,
}

impl FormationPhase {
    /// Pointer highlighting is only honored while halos are forming or formed.
    pub fn accepts_highlight(&self) -> bool {
        matches!(self, FormationPhase::Converging | FormationPhase::Held)
    }
}

/// Everything that used to be loose page-level flags.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    /// Always within [1, 3].
    pub scroll_speed_multiplier: f32,
    pub phase: FormationPhase,
    pub active_highlight: Option<usize>,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            scroll_speed_multiplier: SCROLL_SPEED_MIN,
            phase: FormationPhase::Ambient,
            active_highlight: None,
        }
    }
}

impl AnimationState {
    pub fn is_in_formation_mode(&self) -> bool {
        self.phase != FormationPhase::Ambient
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn for_aspect(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: if aspect.is_finite() && aspect > 0.0 {
                aspect
            } else {
                1.0
            },
            fovy_radians: CAMERA_FOV_Y_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
