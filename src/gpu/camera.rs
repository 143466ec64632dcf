//! Orbit camera for viewing the rope.

use glam::{Mat4, Vec3};

const FOV_Y_DEGREES: f32 = 45.0;

/// Orbit camera around a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

impl Camera {
    /// Camera looking at the origin from the front.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: 12.0,
            target: Vec3::ZERO,
        }
    }

    /// Aim at the middle of `points` from far enough to see all of them.
    pub fn frame(&mut self, points: &[Vec3]) {
        let Some(&first) = points.first() else {
            return;
        };
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));

        self.target = (min + max) * 0.5;
        let radius = (max - min).length() * 0.5;
        let half_fov = (FOV_Y_DEGREES.to_radians() * 0.5).tan();
        // Extra margin for the sag below the initial line.
        self.distance = (radius / half_fov * 1.4).max(2.0);
    }

    /// Rotate by a mouse drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-1.5, 1.5);
    }

    /// Move toward or away from the target.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 0.5).clamp(0.5, 200.0);
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Unit vector from the camera toward the target.
    pub fn view_dir(&self) -> Vec3 {
        (self.target - self.position()).normalize_or_zero()
    }

    /// Combined projection and view matrix for the given aspect ratio.
    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.position(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect, 0.1, 500.0);
        proj * view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
