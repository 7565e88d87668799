//! Orbit camera for preview and viewport rendering

use glam::{Mat4, Vec3};

/// A camera orbiting a target point at a fixed distance
#[derive(Clone, Copy, Debug)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub target: Vec3,
    /// Distance from the target
    pub distance: f32,
    /// Rotation around the Y axis, radians
    pub yaw: f32,
    /// Elevation above the XZ plane, radians
    pub pitch: f32,
    /// Vertical field of view, radians
    pub fov_y: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 3.0,
            yaw: 0.0,
            pitch: 0.0,
            fov_y: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

impl OrbitCamera {
    /// Camera position in world space
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    /// World-to-view matrix
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// View-to-clip matrix (0..1 depth range)
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }

    /// Combined world-to-clip matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_distance() {
        let cam = OrbitCamera {
            distance: 5.0,
            yaw: 1.2,
            pitch: 0.4,
            ..Default::default()
        };
        assert!((cam.eye().length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_target_projects_to_center() {
        let cam = OrbitCamera::default();
        let clip = cam.view_projection(1.0) * cam.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }
}
