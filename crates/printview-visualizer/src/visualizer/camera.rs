use glam::{Mat4, Vec3};
use printview_core::constants::{DEFAULT_FIT_FACTOR, DEFAULT_FOV_DEG};
use printview_core::Aabb;
use serde::{Deserialize, Serialize};

/// Default orbit yaw (degrees)
pub const DEFAULT_VIEW_YAW_DEG: f32 = -45.0;
/// Default orbit pitch (degrees)
pub const DEFAULT_VIEW_PITCH_DEG: f32 = 45.0;

/// Camera framing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_deg: f32, // vertical
    pub aspect_ratio: f32,
    pub fit_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_deg: DEFAULT_FOV_DEG,
            aspect_ratio: 16.0 / 9.0,
            fit_factor: DEFAULT_FIT_FACTOR,
        }
    }
}

/// Result of framing a bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFit {
    /// Point the camera looks at
    pub target: Vec3,
    /// Unit vector from target towards the eye
    pub direction: Vec3,
    pub distance: f32,
    pub radius: f32,
}

impl CameraFit {
    pub fn eye(&self) -> Vec3 {
        self.target + self.direction * self.distance
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Z)
    }
}

/// Fixed default viewing direction (Z-up, from the front-right, above)
pub fn view_direction() -> Vec3 {
    let yaw = DEFAULT_VIEW_YAW_DEG.to_radians();
    let pitch = DEFAULT_VIEW_PITCH_DEG.to_radians();
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();

    Vec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch).normalize()
}

/// Frame `bbox` so it fits both the vertical and horizontal field of view
pub fn fit_camera(bbox: &Aabb, fov_deg: f32, aspect_ratio: f32, fit_factor: f32) -> CameraFit {
    let aspect = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    };

    let radius = 0.5 * bbox.max_extent() as f32 * fit_factor;

    let half_fov_v = fov_deg.to_radians() * 0.5;
    let half_fov_h = (half_fov_v.tan() * aspect).atan();
    let distance = (radius / half_fov_v.sin()).max(radius / half_fov_h.sin());

    let center = bbox.center();
    CameraFit {
        target: Vec3::new(center.x as f32, center.y as f32, bbox.min_z as f32),
        direction: view_direction(),
        distance,
        radius,
    }
}

/// [`fit_camera`] with parameters from `settings`
pub fn fit_camera_with(bbox: &Aabb, settings: &CameraSettings) -> CameraFit {
    fit_camera(
        bbox,
        settings.fov_deg,
        settings.aspect_ratio,
        settings.fit_factor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(size: f64) -> Aabb {
        Aabb {
            min_x: 0.0,
            min_y: 0.0,
            min_z: 0.0,
            max_x: size,
            max_y: size,
            max_z: size,
        }
    }

    #[test]
    fn test_view_direction_is_unit() {
        let dir = view_direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.z > 0.0);
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_vertical_fov_limits_wide_viewport() {
        let fit = fit_camera(&cube(20.0), 60.0, 2.0, 1.0);
        assert!((fit.radius - 10.0).abs() < 1e-5);
        // sin(30deg) = 0.5
        assert!((fit.distance - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_horizontal_fov_limits_narrow_viewport() {
        let wide = fit_camera(&cube(20.0), 60.0, 1.0, 1.0);
        let narrow = fit_camera(&cube(20.0), 60.0, 0.5, 1.0);
        assert!(narrow.distance > wide.distance);
    }

    #[test]
    fn test_target_is_center_base() {
        let bbox = Aabb {
            min_x: 10.0,
            min_y: 20.0,
            min_z: 0.2,
            max_x: 30.0,
            max_y: 60.0,
            max_z: 15.0,
        };
        let fit = fit_camera(&bbox, 45.0, 1.5, 1.2);
        assert_eq!(fit.target, Vec3::new(20.0, 40.0, 0.2));
        assert!((fit.radius - 24.0).abs() < 1e-4);
        assert!(((fit.eye() - fit.target).length() - fit.distance).abs() < 1e-3);
    }

    #[test]
    fn test_view_matrix_looks_at_target() {
        let fit = fit_camera(&cube(20.0), 60.0, 1.0, 1.0);
        let view = fit.view_matrix();

        let target = view.transform_point3(fit.target);
        assert!(target.x.abs() < 1e-3 && target.y.abs() < 1e-3);
        assert!((target.z + fit.distance).abs() < 1e-3);

        let eye = view.transform_point3(fit.eye());
        assert!(eye.length() < 1e-3);
    }

    #[test]
    fn test_invalid_aspect_falls_back_to_square() {
        let square = fit_camera(&cube(10.0), 45.0, 1.0, 1.0);
        let invalid = fit_camera(&cube(10.0), 45.0, 0.0, 1.0);
        assert_eq!(square.distance, invalid.distance);
    }
}
