/// Camera and projection utilities
use log::warn;
use nalgebra::Matrix4;

use crate::config::CameraConfig;
use crate::raster::ScreenPoint;
use crate::transform::Transform;
use crate::vector::Vector3;

/// Camera configuration for 3D rendering
///
/// The camera sits at a fixed position looking down +z. The projection
/// matrix is built once and never changes for the life of the camera.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vector3,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let projection = Transform::projection(fov, aspect, near, far);
        if Transform::is_zero(&projection) {
            warn!(
                "Degenerate projection (fov={}, aspect={}, near={}, far={}); \
                 nothing will be visible",
                fov, aspect, near, far
            );
        }

        Self {
            position: Vector3::zeros(),
            fov,
            aspect,
            near,
            far,
            projection,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(config.fov_degrees, aspect, config.near, config.far)
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }

    /// Whether a camera-space triangle with this normal and first vertex
    /// faces away from (or edge-on to) the camera.
    pub fn is_backface(&self, normal: &Vector3, first_vertex: &Vector3) -> bool {
        normal.dot(&(first_vertex - self.position)) >= 0.0
    }

    /// Project a camera-space point to screen space.
    ///
    /// No clipping is done; points outside the frustum land outside
    /// `[0, width) x [0, height)` and are left for the rasterizer to clamp.
    pub fn project_to_screen(&self, point: &Vector3, width: usize, height: usize) -> ScreenPoint {
        let ndc = Transform::transform_vector(point, &self.projection);

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (ndc.y + 1.0) * 0.5 * height as f32;

        (screen_x, screen_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RendererConfig;

    fn camera() -> Camera {
        let geometry = RendererConfig::default().display_geometry().unwrap();
        Camera::from_config(&CameraConfig::default(), geometry.aspect_ratio())
    }

    #[test]
    fn test_camera_creation() {
        let camera = camera();
        assert!((camera.aspect() - 200.0 / 120.0).abs() < 1e-6);
        assert_eq!(camera.position(), Vector3::zeros());
        assert!(!Transform::is_zero(camera.projection_matrix()));
    }

    #[test]
    fn test_parameters_match_cached_projection() {
        let camera = Camera::new(75.0, 1.25, 0.5, 50.0);
        assert_eq!((camera.fov(), camera.near(), camera.far()), (75.0, 0.5, 50.0));

        let rebuilt =
            Transform::projection(camera.fov(), camera.aspect(), camera.near(), camera.far());
        assert_eq!(camera.projection_matrix(), &rebuilt);
    }

    #[test]
    fn test_invalid_camera_has_zero_projection() {
        let camera = Camera::new(60.0, 0.0, 0.1, 100.0);
        assert!(Transform::is_zero(camera.projection_matrix()));
    }

    #[test]
    fn test_center_projects_to_screen_center() {
        let camera = camera();
        let (x, y) = camera.project_to_screen(&Vector3::new(0.0, 0.0, 3.0), 200, 120);
        assert!((x - 100.0).abs() < 1e-4);
        assert!((y - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_farther_points_move_toward_center() {
        let camera = camera();
        let (near_x, _) = camera.project_to_screen(&Vector3::new(0.5, 0.0, 2.0), 200, 120);
        let (far_x, _) = camera.project_to_screen(&Vector3::new(0.5, 0.0, 4.0), 200, 120);
        assert!(near_x > far_x);
        assert!(far_x > 100.0);
    }

    #[test]
    fn test_backface() {
        let camera = camera();
        let vertex = Vector3::new(0.0, 0.0, 2.5);
        assert!(!camera.is_backface(&Vector3::new(0.0, 0.0, -1.0), &vertex));
        assert!(camera.is_backface(&Vector3::new(0.0, 0.0, 1.0), &vertex));
        // Edge-on counts as facing away
        assert!(camera.is_backface(&Vector3::new(1.0, 0.0, 0.0), &vertex));
    }
}
