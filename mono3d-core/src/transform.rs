/// 4x4 transformation matrices and rotation input tracking
///
/// Matrices follow the row-vector convention: a point is transformed as
/// `(x, y, z, 1) · M`, so translation lives in row 3 and the projection's
/// `w` comes from column 3.
use nalgebra::{Matrix4, Vector4};

use crate::vector::Vector3;

/// Below this magnitude the homogeneous `w` is left undivided.
pub const W_EPSILON: f32 = 1e-4;

/// Tracks the last rotation input seen by the pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationState {
    last_angle: Option<f32>,
}

impl RotationState {
    pub fn new() -> Self {
        Self { last_angle: None }
    }

    /// Record `angle` and report whether it differs from the previous input.
    ///
    /// The first observation always counts as a change.
    pub fn observe(&mut self, angle: f32) -> bool {
        if self.last_angle == Some(angle) {
            return false;
        }
        self.last_angle = Some(angle);
        true
    }

    pub fn last_angle(&self) -> Option<f32> {
        self.last_angle
    }

    /// Forget the last input so the next frame redraws unconditionally.
    pub fn reset(&mut self) {
        self.last_angle = None;
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f32> {
        Matrix4::identity()
    }

    /// Right-handed perspective projection.
    ///
    /// Returns the all-zero matrix when `aspect` is zero, `fov_degrees` is
    /// outside `(0, 180)`, or `far <= near`. Use [`Transform::is_zero`] to
    /// detect that case.
    pub fn projection(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Matrix4<f32> {
        if aspect == 0.0 {
            return Matrix4::zeros();
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Matrix4::zeros();
        }
        if !(far - near > 0.0) {
            return Matrix4::zeros();
        }

        let tan_half_fov = (fov_degrees.to_radians() / 2.0).tan();
        let z_range = far - near;

        let mut m = Matrix4::zeros();
        m[(0, 0)] = 1.0 / (tan_half_fov * aspect);
        m[(1, 1)] = 1.0 / tan_half_fov;
        m[(2, 2)] = (-near - far) / z_range;
        m[(3, 2)] = (-far * near) / z_range;
        m[(2, 3)] = 1.0;
        m[(3, 3)] = 0.0;
        m
    }

    pub fn is_zero(matrix: &Matrix4<f32>) -> bool {
        matrix.iter().all(|v| *v == 0.0)
    }

    /// Standard product `a · b`.
    pub fn multiply(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
        a * b
    }

    /// Rotation about the X axis (radians)
    pub fn rotation_x(angle: f32) -> Matrix4<f32> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Y axis (radians)
    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Rotation about the Z axis (radians)
    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        let (s, c) = angle.sin_cos();
        Matrix4::new(
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// `matrix · rotation_y(angle)`
    pub fn rotate_y(matrix: &Matrix4<f32>, angle: f32) -> Matrix4<f32> {
        Self::multiply(matrix, &Self::rotation_y(angle))
    }

    /// Tumbling model rotation driven by a single angle (radians).
    ///
    /// Composed as `rot_x · rot_z · rot_y`.
    pub fn rotation_matrix(angle: f32) -> Matrix4<f32> {
        let xz = Self::multiply(&Self::rotation_x(angle), &Self::rotation_z(angle));
        Self::multiply(&xz, &Self::rotation_y(angle))
    }

    /// Apply `matrix` to a point with implicit `w = 1`, then divide by the
    /// resulting `w` unless it is within [`W_EPSILON`] of zero.
    pub fn transform_vector(v: &Vector3, matrix: &Matrix4<f32>) -> Vector3 {
        let h = Vector4::new(v.x, v.y, v.z, 1.0).transpose() * matrix;
        let out = Vector3::new(h[0], h[1], h[2]);
        let w = h[3];

        if w.abs() > W_EPSILON {
            out / w
        } else {
            out
        }
    }
}
