/// Model transforms and view rotation state
use std::f32::consts::TAU;

use nalgebra::{Matrix4, Vector3};

/// Wrap an angle into [0, 2π)
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative angles up to exactly 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians); each angle stays in [0, 2π)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x = wrap_angle(self.x + dx);
        self.y = wrap_angle(self.y + dy);
        self.z = wrap_angle(self.z + dz);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Apply rotations in order: Z, Y, X
        rz * ry * rx
    }

    /// Rotation about the x axis
    pub fn rotation_x(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(angle, 0.0, 0.0))
    }

    /// Rotation about the y axis
    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
    }

    /// Rotation about the z axis
    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Squash along x by `factor` while stretching y and z by its inverse
    pub fn squash_matrix(factor: f32) -> Matrix4<f32> {
        Self::scale_matrix(factor, 1.0 / factor, 1.0 / factor)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut state = RotationState::zero();
        state.rotate(-0.5, TAU + 0.25, 0.0);
        assert!((state.x - (TAU - 0.5)).abs() < 1e-5);
        assert!((state.y - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_angle_tiny_negative() {
        let wrapped = wrap_angle(-1e-9);
        assert!((0.0..TAU).contains(&wrapped));
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_single_axis_rotations() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let y = Transform::rotation_x(quarter).transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!((y - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
        let x = Transform::rotation_z(quarter).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert!((x - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_mvp_order() {
        let model = Transform::translation_matrix(1.0, 0.0, 0.0);
        let view = Transform::scale_matrix(2.0, 2.0, 2.0);
        let mvp = Transform::mvp_matrix(&model, &view, &Matrix4::identity());
        let p = mvp.transform_point(&Point3::origin());
        assert!((p.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_squash_stretches_y_and_z() {
        let squash = Transform::squash_matrix(0.5);
        let p = squash.transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert!((p.x - 0.5).abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
        assert!((p.z - 2.0).abs() < 1e-6);
    }
}
