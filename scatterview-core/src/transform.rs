//! 4x4 transformation helpers for the model, view and projection matrices

use nalgebra::{Matrix4, Perspective3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// A homogeneous 3D transformation in column-vector convention
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Rotation of `degrees` about `axis` (right-handed)
    pub fn rotation_degrees(degrees: f32, axis: Vector3<f32>) -> Self {
        let axis = Unit::new_normalize(axis);
        Self {
            matrix: Matrix4::from_axis_angle(&axis, degrees.to_radians()),
        }
    }

    /// OpenGL-style perspective projection.
    ///
    /// Returns `None` when the aspect ratio is zero, negative or not finite.
    pub fn perspective(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Option<Self> {
        if !aspect.is_finite() || aspect <= 0.0 {
            return None;
        }
        let projection = Perspective3::new(aspect, fovy_degrees.to_radians(), near, far);
        Some(Self {
            matrix: projection.into_inner(),
        })
    }

    /// Compose this transformation with another (`self` applied last)
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Whether every entry is finite
    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|v| v.is_finite())
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f32) -> bool {
        let identity = Matrix4::identity();
        (self.matrix - identity).norm() < epsilon
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_translation_moves_points() {
        let t = Transform3D::translation(Vector3::new(0.0, 0.0, -20.0));
        let p = t.matrix.transform_point(&Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p, Point3::new(1.0, 2.0, -17.0));
    }

    #[test]
    fn test_rotation_about_z() {
        let r = Transform3D::rotation_degrees(90.0, Vector3::z());
        let p = r.matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_perspective_rejects_degenerate_aspect() {
        assert!(Transform3D::perspective(45.0, 0.0, 1.0, 1000.0).is_none());
        assert!(Transform3D::perspective(45.0, f32::INFINITY, 1.0, 1000.0).is_none());
        assert!(Transform3D::perspective(45.0, f32::NAN, 1.0, 1000.0).is_none());
    }

    #[test]
    fn test_perspective_is_finite() {
        let p = Transform3D::perspective(45.0, 1.5, 1.0, 1000.0).unwrap();
        assert!(p.is_finite());
        // f = 1 / tan(22.5 deg)
        let f = 1.0 / 22.5f32.to_radians().tan();
        assert_relative_eq!(p.matrix[(1, 1)], f, epsilon = 1e-5);
        assert_relative_eq!(p.matrix[(0, 0)], f / 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_compose_order() {
        let t = Transform3D::translation(Vector3::new(1.0, 0.0, 0.0));
        let r = Transform3D::rotation_degrees(90.0, Vector3::z());
        // Rotate first, then translate.
        let p = (t * r).matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 1.0, 0.0), epsilon = 1e-6);
        assert!(Transform3D::default().is_identity(1e-6));
    }
}
