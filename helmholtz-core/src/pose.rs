use crate::Direction;
use derive_more::{AsMut, AsRef, From, Into};
use nalgebra::{IsometryMatrix3, Matrix3, Matrix4, Rotation3, Translation3, Vector3};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// This contains a camera pose, which is a pose of the camera relative to the world.
/// This transforms camera-local coordinates into world coordinates, so the columns
/// of its rotation block are the camera axes expressed in the world frame.
///
/// Camera space follows the OpenGL convention used by the photometric stereo datasets:
/// the camera looks along its local negative Z axis.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(from = "[[f64; 4]; 4]", into = "[[f64; 4]; 4]")
)]
pub struct CameraToWorld(pub IsometryMatrix3<f64>);

impl CameraToWorld {
    /// Creates a pose with no change in position or orientation.
    pub fn identity() -> Self {
        Self(IsometryMatrix3::identity())
    }

    /// Create the pose from rotation and translation.
    pub fn from_parts(translation: Vector3<f64>, rotation: Rotation3<f64>) -> Self {
        Self(IsometryMatrix3::from_parts(translation.into(), rotation))
    }

    /// Create the pose from a homogeneous 4x4 matrix.
    ///
    /// The upper-left 3x3 block is taken as the rotation without checking that it is
    /// orthonormal, and the bottom row is ignored.
    pub fn from_homogeneous(matrix: &Matrix4<f64>) -> Self {
        let rotation: Matrix3<f64> = matrix.fixed_slice::<3, 3>(0, 0).into_owned();
        let translation = Translation3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)]);
        Self(IsometryMatrix3::from_parts(
            translation,
            Rotation3::from_matrix_unchecked(rotation),
        ))
    }

    /// Create the pose from the rows of a homogeneous 4x4 matrix.
    pub fn from_rows(rows: &[[f64; 4]; 4]) -> Self {
        Self::from_homogeneous(&Matrix4::from_fn(|r, c| rows[r][c]))
    }

    /// Retrieve the homogeneous matrix.
    pub fn homogeneous(&self) -> Matrix4<f64> {
        self.0.to_homogeneous()
    }

    /// Retrieve the rows of the homogeneous matrix.
    pub fn rows(&self) -> [[f64; 4]; 4] {
        let m = self.homogeneous();
        [0, 1, 2, 3].map(|r| [m[(r, 0)], m[(r, 1)], m[(r, 2)], m[(r, 3)]])
    }

    /// The optical center of the camera in world coordinates.
    pub fn optical_center(&self) -> Vector3<f64> {
        self.0.translation.vector
    }

    /// The direction the camera looks along in world coordinates (not normalized).
    ///
    /// This is the negated third column of the rotation block.
    pub fn viewing_direction(&self) -> Direction {
        Direction(-self.0.rotation.matrix().column(2).into_owned())
    }
}

impl From<[[f64; 4]; 4]> for CameraToWorld {
    fn from(rows: [[f64; 4]; 4]) -> Self {
        Self::from_rows(&rows)
    }
}

impl From<CameraToWorld> for [[f64; 4]; 4] {
    fn from(pose: CameraToWorld) -> Self {
        pose.rows()
    }
}
