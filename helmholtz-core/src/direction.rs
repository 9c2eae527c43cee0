use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::Vector3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A direction in world coordinates.
///
/// Unlike [`nalgebra::UnitVector3`] this is not guaranteed to be unit length. A direction
/// that went through normalization is either unit length or the zero vector, since a
/// degenerate zero-length input is kept as zero instead of turning into NaN.
#[derive(Debug, Clone, Copy, PartialEq, AsMut, AsRef, Deref, DerefMut, From, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(from = "[f64; 3]", into = "[f64; 3]"))]
pub struct Direction(pub Vector3<f64>);

impl Direction {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// Returns `true` if every component is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&n| n == 0.0)
    }
}

impl From<[f64; 3]> for Direction {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Direction> for [f64; 3] {
    fn from(direction: Direction) -> Self {
        [direction.x, direction.y, direction.z]
    }
}
