//! # Helmholtz Core
//!
//! This library provides the common types shared by the crates that discover
//! Helmholtz reciprocal pairs in multi-view photometric stereo captures. It contains
//! the calibration record consumed by the pair search, the camera pose type, the
//! direction type, the keys that identify a single observation, and the error
//! taxonomy for malformed calibration input. Algorithms live in other crates.
//!
//! ## Helmholtz reciprocity
//!
//! Swapping the roles of light source and camera in an optical path yields an
//! equivalent radiance measurement. In a multi-view photometric stereo capture every
//! image is one observation: one camera pose `v` lit by one known light direction `l`.
//! Two observations `(i, li)` and `(j, lj)` form a reciprocal pair when the light of
//! each points (within tolerance) toward the other camera.
//!
//! - `Ci`, `Cj` the optical centers of cameras `i` and `j`
//! - `Li`, `Lj` the light used for observations `(i, li)` and `(j, lj)`
//! - `p` a surface point seen by both cameras
//!
//! ```text
//!        Ci/Lj              Cj/Li
//!           \               /
//!            \             /
//!             \           /
//!              \         /
//!               \       /
//!                \     /
//!                 \   /
//!                   p
//! ```
//!
//! All directions are world-frame vectors pointing from the scene outward, so a
//! camera's viewing direction and a light direction can be compared directly.

mod calibration;
mod direction;
mod error;
mod pair;
mod pose;

pub use calibration::*;
pub use direction::*;
pub use error::*;
pub use nalgebra;
pub use pair::*;
pub use pose::*;
