//! This crate contains the direction geometry used to discover Helmholtz reciprocal pairs.
//!
//! ## Angular agreement
//!
//! Every direction handled here points from the scene outward: a camera's viewing
//! direction is where the camera looks (so the scene sits along it), and a light
//! direction points from the scene toward the light. Two directions agree when the
//! angle between them is small. The angle is measured in degrees and always lies in
//! `[0, 180]`.
//!
//! ## Degenerate directions
//!
//! A zero-length direction is normalized to the zero vector rather than NaN. Its dot
//! product with anything is `0`, so it sits at exactly 90 degrees from every other
//! direction. No error is raised for it.

pub mod angle;
pub mod directions;

pub use angle::*;
pub use directions::*;
