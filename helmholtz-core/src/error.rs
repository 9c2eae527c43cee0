use thiserror::Error;

/// Structural problems with a [`CalibrationSet`](crate::CalibrationSet).
///
/// These are detected before any search begins. Degenerate numerical input, such as
/// a zero-length direction, is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalibrationError {
    /// Missing or inconsistent data, such as `n_view` disagreeing with the number of poses.
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),
    /// The light direction data does not have the shape implied by `light_is_same`,
    /// or the per-view light counts are not uniform.
    #[error("light direction shape mismatch: {0}")]
    ShapeMismatch(String),
}
