use crate::{CalibrationError, CameraToWorld, Direction};
use std::iter;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The light directions of a capture.
///
/// A capture either uses one set of light directions for every view (a fixed light
/// rig that turns with the object) or records a separate set for each view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-serialize", serde(untagged))]
pub enum LightDirections {
    /// One set of `n_view` light sets, indexed `[view][light]`.
    PerView(Vec<Vec<Direction>>),
    /// A single light set shared by all views, indexed `[light]`.
    Shared(Vec<Direction>),
}

impl LightDirections {
    /// Returns `true` if there is no light direction at all.
    ///
    /// An empty light set is compatible with both layouts.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::PerView(views) => views.is_empty(),
            Self::Shared(lights) => lights.is_empty(),
        }
    }
}

/// The calibration record consumed by the reciprocal pair search.
///
/// Only the geometry needed for pairing is stored here. Intrinsics and image
/// dimensions belong to the dataset record.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationSet {
    /// The number of views in the capture.
    pub n_view: usize,
    /// One camera-to-world pose per view.
    pub pose_c2w: Vec<CameraToWorld>,
    /// Whether every view shares the same light directions.
    pub light_is_same: bool,
    /// The light directions, laid out according to `light_is_same`.
    pub light_direction: LightDirections,
}

impl CalibrationSet {
    /// Creates a calibration where every view shares `lights`.
    pub fn shared(pose_c2w: Vec<CameraToWorld>, lights: Vec<Direction>) -> Self {
        Self {
            n_view: pose_c2w.len(),
            pose_c2w,
            light_is_same: true,
            light_direction: LightDirections::Shared(lights),
        }
    }

    /// Creates a calibration where every view has its own set of lights.
    pub fn per_view(pose_c2w: Vec<CameraToWorld>, lights: Vec<Vec<Direction>>) -> Self {
        Self {
            n_view: pose_c2w.len(),
            pose_c2w,
            light_is_same: false,
            light_direction: LightDirections::PerView(lights),
        }
    }

    /// Checks that the record is structurally sound and returns the number of lights per view.
    ///
    /// Geometric consistency (orthonormal rotations, unit-length lights) is not checked.
    pub fn validate(&self) -> Result<usize, CalibrationError> {
        if self.pose_c2w.len() != self.n_view {
            return Err(CalibrationError::InvalidCalibration(format!(
                "n_view is {} but {} camera-to-world poses were given",
                self.n_view,
                self.pose_c2w.len()
            )));
        }

        if self.light_direction.is_empty() {
            if !self.light_is_same && self.n_view != 0 {
                return Err(CalibrationError::InvalidCalibration(format!(
                    "n_view is {} but no per-view light sets were given",
                    self.n_view
                )));
            }
            return Ok(0);
        }

        match (&self.light_direction, self.light_is_same) {
            (LightDirections::Shared(lights), true) => Ok(lights.len()),
            (LightDirections::PerView(_), true) => Err(CalibrationError::ShapeMismatch(
                "light_is_same is set but one light set per view was given".into(),
            )),
            (LightDirections::Shared(_), false) => Err(CalibrationError::ShapeMismatch(
                "light_is_same is not set but a single shared light set was given".into(),
            )),
            (LightDirections::PerView(views), false) => {
                if views.len() != self.n_view {
                    return Err(CalibrationError::InvalidCalibration(format!(
                        "n_view is {} but {} per-view light sets were given",
                        self.n_view,
                        views.len()
                    )));
                }
                let n_light = views[0].len();
                if let Some((view, lights)) = views
                    .iter()
                    .enumerate()
                    .find(|(_, lights)| lights.len() != n_light)
                {
                    return Err(CalibrationError::ShapeMismatch(format!(
                        "view 0 has {} lights but view {} has {}",
                        n_light,
                        view,
                        lights.len()
                    )));
                }
                Ok(n_light)
            }
        }
    }

    /// Iterates over the raw light set of each view, repeating the shared set if needed.
    ///
    /// This does not validate; call [`CalibrationSet::validate`] first.
    pub fn view_lights(&self) -> Box<dyn Iterator<Item = &[Direction]> + '_> {
        match &self.light_direction {
            LightDirections::Shared(lights) => {
                Box::new(iter::repeat(lights.as_slice()).take(self.n_view))
            }
            LightDirections::PerView(views) => Box::new(views.iter().map(Vec::as_slice)),
        }
    }
}
