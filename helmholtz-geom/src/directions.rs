use crate::{normalize, normalize_all};
use helmholtz_core::{CalibrationError, CalibrationSet, CameraToWorld, Direction, LightDirections};
use log::*;

/// The normalized viewing direction of every camera, in pose order.
pub fn camera_viewing_directions(poses: &[CameraToWorld]) -> Vec<Direction> {
    poses
        .iter()
        .map(|pose| normalize(pose.viewing_direction()))
        .collect()
}

/// Normalized light directions, addressable as `[view][light]` whatever the capture layout.
///
/// A shared light set is normalized once and the same slice is handed out for every
/// view. Nothing is copied per view.
#[derive(Debug, Clone, PartialEq)]
pub struct LightTable {
    n_view: usize,
    n_light: usize,
    layout: Layout,
}

#[derive(Debug, Clone, PartialEq)]
enum Layout {
    Broadcast(Vec<Direction>),
    PerView(Vec<Vec<Direction>>),
}

impl LightTable {
    pub fn n_view(&self) -> usize {
        self.n_view
    }

    pub fn n_light(&self) -> usize {
        self.n_light
    }

    /// Returns `true` when the lights of one set are shared by all views.
    pub fn is_broadcast(&self) -> bool {
        matches!(self.layout, Layout::Broadcast(_))
    }

    /// The normalized light directions of `view`, or `None` if `view` is out of range.
    pub fn view(&self, view: usize) -> Option<&[Direction]> {
        if view >= self.n_view {
            return None;
        }
        match &self.layout {
            Layout::Broadcast(lights) => Some(lights),
            Layout::PerView(views) => views.get(view).map(Vec::as_slice),
        }
    }

    /// The normalized direction of `light` as seen from `view`.
    pub fn get(&self, view: usize, light: usize) -> Option<Direction> {
        self.view(view)?.get(light).copied()
    }

    /// Iterates over the light sets of every view in order.
    pub fn views(&self) -> impl Iterator<Item = &[Direction]> + '_ {
        (0..self.n_view).filter_map(move |view| self.view(view))
    }
}

/// Resolves the light directions of `calibration` into a `[view][light]` table of
/// normalized directions.
///
/// The calibration is validated first, so a malformed record fails here before any
/// search work begins.
pub fn resolve_light_directions(
    calibration: &CalibrationSet,
) -> Result<LightTable, CalibrationError> {
    let n_light = calibration.validate()?;
    let layout = match &calibration.light_direction {
        LightDirections::Shared(lights) => Layout::Broadcast(normalize_all(lights)),
        LightDirections::PerView(views) if calibration.light_is_same => {
            // Only reachable for an empty light set, which fits either layout.
            debug_assert!(views.is_empty());
            Layout::Broadcast(vec![])
        }
        LightDirections::PerView(views) => {
            Layout::PerView(views.iter().map(|lights| normalize_all(lights)).collect())
        }
    };
    debug!(
        "resolved {} lights for each of {} views",
        n_light, calibration.n_view
    );
    Ok(LightTable {
        n_view: calibration.n_view,
        n_light,
        layout,
    })
}
