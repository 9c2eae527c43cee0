//! # Helmholtz reciprocal pair search
//!
//! Given a calibrated multi-view capture, find every pair of observations
//! `((i, li), (j, lj))`, one from each of two distinct views, whose geometry satisfies
//! Helmholtz reciprocity within an angular tolerance:
//!
//! * the light `li` used at view `i` points toward camera `j`, and
//! * the light `lj` used at view `j` points toward camera `i`.
//!
//! Both angles must be at most the threshold. The search is exhaustive over all
//! `n_view * (n_view - 1) / 2` view pairs and all `n_light * n_light` light
//! combinations of each. Results come out ordered by `i`, then `j`, then `li`,
//! then `lj`, all ascending, and are bit-identical between runs (including runs that
//! use the `rayon` feature).
//!
//! ```
//! use helmholtz_core::{CalibrationSet, CameraToWorld, Direction};
//! use helmholtz_pairs::find_reciprocal_pairs;
//!
//! let calibration = CalibrationSet::shared(
//!     vec![CameraToWorld::identity(); 2],
//!     vec![Direction::new(0.0, 0.0, -1.0)],
//! );
//! let pairs = find_reciprocal_pairs(&calibration, 15.5).unwrap();
//! assert_eq!(pairs.len(), 1);
//! ```

use helmholtz_core::{CalibrationError, CalibrationSet, Direction, PairKey, ReciprocalPair};
use helmholtz_geom::{
    angle_between_degrees, camera_viewing_directions, resolve_light_directions, LightTable,
};
use itertools::Itertools;
use log::*;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// The angular tolerance used by the capture tooling when none is given, in degrees.
pub const DEFAULT_THRESHOLD_DEGREES: f64 = 15.5;

/// The two angles of the reciprocity test for one candidate pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocityAngles {
    /// Angle between the light of the first observation and the second camera.
    pub forward: f64,
    /// Angle between the light of the second observation and the first camera.
    pub backward: f64,
}

impl ReciprocityAngles {
    /// Returns `true` if both angles are at most `threshold_degrees`.
    ///
    /// NaN angles never pass.
    pub fn within(&self, threshold_degrees: f64) -> bool {
        self.forward <= threshold_degrees && self.backward <= threshold_degrees
    }
}

/// Computes the reciprocity angles of observation `(i, li)` against `(j, lj)`.
///
/// `light_i` is the light of the observation at view `i`, `camera_i` the viewing
/// direction of view `i`, and likewise for `j`.
pub fn reciprocity_angles(
    light_i: Direction,
    camera_j: Direction,
    light_j: Direction,
    camera_i: Direction,
) -> ReciprocityAngles {
    ReciprocityAngles {
        forward: angle_between_degrees(light_i, camera_j),
        backward: angle_between_degrees(light_j, camera_i),
    }
}

/// Exhaustive search for reciprocal pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReciprocalSearch {
    /// The largest angle, in degrees, that still counts as pointing toward a camera.
    pub threshold_degrees: f64,
    /// Split the view pairs across the rayon thread pool.
    ///
    /// Has no effect unless the `rayon` feature is enabled. The output is identical
    /// either way.
    pub parallel: bool,
}

impl ReciprocalSearch {
    pub fn new(threshold_degrees: f64) -> Self {
        Self {
            threshold_degrees,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    /// Finds every reciprocal pair of `calibration` in canonical order.
    ///
    /// The calibration is validated before anything else. Fewer than two views is not
    /// an error and simply yields no pairs.
    pub fn find(
        &self,
        calibration: &CalibrationSet,
    ) -> Result<Vec<ReciprocalPair>, CalibrationError> {
        let lights = resolve_light_directions(calibration)?;
        if calibration.n_view < 2 {
            info!(
                "{} view(s) given, no reciprocal pair is possible",
                calibration.n_view
            );
            return Ok(vec![]);
        }
        let cameras = camera_viewing_directions(&calibration.pose_c2w);

        let view_pairs: Vec<(usize, usize)> =
            (0..calibration.n_view).tuple_combinations().collect();
        debug!(
            "searching {} view pairs with {} lights each at {} degrees",
            view_pairs.len(),
            lights.n_light(),
            self.threshold_degrees
        );

        let search = |&(i, j): &(usize, usize)| {
            search_view_pair(i, j, &cameras, &lights, self.threshold_degrees)
        };

        #[cfg(feature = "rayon")]
        let pairs = if self.parallel {
            // Indexed collect keeps the view pair order.
            view_pairs.par_iter().map(search).collect::<Vec<_>>().concat()
        } else {
            view_pairs.iter().flat_map(search).collect()
        };
        #[cfg(not(feature = "rayon"))]
        let pairs: Vec<ReciprocalPair> = view_pairs.iter().flat_map(search).collect();

        info!(
            "found {} reciprocal pairs among {} views",
            pairs.len(),
            calibration.n_view
        );
        Ok(pairs)
    }
}

impl Default for ReciprocalSearch {
    fn default() -> Self {
        Self {
            threshold_degrees: DEFAULT_THRESHOLD_DEGREES,
            parallel: true,
        }
    }
}

/// Finds every reciprocal pair of `calibration` within `threshold_degrees`.
///
/// See [`ReciprocalSearch::find`].
pub fn find_reciprocal_pairs(
    calibration: &CalibrationSet,
    threshold_degrees: f64,
) -> Result<Vec<ReciprocalPair>, CalibrationError> {
    ReciprocalSearch::new(threshold_degrees).find(calibration)
}

/// All accepted light combinations between views `i < j`, ordered by `li` then `lj`.
///
/// The forward angle only depends on `li` and the backward angle only on `lj`, so each
/// is computed once per light instead of once per combination. The accepted set is
/// the same as testing every combination with [`reciprocity_angles`].
fn search_view_pair(
    i: usize,
    j: usize,
    cameras: &[Direction],
    lights: &LightTable,
    threshold_degrees: f64,
) -> Vec<ReciprocalPair> {
    let (lights_i, lights_j) = match (lights.view(i), lights.view(j)) {
        (Some(lights_i), Some(lights_j)) => (lights_i, lights_j),
        _ => return vec![],
    };
    let toward_i: Vec<usize> = lights_j
        .iter()
        .positions(|&light_j| angle_between_degrees(light_j, cameras[i]) <= threshold_degrees)
        .collect();
    if toward_i.is_empty() {
        return vec![];
    }

    lights_i
        .iter()
        .positions(|&light_i| angle_between_degrees(light_i, cameras[j]) <= threshold_degrees)
        .flat_map(|li| {
            toward_i
                .iter()
                .map(move |&lj| ReciprocalPair(PairKey::new(i, li), PairKey::new(j, lj)))
        })
        .collect()
}
