use approx::assert_relative_eq;
use helmholtz_core::nalgebra::{Rotation3, Vector3};
use helmholtz_core::{
    CalibrationError, CalibrationSet, CameraToWorld, Direction, LightDirections, PairKey,
    ReciprocalPair,
};
use std::f64::consts::PI;

fn lights(n: usize) -> Vec<Direction> {
    (0..n).map(|i| Direction::new(i as f64, 0.0, -1.0)).collect()
}

#[test]
fn identity_pose_looks_down_negative_z() {
    let direction = CameraToWorld::identity().viewing_direction();
    assert_eq!(direction, Direction::new(0.0, 0.0, -1.0));
}

#[test]
fn flipped_pose_looks_down_positive_z() {
    let pose = CameraToWorld::from_parts(
        Vector3::new(0.0, 0.0, -2.0),
        Rotation3::from_axis_angle(&Vector3::y_axis(), PI),
    );
    let direction = pose.viewing_direction();
    assert_relative_eq!(direction.0, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(pose.optical_center(), Vector3::new(0.0, 0.0, -2.0));
}

#[test]
fn pose_rows_survive_conversion() {
    let rows = [
        [0.0, -1.0, 0.0, 1.5],
        [1.0, 0.0, 0.0, -2.0],
        [0.0, 0.0, 1.0, 3.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let pose = CameraToWorld::from_rows(&rows);
    assert_eq!(pose.rows(), rows);
    assert_eq!(pose.viewing_direction(), Direction::new(-0.0, -0.0, -1.0));
}

#[test]
fn non_orthonormal_rotation_is_kept_verbatim() {
    let rows = [
        [2.0, 0.0, 0.0, 0.0],
        [0.0, 2.0, 0.0, 0.0],
        [0.0, 0.0, 2.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let pose = CameraToWorld::from_rows(&rows);
    assert_eq!(pose.viewing_direction(), Direction::new(-0.0, -0.0, -2.0));
}

#[test]
fn shared_lights_validate() {
    let calibration = CalibrationSet::shared(vec![CameraToWorld::identity(); 4], lights(3));
    assert_eq!(calibration.validate(), Ok(3));
    assert_eq!(calibration.view_lights().count(), 4);
}

#[test]
fn per_view_lights_validate() {
    let calibration =
        CalibrationSet::per_view(vec![CameraToWorld::identity(); 2], vec![lights(5), lights(5)]);
    assert_eq!(calibration.validate(), Ok(5));
    assert!(calibration.view_lights().all(|view| view.len() == 5));
}

#[test]
fn pose_count_must_match_n_view() {
    let mut calibration = CalibrationSet::shared(vec![CameraToWorld::identity(); 3], lights(2));
    calibration.n_view = 4;
    assert!(matches!(
        calibration.validate(),
        Err(CalibrationError::InvalidCalibration(_))
    ));
}

#[test]
fn per_view_count_must_match_n_view() {
    let calibration = CalibrationSet {
        n_view: 3,
        pose_c2w: vec![CameraToWorld::identity(); 3],
        light_is_same: false,
        light_direction: LightDirections::PerView(vec![lights(2), lights(2)]),
    };
    assert!(matches!(
        calibration.validate(),
        Err(CalibrationError::InvalidCalibration(_))
    ));
}

#[test]
fn ragged_per_view_lights_are_rejected() {
    let calibration = CalibrationSet::per_view(
        vec![CameraToWorld::identity(); 3],
        vec![lights(4), lights(4), lights(3)],
    );
    assert!(matches!(
        calibration.validate(),
        Err(CalibrationError::ShapeMismatch(_))
    ));
}

#[test]
fn sharing_flag_must_match_layout() {
    let mut shared = CalibrationSet::shared(vec![CameraToWorld::identity(); 2], lights(2));
    shared.light_is_same = false;
    assert!(matches!(
        shared.validate(),
        Err(CalibrationError::ShapeMismatch(_))
    ));

    let mut per_view =
        CalibrationSet::per_view(vec![CameraToWorld::identity(); 2], vec![lights(2), lights(2)]);
    per_view.light_is_same = true;
    assert!(matches!(
        per_view.validate(),
        Err(CalibrationError::ShapeMismatch(_))
    ));
}

#[test]
fn empty_calibration_is_valid() {
    let calibration = CalibrationSet::shared(vec![], vec![]);
    assert_eq!(calibration.validate(), Ok(0));
    let calibration = CalibrationSet::per_view(vec![], vec![]);
    assert_eq!(calibration.validate(), Ok(0));
}

#[test]
fn reciprocal_pair_is_canonical() {
    let a = PairKey::new(3, 1);
    let b = PairKey::new(1, 7);
    let pair = ReciprocalPair::new(a, b).unwrap();
    assert_eq!(pair.first(), b);
    assert_eq!(pair.second(), a);
    assert_eq!(ReciprocalPair::new(a, PairKey::new(3, 0)), None);
    assert_eq!(pair.to_string(), "(1, 7) <-> (3, 1)");
}
