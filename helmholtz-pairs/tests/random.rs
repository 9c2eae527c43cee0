use helmholtz_core::nalgebra::{Rotation3, Vector3};
use helmholtz_core::{CalibrationSet, CameraToWorld, Direction, PairKey, ReciprocalPair};
use helmholtz_geom::{camera_viewing_directions, resolve_light_directions};
use helmholtz_pairs::{find_reciprocal_pairs, reciprocity_angles, ReciprocalSearch};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeSet;

const ROUNDS: u64 = 32;
const VIEWS: usize = 8;
const LIGHTS: usize = 12;
const LIGHT_NOISE: f64 = 0.3;
const THRESHOLDS: [f64; 6] = [0.0, 5.0, 15.5, 30.0, 90.0, 180.0];

fn random_unit(rng: &mut SmallRng) -> Vector3<f64> {
    loop {
        let v: Vector3<f64> = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let norm = v.norm();
        if norm > 1e-3 && norm <= 1.0 {
            return v / norm;
        }
    }
}

/// A camera somewhere on a sphere, rolled arbitrarily about its viewing axis, looking at the origin.
fn random_pose(rng: &mut SmallRng) -> CameraToWorld {
    let backward = random_unit(rng);
    let helper = if backward.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let right = helper.cross(&backward).normalize();
    let up = backward.cross(&right);
    let roll = Rotation3::from_axis_angle(
        &helmholtz_core::nalgebra::Unit::new_normalize(backward),
        rng.gen_range(0.0..std::f64::consts::TAU),
    );
    let rotation = roll * Rotation3::from_basis_unchecked(&[right, up, backward]);
    CameraToWorld::from_parts(backward * rng.gen_range(1.0..5.0), rotation)
}

/// Lights scattered around the viewing directions of the cameras so that some pairs exist.
fn random_lights(rng: &mut SmallRng, poses: &[CameraToWorld]) -> Vec<Direction> {
    (0..LIGHTS)
        .map(|_| {
            let camera = poses[rng.gen_range(0..poses.len())].viewing_direction().0;
            let noisy = camera + random_unit(rng) * rng.gen_range(0.0..LIGHT_NOISE);
            Direction(noisy * rng.gen_range(0.5..2.0))
        })
        .collect()
}

fn random_calibration(seed: u64) -> CalibrationSet {
    let mut rng = SmallRng::seed_from_u64(seed);
    let poses: Vec<CameraToWorld> = (0..VIEWS).map(|_| random_pose(&mut rng)).collect();
    if seed % 2 == 0 {
        let lights = random_lights(&mut rng, &poses);
        CalibrationSet::shared(poses, lights)
    } else {
        let lights = (0..VIEWS).map(|_| random_lights(&mut rng, &poses)).collect();
        CalibrationSet::per_view(poses, lights)
    }
}

/// The plain four-level loop over every view pair and light combination.
fn exhaustive(calibration: &CalibrationSet, threshold: f64) -> Vec<ReciprocalPair> {
    let cameras = camera_viewing_directions(&calibration.pose_c2w);
    let lights = resolve_light_directions(calibration).unwrap();
    let mut pairs = vec![];
    for i in 0..calibration.n_view {
        for j in i + 1..calibration.n_view {
            for li in 0..lights.n_light() {
                for lj in 0..lights.n_light() {
                    let angles = reciprocity_angles(
                        lights.get(i, li).unwrap(),
                        cameras[j],
                        lights.get(j, lj).unwrap(),
                        cameras[i],
                    );
                    if angles.within(threshold) {
                        pairs.push(ReciprocalPair(PairKey::new(i, li), PairKey::new(j, lj)));
                    }
                }
            }
        }
    }
    pairs
}

#[test]
fn matches_exhaustive_search() {
    let mut total = 0;
    for seed in 0..ROUNDS {
        let calibration = random_calibration(seed);
        for threshold in THRESHOLDS {
            let pairs = find_reciprocal_pairs(&calibration, threshold).unwrap();
            assert_eq!(pairs, exhaustive(&calibration, threshold));
            total += pairs.len();
        }
    }
    eprintln!("pairs found across all rounds: {}", total);
    assert!(total > 0);
}

#[test]
fn returned_pairs_satisfy_reciprocity() {
    for seed in 0..ROUNDS {
        let calibration = random_calibration(seed);
        let cameras = camera_viewing_directions(&calibration.pose_c2w);
        let lights = resolve_light_directions(&calibration).unwrap();
        for pair in find_reciprocal_pairs(&calibration, 15.5).unwrap() {
            let ReciprocalPair(a, b) = pair;
            assert!(a.view < b.view);
            let angles = reciprocity_angles(
                lights.get(a.view, a.light).unwrap(),
                cameras[b.view],
                lights.get(b.view, b.light).unwrap(),
                cameras[a.view],
            );
            assert!(
                angles.within(15.5),
                "pair {} has angles {:?}",
                pair,
                angles
            );
        }
    }
}

#[test]
fn repeated_searches_are_identical() {
    for seed in 0..ROUNDS {
        let calibration = random_calibration(seed);
        let first = find_reciprocal_pairs(&calibration, 30.0).unwrap();
        let second = find_reciprocal_pairs(&calibration, 30.0).unwrap();
        assert_eq!(first, second);
        let sequential = ReciprocalSearch::new(30.0)
            .parallel(false)
            .find(&calibration)
            .unwrap();
        let parallel = ReciprocalSearch::new(30.0)
            .parallel(true)
            .find(&calibration)
            .unwrap();
        assert_eq!(first, sequential);
        assert_eq!(first, parallel);
    }
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_search_matches_exhaustive_search() {
    // A fixed pool so view pairs are spread over several workers on any machine.
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap();
    for seed in 0..ROUNDS {
        let calibration = random_calibration(seed);
        let expected = exhaustive(&calibration, 30.0);
        let parallel = pool
            .install(|| ReciprocalSearch::new(30.0).parallel(true).find(&calibration))
            .unwrap();
        assert_eq!(parallel, expected, "seed {}", seed);
    }
}

#[test]
fn larger_threshold_never_removes_pairs() {
    for seed in 0..ROUNDS {
        let calibration = random_calibration(seed);
        let mut previous = BTreeSet::new();
        for threshold in THRESHOLDS {
            let current: BTreeSet<_> = find_reciprocal_pairs(&calibration, threshold)
                .unwrap()
                .into_iter()
                .collect();
            assert!(
                previous.is_subset(&current),
                "threshold {} lost pairs",
                threshold
            );
            previous = current;
        }
        assert_eq!(previous.len(), VIEWS * (VIEWS - 1) / 2 * LIGHTS * LIGHTS);
    }
}
