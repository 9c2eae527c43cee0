use criterion::{criterion_group, criterion_main, Criterion};
use helmholtz_core::nalgebra::{Rotation3, Vector3};
use helmholtz_core::{CalibrationSet, CameraToWorld, Direction};
use helmholtz_pairs::ReciprocalSearch;
use std::f64::consts::TAU;

const VIEWS: usize = 20;
const LIGHTS: usize = 96;

/// A ring of cameras around the object with a light dome shared by every view,
/// roughly the layout of a multi-view photometric stereo rig.
fn ring_capture() -> CalibrationSet {
    let poses = (0..VIEWS)
        .map(|v| {
            let yaw = TAU * v as f64 / VIEWS as f64;
            let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), yaw);
            CameraToWorld::from_parts(rotation * Vector3::new(0.0, 0.0, 3.0), rotation)
        })
        .collect();
    let lights = (0..LIGHTS)
        .map(|l| {
            let azimuth = TAU * l as f64 / LIGHTS as f64;
            let elevation = 0.6 * (l % 8) as f64 / 8.0;
            Direction::new(
                azimuth.cos() * elevation.cos(),
                elevation.sin(),
                azimuth.sin() * elevation.cos(),
            )
        })
        .collect();
    CalibrationSet::shared(poses, lights)
}

fn search(c: &mut Criterion) {
    let calibration = ring_capture();
    c.bench_function("sequential", |b| {
        b.iter(|| ReciprocalSearch::new(15.5).parallel(false).find(&calibration))
    });
    c.bench_function("parallel", |b| {
        b.iter(|| ReciprocalSearch::new(15.5).parallel(true).find(&calibration))
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = search
);
criterion_main!(benches);
