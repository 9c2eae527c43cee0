use helmholtz_core::Direction;

/// Scales `v` to unit length.
///
/// If the norm is exactly zero the divisor is replaced by `1`, so the zero vector
/// comes back unchanged instead of becoming NaN.
pub fn normalize(v: Direction) -> Direction {
    let norm = v.norm();
    let divisor = if norm == 0.0 { 1.0 } else { norm };
    Direction(v.0 / divisor)
}

/// Normalizes every direction of a batch independently.
pub fn normalize_all(directions: &[Direction]) -> Vec<Direction> {
    directions.iter().copied().map(normalize).collect()
}

/// The angle between `a` and `b` in degrees, in `[0, 180]`.
///
/// Both inputs are normalized first and the dot product is clamped to `[-1, 1]` before
/// the inverse cosine, so rounding can never push it out of the domain of `acos`.
/// The result is symmetric in its arguments.
pub fn angle_between_degrees(a: Direction, b: Direction) -> f64 {
    let dot = normalize(a).0.dot(&normalize(b).0).clamp(-1.0, 1.0);
    dot.acos().to_degrees()
}
