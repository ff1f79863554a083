/// Vector math on top of nalgebra
///
/// Most operations map directly onto `nalgebra::Vector3` (`+`, `-`,
/// `component_mul`, `* s`, `cross`, `dot`). The helpers here cover the
/// operations the pipeline needs with unguarded division semantics.
pub type Vector3 = nalgebra::Vector3<f32>;

/// Euclidean length.
pub fn length(v: Vector3) -> f32 {
    squared_length(v).sqrt()
}

/// Squared length, skipping the square root.
pub fn squared_length(v: Vector3) -> f32 {
    v.x * v.x + v.y * v.y + v.z * v.z
}

/// Divide by length. A zero-length input produces NaN components.
pub fn normalize(v: Vector3) -> Vector3 {
    v / length(v)
}

/// Divide by squared length instead of length.
///
/// The result is not unit length; it is only useful where any positive
/// rescale of the direction is acceptable. Zero-length input produces NaN.
pub fn squared_normalize(v: Vector3) -> Vector3 {
    v / squared_length(v)
}

/// Centroid of three points.
pub fn midpoint(a: Vector3, b: Vector3, c: Vector3) -> Vector3 {
    (a + b + c) / 3.0
}
