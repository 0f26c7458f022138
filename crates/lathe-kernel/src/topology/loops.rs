//! Loop closure and basic face measures for drafted point sequences.

use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;

/// A sequence is a closed loop when it has at least three points and its
/// last point lies strictly within `threshold` of its first.
pub fn is_closed_loop(points: &[Point3d], threshold: f64) -> bool {
    match points {
        [first, _, .., last] => first.distance_to(last) < threshold,
        _ => false,
    }
}

/// Unit normal from the first two edges out of point 0.
///
/// Assumes a planar loop. Fewer than three points, or collinear leading
/// points, give +Y.
pub fn face_normal(points: &[Point3d]) -> Vec3 {
    if points.len() < 3 {
        return Vec3::Y;
    }
    let v1 = points[1] - points[0];
    let v2 = points[2] - points[0];
    v1.cross(&v2).normalized().unwrap_or(Vec3::Y)
}

/// Arithmetic mean of the points, `None` when empty.
pub fn centroid(points: &[Point3d]) -> Option<Point3d> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vec3::ZERO, |acc, p| acc + p.to_vec3());
    let mean = sum / points.len() as f64;
    Some(Point3d::new(mean.x, mean.y, mean.z))
}
