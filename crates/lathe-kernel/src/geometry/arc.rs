use super::point::Point3d;
use super::vector::Vec3;

/// Rotate `v` about the unit axis `k` by `angle` (Rodrigues).
fn rotate_about(v: Vec3, k: Vec3, angle: f64) -> Vec3 {
    let (sin_a, cos_a) = angle.sin_cos();
    v * cos_a + k.cross(&v) * sin_a + k * (k.dot(&v) * (1.0 - cos_a))
}

/// Sample the great-circle arc from the direction of `p1` to the direction
/// of `p2` on the sphere of `radius`. Returns `segments + 1` points.
///
/// Parallel or antiparallel directions have no unique great circle. For those
/// the chord is sampled instead and each sample is pushed onto the sphere
/// where it has a direction.
pub fn great_arc(p1: &Point3d, p2: &Point3d, radius: f64, segments: usize) -> Vec<Point3d> {
    let segments = segments.max(1);
    let (d1, d2) = match (p1.to_vec3().normalized(), p2.to_vec3().normalized()) {
        (Some(a), Some(b)) => (a, b),
        _ => return chord(p1, p2, radius, segments),
    };

    let angle = d1.angle_to(&d2);
    let axis = match d1.cross(&d2).normalized() {
        Some(axis) => axis,
        None => return chord(p1, p2, radius, segments),
    };

    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            Point3d::ORIGIN + rotate_about(d1, axis, angle * t) * radius
        })
        .collect()
}

fn chord(p1: &Point3d, p2: &Point3d, radius: f64, segments: usize) -> Vec<Point3d> {
    let delta = *p2 - *p1;
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            (*p1 + delta * t).with_norm(radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_endpoints_match_inputs_on_sphere() {
        let a = Point3d::new(10.0, 0.0, 0.0);
        let b = Point3d::new(0.0, 0.0, 10.0);
        let arc = great_arc(&a, &b, 10.0, 8);
        assert_eq!(arc.len(), 9);
        assert!(arc[0].distance_to(&a) < 1e-9);
        assert!(arc[8].distance_to(&b) < 1e-9);
        for p in &arc {
            assert!((p.norm() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn antipodal_points_fall_back_to_chord() {
        let a = Point3d::new(0.0, 5.0, 0.0);
        let b = Point3d::new(0.0, -5.0, 0.0);
        let arc = great_arc(&a, &b, 5.0, 4);
        assert_eq!(arc.len(), 5);
        // Midpoint of the chord is the centre and has no direction.
        assert_eq!(arc[2], Point3d::ORIGIN);
    }
}
