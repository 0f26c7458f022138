//! Content identity for polar geometry.

use std::fmt::Write;

use lathe_types::PolarPoint;

/// Canonical text for one coordinate at a fixed number of decimals.
/// Values that round to zero are written as positive zero.
fn canonical(value: f64, precision: usize, out: &mut String) {
    let scale = 10f64.powi(precision as i32);
    let mut rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    let _ = write!(out, "{:.*}", precision, rounded);
}

/// Canonical string of a polar list: `theta|phi|radius;` per point.
pub fn canonical_string(points: &[PolarPoint], precision: usize) -> String {
    let mut out = String::with_capacity(points.len() * (3 * (precision + 4)));
    for p in points {
        canonical(p.theta, precision, &mut out);
        out.push('|');
        canonical(p.phi, precision, &mut out);
        out.push('|');
        canonical(p.effective_radius(), precision, &mut out);
        out.push(';');
    }
    out
}

/// 64-bit polynomial rolling hash (base 31) of the canonical string.
///
/// Geometry that agrees to `precision` decimals always hashes the same,
/// whatever the source formatting was.
pub fn topology_hash(points: &[PolarPoint], precision: usize) -> u64 {
    canonical_string(points, precision)
        .bytes()
        .fold(0u64, |h, b| h.wrapping_mul(31).wrapping_add(u64::from(b)))
}

/// Object id derived from the geometry hash.
pub fn topology_id(points: &[PolarPoint], precision: usize) -> String {
    format!("NEURO-{:016X}", topology_hash(points, precision))
}
