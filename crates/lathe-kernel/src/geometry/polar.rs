//! Spherical <-> Cartesian conversion and angular snapping.
//!
//! Physics convention with Y up: `phi` is measured from +Y, `theta` is the
//! azimuth in the XZ plane measured from +X towards +Z.

use std::f64::consts::TAU;

use lathe_types::PolarPoint;

use super::point::Point3d;

/// Golden ratio. A weighting constant only, never a radius.
pub const PHI: f64 = 1.618_033_988_75;

/// Spherical coordinates of a Cartesian point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub r: f64,
    pub theta: f64,
    pub phi: f64,
}

pub fn to_cartesian(radius: f64, theta: f64, phi: f64) -> Point3d {
    let sin_phi = phi.sin();
    Point3d::new(
        radius * sin_phi * theta.cos(),
        radius * phi.cos(),
        radius * sin_phi * theta.sin(),
    )
}

/// Convert a polar instruction against a base radius. The point's own
/// radius acts as a multiplier.
pub fn polar_to_cartesian(point: &PolarPoint, base_radius: f64) -> Point3d {
    to_cartesian(point.effective_radius() * base_radius, point.theta, point.phi)
}

/// Inverse of [`to_cartesian`]. At the origin the divisor for `phi` is 1,
/// so the result is finite (`phi = PI/2`).
pub fn to_polar(point: &Point3d) -> Spherical {
    let r = point.norm();
    let theta = point.z.atan2(point.x);
    let divisor = if r == 0.0 { 1.0 } else { r };
    let phi = (point.y / divisor).clamp(-1.0, 1.0).acos();
    Spherical { r, theta, phi }
}

/// Round both angles to the nearest multiple of `TAU / divisions`.
/// Zero divisions disables snapping.
pub fn snap_to_grid(theta: f64, phi: f64, divisions: u32) -> (f64, f64) {
    if divisions == 0 {
        return (theta, phi);
    }
    let step = TAU / f64::from(divisions);
    ((theta / step).round() * step, (phi / step).round() * step)
}

/// Snap a point's direction to the angular grid and re-project it onto the
/// shell at `radius`. The point's own distance from the centre is discarded.
pub fn snap_point_to_precision_grid(point: &Point3d, radius: f64, divisions: u32) -> Point3d {
    let polar = to_polar(point);
    let (theta, phi) = snap_to_grid(polar.theta, polar.phi, divisions);
    to_cartesian(radius, theta, phi)
}
